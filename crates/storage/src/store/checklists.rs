#![forbid(unsafe_code)]

use super::{
    AddChecklistItemRequest, ChecklistDetail, ChecklistItemRow, ChecklistRow,
    CreateChecklistRequest, SqliteStore, StoreError, append_position_tx, ensure_title,
    insert_event_tx, map_missing_parent, now_ms,
};
use rusqlite::{OptionalExtension, params};
use serde_json::json;

impl SqliteStore {
    pub fn create_checklist(
        &mut self,
        request: CreateChecklistRequest,
    ) -> Result<ChecklistDetail, StoreError> {
        let title = ensure_title(&request.title)?.to_string();
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let position = append_position_tx(
            &tx,
            "SELECT MAX(position) FROM checklists WHERE card_id = ?1",
            request.card_id,
        )?;
        let insert = tx.execute(
            "INSERT INTO checklists(card_id, title, position) VALUES (?1, ?2, ?3)",
            params![request.card_id, title, position],
        );
        if let Err(err) = insert {
            return Err(map_missing_parent(err));
        }
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "checklist",
            id,
            "checklist.create",
            &json!({"card_id": request.card_id, "position": position}).to_string(),
        )?;
        tx.commit()?;

        Ok(ChecklistDetail {
            checklist: ChecklistRow {
                id,
                card_id: request.card_id,
                title,
                position,
            },
            items: Vec::new(),
        })
    }

    pub fn delete_checklist(&mut self, checklist_id: i64) -> Result<(), StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let card_id: Option<i64> = tx
            .query_row(
                "SELECT card_id FROM checklists WHERE id = ?1",
                params![checklist_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(card_id) = card_id else {
            return Err(StoreError::UnknownId);
        };
        tx.execute(
            "DELETE FROM checklists WHERE id = ?1",
            params![checklist_id],
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "checklist",
            checklist_id,
            "checklist.delete",
            &json!({"card_id": card_id}).to_string(),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Appends an item and returns the whole checklist, items in order.
    pub fn add_checklist_item(
        &mut self,
        request: AddChecklistItemRequest,
    ) -> Result<ChecklistDetail, StoreError> {
        let text = request.text.trim().to_string();
        if text.is_empty() {
            return Err(StoreError::InvalidInput("item text must not be empty"));
        }
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let position = append_position_tx(
            &tx,
            "SELECT MAX(position) FROM checklist_items WHERE checklist_id = ?1",
            request.checklist_id,
        )?;
        let insert = tx.execute(
            "INSERT INTO checklist_items(checklist_id, text, position) VALUES (?1, ?2, ?3)",
            params![request.checklist_id, text, position],
        );
        if let Err(err) = insert {
            return Err(map_missing_parent(err));
        }
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "checklist_item",
            id,
            "checklist.add_item",
            &json!({"checklist_id": request.checklist_id, "position": position}).to_string(),
        )?;
        tx.commit()?;

        self.checklist_detail(request.checklist_id)
    }

    pub fn set_item_completed(
        &mut self,
        item_id: i64,
        completed: bool,
    ) -> Result<ChecklistItemRow, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE checklist_items SET completed = ?2 WHERE id = ?1",
            params![item_id, completed as i64],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        let row = tx.query_row(
            "SELECT id, checklist_id, text, completed, position FROM checklist_items WHERE id = ?1",
            params![item_id],
            item_row,
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "checklist_item",
            item_id,
            "checklist.set_item",
            &json!({"completed": completed}).to_string(),
        )?;
        tx.commit()?;
        Ok(row)
    }

    pub fn delete_checklist_item(&mut self, item_id: i64) -> Result<(), StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let checklist_id: Option<i64> = tx
            .query_row(
                "SELECT checklist_id FROM checklist_items WHERE id = ?1",
                params![item_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(checklist_id) = checklist_id else {
            return Err(StoreError::UnknownId);
        };
        tx.execute(
            "DELETE FROM checklist_items WHERE id = ?1",
            params![item_id],
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "checklist_item",
            item_id,
            "checklist.delete_item",
            &json!({"checklist_id": checklist_id}).to_string(),
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn checklist_detail(&self, checklist_id: i64) -> Result<ChecklistDetail, StoreError> {
        let checklist = self
            .conn
            .query_row(
                "SELECT id, card_id, title, position FROM checklists WHERE id = ?1",
                params![checklist_id],
                checklist_row,
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;
        let items = self.items_for_checklist(checklist_id)?;
        Ok(ChecklistDetail { checklist, items })
    }

    pub(crate) fn checklists_for_card(
        &self,
        card_id: i64,
    ) -> Result<Vec<ChecklistDetail>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, card_id, title, position \
             FROM checklists \
             WHERE card_id = ?1 \
             ORDER BY position ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![card_id], checklist_row)?;
        let checklists = rows.collect::<Result<Vec<_>, _>>()?;

        checklists
            .into_iter()
            .map(|checklist| {
                let items = self.items_for_checklist(checklist.id)?;
                Ok(ChecklistDetail { checklist, items })
            })
            .collect()
    }

    fn items_for_checklist(&self, checklist_id: i64) -> Result<Vec<ChecklistItemRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, checklist_id, text, completed, position \
             FROM checklist_items \
             WHERE checklist_id = ?1 \
             ORDER BY position ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![checklist_id], item_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn checklist_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChecklistRow> {
    Ok(ChecklistRow {
        id: row.get(0)?,
        card_id: row.get(1)?,
        title: row.get(2)?,
        position: row.get(3)?,
    })
}

fn item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChecklistItemRow> {
    Ok(ChecklistItemRow {
        id: row.get(0)?,
        checklist_id: row.get(1)?,
        text: row.get(2)?,
        completed: row.get::<_, i64>(3)? != 0,
        position: row.get(4)?,
    })
}
