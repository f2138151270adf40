#![forbid(unsafe_code)]

use super::{
    CardDetail, CreateLabelRequest, LabelRow, SqliteStore, StoreError, insert_event_tx,
    map_link_conflict, map_missing_parent, now_ms,
};
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    pub fn create_label(&mut self, request: CreateLabelRequest) -> Result<LabelRow, StoreError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("label name must not be empty"));
        }
        let color = request.color.trim().to_string();
        if color.is_empty() {
            return Err(StoreError::InvalidInput("label color must not be empty"));
        }
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let insert = tx.execute(
            "INSERT INTO labels(board_id, name, color) VALUES (?1, ?2, ?3)",
            params![request.board_id, name, color],
        );
        if let Err(err) = insert {
            return Err(map_missing_parent(err));
        }
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "label",
            id,
            "label.create",
            &json!({"board_id": request.board_id, "name": name}).to_string(),
        )?;
        tx.commit()?;

        Ok(LabelRow {
            id,
            board_id: request.board_id,
            name,
            color,
        })
    }

    pub fn list_labels(&self, board_id: i64) -> Result<Vec<LabelRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, board_id, name, color FROM labels WHERE board_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![board_id], label_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn attach_label(&mut self, card_id: i64, label_id: i64) -> Result<CardDetail, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let insert = tx.execute(
            "INSERT INTO card_labels(card_id, label_id) VALUES (?1, ?2)",
            params![card_id, label_id],
        );
        if let Err(err) = insert {
            return Err(map_link_conflict(err, "label already on this card"));
        }
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            "label.attach",
            &json!({"label_id": label_id}).to_string(),
        )?;
        tx.commit()?;

        self.card_detail(card_id)
    }

    pub fn detach_label(&mut self, card_id: i64, label_id: i64) -> Result<CardDetail, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "DELETE FROM card_labels WHERE card_id = ?1 AND label_id = ?2",
            params![card_id, label_id],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            "label.detach",
            &json!({"label_id": label_id}).to_string(),
        )?;
        tx.commit()?;

        self.card_detail(card_id)
    }

    pub(crate) fn labels_for_card(&self, card_id: i64) -> Result<Vec<LabelRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT l.id, l.board_id, l.name, l.color \
             FROM card_labels cl \
             JOIN labels l ON l.id = cl.label_id \
             WHERE cl.card_id = ?1 \
             ORDER BY l.id ASC",
        )?;
        let rows = stmt.query_map(params![card_id], label_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn label_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LabelRow> {
    Ok(LabelRow {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
    })
}
