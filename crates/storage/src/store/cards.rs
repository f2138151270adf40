#![forbid(unsafe_code)]

use super::{
    CardDetail, CardRow, CardSearchHit, CreateCardRequest, ListRow, SearchCardsRequest,
    SqliteStore, StoreError, UpdateCardRequest, append_position_tx, ensure_title, insert_event_tx,
    map_missing_parent, now_ms,
};
use kb_core::position::{CardMove, ShiftBand, delta_shift};
use rusqlite::{OptionalExtension, params};
use serde_json::json;

const CARD_COLUMNS: &str =
    "id, list_id, title, description, due_date_ms, position, archived, created_at_ms, updated_at_ms";

impl SqliteStore {
    /// New cards land after every active card in the list; archived cards do
    /// not count toward the maximum.
    pub fn create_card(&mut self, request: CreateCardRequest) -> Result<CardRow, StoreError> {
        let title = ensure_title(&request.title)?.to_string();
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let position = append_position_tx(
            &tx,
            "SELECT MAX(position) FROM cards WHERE list_id = ?1 AND archived = 0",
            request.list_id,
        )?;
        let insert = tx.execute(
            "INSERT INTO cards(list_id, title, position, created_at_ms, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![request.list_id, title, position, now_ms],
        );
        if let Err(err) = insert {
            return Err(map_missing_parent(err));
        }
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            id,
            "card.create",
            &json!({"list_id": request.list_id, "position": position}).to_string(),
        )?;
        tx.commit()?;

        Ok(CardRow {
            id,
            list_id: request.list_id,
            title,
            description: None,
            due_date_ms: None,
            position,
            archived: false,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        })
    }

    pub fn update_card(&mut self, request: UpdateCardRequest) -> Result<CardRow, StoreError> {
        if request.title.is_none() && request.description.is_none() && request.due_date_ms.is_none()
        {
            return Err(StoreError::InvalidInput("no fields to update"));
        }
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let row = tx
            .query_row(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
                params![request.card_id],
                card_row,
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;

        let title = match request.title {
            Some(title) => ensure_title(&title)?.to_string(),
            None => row.title,
        };
        let description = match request.description {
            Some(value) => value,
            None => row.description,
        };
        let due_date_ms = match request.due_date_ms {
            Some(value) => value,
            None => row.due_date_ms,
        };

        tx.execute(
            "UPDATE cards SET title = ?2, description = ?3, due_date_ms = ?4, updated_at_ms = ?5 \
             WHERE id = ?1",
            params![request.card_id, title, description, due_date_ms, now_ms],
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            request.card_id,
            "card.update",
            &json!({"list_id": row.list_id}).to_string(),
        )?;
        tx.commit()?;

        Ok(CardRow {
            id: request.card_id,
            list_id: row.list_id,
            title,
            description,
            due_date_ms,
            position: row.position,
            archived: row.archived,
            created_at_ms: row.created_at_ms,
            updated_at_ms: now_ms,
        })
    }

    /// Flips the archived flag. The card keeps its position either way;
    /// active siblings re-densify on the next reorder or move that touches
    /// the list.
    pub fn set_card_archived(
        &mut self,
        card_id: i64,
        archived: bool,
    ) -> Result<CardRow, StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE cards SET archived = ?2, updated_at_ms = ?3 WHERE id = ?1",
            params![card_id, archived as i64, now_ms],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        let row = tx.query_row(
            &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
            params![card_id],
            card_row,
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            if archived {
                "card.archive"
            } else {
                "card.unarchive"
            },
            &json!({"list_id": row.list_id}).to_string(),
        )?;
        tx.commit()?;
        Ok(row)
    }

    /// Permanent delete; cascades to checklists and link rows. Sibling
    /// positions are left gapped, like list deletion.
    pub fn delete_card(&mut self, card_id: i64) -> Result<(), StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let list_id: Option<i64> = tx
            .query_row(
                "SELECT list_id FROM cards WHERE id = ?1",
                params![card_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(list_id) = list_id else {
            return Err(StoreError::UnknownId);
        };
        tx.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
        insert_event_tx(
            &tx,
            now_ms,
            "card",
            card_id,
            "card.delete",
            &json!({"list_id": list_id}).to_string(),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Applies a classified move. Every statement of one move shares a
    /// transaction; a failure at any step leaves both lists exactly as they
    /// were.
    pub fn move_card(&mut self, mv: CardMove) -> Result<(), StoreError> {
        let now_ms = now_ms();
        match mv {
            CardMove::Stay { card_id, .. } => {
                let exists: Option<i64> = self
                    .conn
                    .query_row(
                        "SELECT id FROM cards WHERE id = ?1",
                        params![card_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                if exists.is_none() {
                    return Err(StoreError::UnknownId);
                }
                Ok(())
            }
            CardMove::Within {
                card_id,
                list_id,
                source,
                dest,
            } => {
                let tx = self.conn.transaction()?;
                match delta_shift(source, dest) {
                    Some(ShiftBand::TowardEnd { source, dest }) => {
                        tx.execute(
                            "UPDATE cards SET position = position - 1 \
                             WHERE list_id = ?1 AND position > ?2 AND position <= ?3 \
                               AND archived = 0 AND id <> ?4",
                            params![list_id, source, dest, card_id],
                        )?;
                    }
                    Some(ShiftBand::TowardStart { source, dest }) => {
                        tx.execute(
                            "UPDATE cards SET position = position + 1 \
                             WHERE list_id = ?1 AND position >= ?2 AND position < ?3 \
                               AND archived = 0 AND id <> ?4",
                            params![list_id, dest, source, card_id],
                        )?;
                    }
                    // classify never produces Within with equal indices
                    None => {}
                }
                let changed = tx.execute(
                    "UPDATE cards SET position = ?2, updated_at_ms = ?3 WHERE id = ?1",
                    params![card_id, dest, now_ms],
                )?;
                if changed != 1 {
                    return Err(StoreError::UnknownId);
                }
                insert_event_tx(
                    &tx,
                    now_ms,
                    "card",
                    card_id,
                    "card.move",
                    &json!({"list_id": list_id, "from": source, "to": dest}).to_string(),
                )?;
                tx.commit()?;
                Ok(())
            }
            CardMove::Across {
                card_id,
                source_list_id,
                dest_list_id,
                source,
                dest,
            } => {
                let tx = self.conn.transaction()?;
                // close the gap the card leaves behind
                tx.execute(
                    "UPDATE cards SET position = position - 1 \
                     WHERE list_id = ?1 AND position > ?2 AND archived = 0",
                    params![source_list_id, source],
                )?;
                // open a slot at the destination
                tx.execute(
                    "UPDATE cards SET position = position + 1 \
                     WHERE list_id = ?1 AND position >= ?2 AND archived = 0",
                    params![dest_list_id, dest],
                )?;
                // rewrite the card strictly last so the range updates above
                // cannot catch it
                let changed = tx
                    .execute(
                        "UPDATE cards SET list_id = ?2, position = ?3, updated_at_ms = ?4 \
                         WHERE id = ?1",
                        params![card_id, dest_list_id, dest, now_ms],
                    )
                    .map_err(map_missing_parent)?;
                if changed != 1 {
                    return Err(StoreError::UnknownId);
                }
                insert_event_tx(
                    &tx,
                    now_ms,
                    "card",
                    card_id,
                    "card.move",
                    &json!({
                        "from_list": source_list_id,
                        "to_list": dest_list_id,
                        "from": source,
                        "to": dest
                    })
                    .to_string(),
                )?;
                tx.commit()?;
                Ok(())
            }
        }
    }

    /// Case-insensitive title substring search among active cards, optionally
    /// fenced to one board.
    pub fn search_cards(
        &self,
        request: SearchCardsRequest,
    ) -> Result<Vec<CardSearchHit>, StoreError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(StoreError::InvalidInput("search text must not be empty"));
        }

        let base = "SELECT c.id, c.list_id, c.title, c.description, c.due_date_ms, c.position, \
                    c.archived, c.created_at_ms, c.updated_at_ms, \
                    l.id, l.board_id, l.title, l.position, l.created_at_ms \
                    FROM cards c JOIN lists l ON l.id = c.list_id \
                    WHERE c.archived = 0 AND instr(lower(c.title), lower(?1)) > 0";

        let mut hits: Vec<(CardRow, ListRow)> = Vec::new();
        match request.board_id {
            Some(board_id) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} AND l.board_id = ?2 ORDER BY c.id ASC"))?;
                let rows = stmt.query_map(params![text, board_id], search_row)?;
                for row in rows {
                    hits.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(&format!("{base} ORDER BY c.id ASC"))?;
                let rows = stmt.query_map(params![text], search_row)?;
                for row in rows {
                    hits.push(row?);
                }
            }
        }

        hits.into_iter()
            .map(|(card, list)| {
                let labels = self.labels_for_card(card.id)?;
                let members = self.members_for_card(card.id)?;
                Ok(CardSearchHit {
                    card,
                    list,
                    labels,
                    members,
                })
            })
            .collect()
    }

    pub fn card_detail(&self, card_id: i64) -> Result<CardDetail, StoreError> {
        let card = self
            .conn
            .query_row(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
                params![card_id],
                card_row,
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;
        self.card_relations(card)
    }

    pub(crate) fn card_relations(&self, card: CardRow) -> Result<CardDetail, StoreError> {
        let labels = self.labels_for_card(card.id)?;
        let members = self.members_for_card(card.id)?;
        let checklists = self.checklists_for_card(card.id)?;
        Ok(CardDetail {
            card,
            labels,
            members,
            checklists,
        })
    }

    pub(crate) fn active_cards_in_list(&self, list_id: i64) -> Result<Vec<CardRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards \
             WHERE list_id = ?1 AND archived = 0 \
             ORDER BY position ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![list_id], card_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        list_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        due_date_ms: row.get(4)?,
        position: row.get(5)?,
        archived: row.get::<_, i64>(6)? != 0,
        created_at_ms: row.get(7)?,
        updated_at_ms: row.get(8)?,
    })
}

fn search_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(CardRow, ListRow)> {
    Ok((
        card_row(row)?,
        ListRow {
            id: row.get(9)?,
            board_id: row.get(10)?,
            title: row.get(11)?,
            position: row.get(12)?,
            created_at_ms: row.get(13)?,
        },
    ))
}
