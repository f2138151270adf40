#![forbid(unsafe_code)]

use super::{
    CreateListRequest, ListRow, ReorderListsRequest, SqliteStore, StoreError, append_position_tx,
    ensure_title, insert_event_tx, map_missing_parent, now_ms,
};
use kb_core::position::{BulkOrderError, validate_bulk_order};
use rusqlite::{OptionalExtension, params};
use serde_json::json;

impl SqliteStore {
    pub fn create_list(&mut self, request: CreateListRequest) -> Result<ListRow, StoreError> {
        let title = ensure_title(&request.title)?.to_string();
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let position = append_position_tx(
            &tx,
            "SELECT MAX(position) FROM lists WHERE board_id = ?1",
            request.board_id,
        )?;
        let insert = tx.execute(
            "INSERT INTO lists(board_id, title, position, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
            params![request.board_id, title, position, now_ms],
        );
        if let Err(err) = insert {
            return Err(map_missing_parent(err));
        }
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "list",
            id,
            "list.create",
            &json!({"board_id": request.board_id, "position": position}).to_string(),
        )?;
        tx.commit()?;

        Ok(ListRow {
            id,
            board_id: request.board_id,
            title,
            position,
            created_at_ms: now_ms,
        })
    }

    pub fn rename_list(&mut self, list_id: i64, title: &str) -> Result<ListRow, StoreError> {
        let title = ensure_title(title)?.to_string();
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE lists SET title = ?2 WHERE id = ?1",
            params![list_id, title],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        let row = tx.query_row(
            "SELECT id, board_id, title, position, created_at_ms FROM lists WHERE id = ?1",
            params![list_id],
            list_row,
        )?;
        insert_event_tx(
            &tx,
            now_ms,
            "list",
            list_id,
            "list.rename",
            &json!({"title": title}).to_string(),
        )?;
        tx.commit()?;
        Ok(row)
    }

    /// Cascades to the list's cards. Surviving sibling lists keep their
    /// positions; the resulting gap is tolerated because reads order by
    /// position and the next bulk reorder rewrites the whole scope.
    pub fn delete_list(&mut self, list_id: i64) -> Result<(), StoreError> {
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let board_id: Option<i64> = tx
            .query_row(
                "SELECT board_id FROM lists WHERE id = ?1",
                params![list_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(board_id) = board_id else {
            return Err(StoreError::UnknownId);
        };
        tx.execute("DELETE FROM lists WHERE id = ?1", params![list_id])?;
        insert_event_tx(
            &tx,
            now_ms,
            "list",
            list_id,
            "list.delete",
            &json!({"board_id": board_id}).to_string(),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Whole-array position replacement for a board's lists. The submitted
    /// pairs are trusted to form a dense permutation; each row is written as
    /// given, all inside one transaction. An id that matches no list aborts
    /// the whole batch.
    pub fn reorder_lists(&mut self, request: ReorderListsRequest) -> Result<(), StoreError> {
        validate_bulk_order(&request.entries).map_err(|err| {
            StoreError::InvalidInput(match err {
                BulkOrderError::Empty => "lists must not be empty",
                BulkOrderError::NonPositiveId { .. } => "each list needs a valid id",
                BulkOrderError::NegativePosition { .. } => "each list needs a non-negative position",
            })
        })?;
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        let board_id: Option<i64> = tx
            .query_row(
                "SELECT board_id FROM lists WHERE id = ?1",
                params![request.entries[0].id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(board_id) = board_id else {
            return Err(StoreError::UnknownId);
        };
        for entry in &request.entries {
            let changed = tx.execute(
                "UPDATE lists SET position = ?2 WHERE id = ?1",
                params![entry.id, entry.position],
            )?;
            if changed == 0 {
                return Err(StoreError::UnknownId);
            }
        }
        insert_event_tx(
            &tx,
            now_ms,
            "board",
            board_id,
            "lists.reorder",
            &json!({"count": request.entries.len()}).to_string(),
        )?;
        tx.commit()?;
        Ok(())
    }

    pub(crate) fn lists_for_board(&self, board_id: i64) -> Result<Vec<ListRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, board_id, title, position, created_at_ms \
             FROM lists \
             WHERE board_id = ?1 \
             ORDER BY position ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![board_id], list_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn list_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListRow> {
    Ok(ListRow {
        id: row.get(0)?,
        board_id: row.get(1)?,
        title: row.get(2)?,
        position: row.get(3)?,
        created_at_ms: row.get(4)?,
    })
}
