#![forbid(unsafe_code)]

use super::{
    BoardDetail, BoardRow, CreateBoardRequest, DEFAULT_BOARD_COLOR, ListDetail, SqliteStore,
    StoreError, ensure_title, insert_event_tx, now_ms,
};
use rusqlite::{OptionalExtension, params};
use serde_json::json;

impl SqliteStore {
    pub fn create_board(&mut self, request: CreateBoardRequest) -> Result<BoardRow, StoreError> {
        let title = ensure_title(&request.title)?.to_string();
        let background_color = request
            .background_color
            .filter(|color| !color.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BOARD_COLOR.to_string());
        let now_ms = now_ms();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO boards(title, background_color, created_at_ms) VALUES (?1, ?2, ?3)",
            params![title, background_color, now_ms],
        )?;
        let id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            now_ms,
            "board",
            id,
            "board.create",
            &json!({"title": title}).to_string(),
        )?;
        tx.commit()?;

        Ok(BoardRow {
            id,
            title,
            background_color,
            created_at_ms: now_ms,
        })
    }

    pub fn list_boards(&self) -> Result<Vec<BoardRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, background_color, created_at_ms \
             FROM boards \
             ORDER BY created_at_ms DESC, id DESC",
        )?;
        let rows = stmt.query_map([], board_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The full nested board: lists by position, their active cards by
    /// position, each card with labels, members, and ordered checklists.
    pub fn board_detail(&self, board_id: i64) -> Result<BoardDetail, StoreError> {
        let board = self
            .conn
            .query_row(
                "SELECT id, title, background_color, created_at_ms FROM boards WHERE id = ?1",
                params![board_id],
                board_row,
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;

        let mut lists = Vec::new();
        for list in self.lists_for_board(board_id)? {
            let mut cards = Vec::new();
            for card in self.active_cards_in_list(list.id)? {
                cards.push(self.card_relations(card)?);
            }
            lists.push(ListDetail { list, cards });
        }

        let labels = self.list_labels(board_id)?;

        Ok(BoardDetail {
            board,
            lists,
            labels,
        })
    }
}

fn board_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BoardRow> {
    Ok(BoardRow {
        id: row.get(0)?,
        title: row.get(1)?,
        background_color: row.get(2)?,
        created_at_ms: row.get(3)?,
    })
}
