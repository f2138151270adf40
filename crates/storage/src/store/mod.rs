#![forbid(unsafe_code)]

mod boards;
mod cards;
mod checklists;
mod error;
mod events;
mod labels;
mod lists;
mod members;
mod requests;
mod types;

pub use error::StoreError;
pub use requests::*;
pub use types::*;

use rusqlite::{Connection, ErrorCode, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BOARD_COLOR: &str = "#0079bf";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("kanban.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS boards (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          background_color TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lists (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
          title TEXT NOT NULL,
          position INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          list_id INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
          title TEXT NOT NULL,
          description TEXT,
          due_date_ms INTEGER,
          position INTEGER NOT NULL,
          archived INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS labels (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
          name TEXT NOT NULL,
          color TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS card_labels (
          card_id INTEGER NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
          label_id INTEGER NOT NULL REFERENCES labels(id) ON DELETE CASCADE,
          PRIMARY KEY (card_id, label_id)
        );

        CREATE TABLE IF NOT EXISTS members (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          initials TEXT NOT NULL,
          avatar_color TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS card_members (
          card_id INTEGER NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
          member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
          PRIMARY KEY (card_id, member_id)
        );

        CREATE TABLE IF NOT EXISTS checklists (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          card_id INTEGER NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
          title TEXT NOT NULL,
          position INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS checklist_items (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          checklist_id INTEGER NOT NULL REFERENCES checklists(id) ON DELETE CASCADE,
          text TEXT NOT NULL,
          completed INTEGER NOT NULL DEFAULT 0,
          position INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL,
          entity TEXT,
          entity_id INTEGER,
          type TEXT NOT NULL,
          payload_json TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_lists_board_position ON lists(board_id, position);
        CREATE INDEX IF NOT EXISTS idx_cards_list_position ON cards(list_id, position);
        CREATE INDEX IF NOT EXISTS idx_checklists_card_position ON checklists(card_id, position);
        CREATE INDEX IF NOT EXISTS idx_checklist_items_position ON checklist_items(checklist_id, position);
        "#,
    )?;
    Ok(())
}

pub(crate) fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}

/// Next append position for a scope. `sql` selects `MAX(position)` among the
/// scope's live rows; runs inside the caller's transaction so a racing
/// creation cannot observe the same maximum.
pub(crate) fn append_position_tx(
    tx: &Transaction<'_>,
    sql: &str,
    parent_id: i64,
) -> Result<i64, StoreError> {
    let max: Option<i64> = tx.query_row(sql, params![parent_id], |row| row.get(0))?;
    Ok(kb_core::position::append_position(max))
}

/// Audit record written in the same transaction as the mutation it describes.
pub(crate) fn insert_event_tx(
    tx: &Transaction<'_>,
    ts_ms: i64,
    entity: &str,
    entity_id: i64,
    event_type: &str,
    payload_json: &str,
) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO events(ts_ms, entity, entity_id, type, payload_json) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![ts_ms, entity, entity_id, event_type, payload_json],
    )?;
    Ok(())
}

/// An insert whose parent row is missing fails the foreign key check; surface
/// that as an unknown id rather than a raw SQL error.
pub(crate) fn map_missing_parent(err: rusqlite::Error) -> StoreError {
    if is_constraint_violation(&err) {
        return StoreError::UnknownId;
    }
    StoreError::Sql(err)
}

/// Link-table inserts can fail two ways: a missing endpoint (foreign key) or
/// a duplicate pair (primary key). `duplicate` names the latter for the caller.
pub(crate) fn map_link_conflict(err: rusqlite::Error, duplicate: &'static str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(_, Some(message)) = &err
        && message.contains("FOREIGN KEY constraint failed")
    {
        return StoreError::UnknownId;
    }
    if is_constraint_violation(&err) {
        return StoreError::InvalidInput(duplicate);
    }
    StoreError::Sql(err)
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                        || value.contains("FOREIGN KEY constraint failed")
                })
        }
        _ => false,
    }
}

pub(crate) fn ensure_title(title: &str) -> Result<&str, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidInput("title must not be empty"));
    }
    Ok(title)
}
