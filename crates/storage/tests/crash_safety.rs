#![forbid(unsafe_code)]

use kb_storage::{CreateBoardRequest, ListEventsRequest, SqliteStore};
use rusqlite::{Connection, params};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("kb_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn uncommitted_transaction_is_not_persisted_after_reopen() {
    let storage_dir = temp_dir("uncommitted_transaction_is_not_persisted_after_reopen");

    {
        let _store = SqliteStore::open(&storage_dir).expect("open store");
    }

    let db_path = storage_dir.join("kanban.db");
    {
        let mut conn = Connection::open(&db_path).expect("open db");
        let tx = conn.transaction().expect("begin tx");
        tx.execute(
            "INSERT INTO boards (title, background_color, created_at_ms) VALUES (?1, ?2, ?3)",
            params!["phantom", "#0079bf", 0i64],
        )
        .expect("insert board");
        // Drop without commit -> rollback (simulated crash before commit).
    }

    let store = SqliteStore::open(&storage_dir).expect("open store again");
    let boards = store.list_boards().expect("list boards");
    assert!(boards.is_empty(), "uncommitted board should not persist");
}

#[test]
fn mutations_append_audit_events_in_the_same_transaction() {
    let storage_dir = temp_dir("audit_events");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let board = store
        .create_board(CreateBoardRequest {
            title: "Audited".to_string(),
            background_color: None,
        })
        .expect("create board");

    let events = store
        .list_events(ListEventsRequest {
            since_seq: 0,
            limit: 10,
        })
        .expect("list events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "board.create");
    assert_eq!(events[0].entity.as_deref(), Some("board"));
    assert_eq!(events[0].entity_id, Some(board.id));

    let after = store
        .list_events(ListEventsRequest {
            since_seq: events[0].seq,
            limit: 10,
        })
        .expect("list events");
    assert!(after.is_empty());
}
