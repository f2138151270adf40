#![forbid(unsafe_code)]

use kb_core::position::OrderEntry;
use kb_storage::{
    CreateBoardRequest, CreateListRequest, ReorderListsRequest, SqliteStore, StoreError,
};
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

fn seed(store: &mut SqliteStore, titles: &[&str]) -> (i64, Vec<i64>) {
    let board = store
        .create_board(CreateBoardRequest {
            title: "Release".to_string(),
            background_color: None,
        })
        .expect("create board");
    let mut ids = Vec::new();
    for title in titles {
        ids.push(
            store
                .create_list(CreateListRequest {
                    board_id: board.id,
                    title: (*title).to_string(),
                })
                .expect("create list")
                .id,
        );
    }
    (board.id, ids)
}

fn ordered_ids(store: &SqliteStore, board_id: i64) -> Vec<(i64, i64)> {
    let detail = store.board_detail(board_id).expect("board detail");
    detail
        .lists
        .into_iter()
        .map(|entry| (entry.list.id, entry.list.position))
        .collect()
}

#[test]
fn bulk_reorder_applies_the_submitted_permutation() {
    let storage_dir = temp_dir("bulk_apply");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, ids) = seed(&mut store, &["Todo", "Doing", "Done"]);

    store
        .reorder_lists(ReorderListsRequest {
            entries: vec![
                OrderEntry {
                    id: ids[2],
                    position: 0,
                },
                OrderEntry {
                    id: ids[0],
                    position: 1,
                },
                OrderEntry {
                    id: ids[1],
                    position: 2,
                },
            ],
        })
        .expect("reorder lists");

    assert_eq!(
        ordered_ids(&store, board_id),
        vec![(ids[2], 0), (ids[0], 1), (ids[1], 2)]
    );
}

#[test]
fn empty_reorder_payload_is_rejected_before_writing() {
    let storage_dir = temp_dir("bulk_empty");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, ids) = seed(&mut store, &["Todo", "Doing"]);

    let err = store
        .reorder_lists(ReorderListsRequest {
            entries: Vec::new(),
        })
        .expect_err("expected validation failure");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    assert_eq!(ordered_ids(&store, board_id), vec![(ids[0], 0), (ids[1], 1)]);
}

#[test]
fn unknown_list_id_rolls_back_the_whole_batch() {
    let storage_dir = temp_dir("bulk_rollback");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, ids) = seed(&mut store, &["Todo", "Doing", "Done"]);

    // the first two updates succeed before the unknown id aborts the batch
    let err = store
        .reorder_lists(ReorderListsRequest {
            entries: vec![
                OrderEntry {
                    id: ids[1],
                    position: 0,
                },
                OrderEntry {
                    id: ids[0],
                    position: 1,
                },
                OrderEntry {
                    id: 999_999,
                    position: 2,
                },
            ],
        })
        .expect_err("expected unknown id");
    assert!(matches!(err, StoreError::UnknownId));

    assert_eq!(
        ordered_ids(&store, board_id),
        vec![(ids[0], 0), (ids[1], 1), (ids[2], 2)]
    );
}
