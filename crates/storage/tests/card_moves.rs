#![forbid(unsafe_code)]

use kb_core::position::CardMove;
use kb_storage::{CreateBoardRequest, CreateCardRequest, CreateListRequest, SqliteStore, StoreError};
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

/// Board with two lists; `titles` go into the first, `other_titles` into the
/// second. Returns (board, first list, second list).
fn seed(
    store: &mut SqliteStore,
    titles: &[&str],
    other_titles: &[&str],
) -> (i64, i64, i64) {
    let board = store
        .create_board(CreateBoardRequest {
            title: "Sprint".to_string(),
            background_color: None,
        })
        .expect("create board");
    let first = store
        .create_list(CreateListRequest {
            board_id: board.id,
            title: "Doing".to_string(),
        })
        .expect("create first list");
    let second = store
        .create_list(CreateListRequest {
            board_id: board.id,
            title: "Done".to_string(),
        })
        .expect("create second list");
    for title in titles {
        store
            .create_card(CreateCardRequest {
                list_id: first.id,
                title: (*title).to_string(),
            })
            .expect("create card");
    }
    for title in other_titles {
        store
            .create_card(CreateCardRequest {
                list_id: second.id,
                title: (*title).to_string(),
            })
            .expect("create card");
    }
    (board.id, first.id, second.id)
}

fn order(store: &SqliteStore, board_id: i64, list_id: i64) -> Vec<(String, i64)> {
    let detail = store.board_detail(board_id).expect("board detail");
    let list = detail
        .lists
        .into_iter()
        .find(|entry| entry.list.id == list_id)
        .expect("list in board");
    list.cards
        .into_iter()
        .map(|card| (card.card.title, card.card.position))
        .collect()
}

fn card_id_by_title(store: &SqliteStore, board_id: i64, title: &str) -> i64 {
    let detail = store.board_detail(board_id).expect("board detail");
    for list in detail.lists {
        for card in list.cards {
            if card.card.title == title {
                return card.card.id;
            }
        }
    }
    panic!("card {title} not found");
}

fn pairs(raw: &[(&str, i64)]) -> Vec<(String, i64)> {
    raw.iter()
        .map(|(title, position)| ((*title).to_string(), *position))
        .collect()
}

#[test]
fn moving_a_card_later_shifts_the_band_back() {
    let storage_dir = temp_dir("move_later");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, _) = seed(&mut store, &["a", "b", "c", "d"], &[]);

    let moving = card_id_by_title(&store, board_id, "b");
    let mv = CardMove::classify(moving, first, first, 1, 3).expect("classify");
    store.move_card(mv).expect("move card");

    assert_eq!(
        order(&store, board_id, first),
        pairs(&[("a", 0), ("c", 1), ("d", 2), ("b", 3)])
    );
}

#[test]
fn moving_a_card_earlier_shifts_the_band_forward() {
    let storage_dir = temp_dir("move_earlier");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, _) = seed(&mut store, &["a", "b", "c", "d"], &[]);

    let moving = card_id_by_title(&store, board_id, "d");
    let mv = CardMove::classify(moving, first, first, 3, 0).expect("classify");
    store.move_card(mv).expect("move card");

    assert_eq!(
        order(&store, board_id, first),
        pairs(&[("d", 0), ("a", 1), ("b", 2), ("c", 3)])
    );
}

#[test]
fn cross_list_move_closes_source_and_opens_destination() {
    let storage_dir = temp_dir("move_across");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, second) = seed(&mut store, &["a", "b", "c"], &["x", "y"]);

    let moving = card_id_by_title(&store, board_id, "b");
    let mv = CardMove::classify(moving, first, second, 1, 1).expect("classify");
    store.move_card(mv).expect("move card");

    assert_eq!(order(&store, board_id, first), pairs(&[("a", 0), ("c", 1)]));
    assert_eq!(
        order(&store, board_id, second),
        pairs(&[("x", 0), ("b", 1), ("y", 2)])
    );
}

#[test]
fn same_slot_move_is_a_no_op() {
    let storage_dir = temp_dir("move_noop");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, _) = seed(&mut store, &["a", "b", "c"], &[]);

    let moving = card_id_by_title(&store, board_id, "b");
    let mv = CardMove::classify(moving, first, first, 1, 1).expect("classify");
    assert!(matches!(mv, CardMove::Stay { .. }));
    store.move_card(mv).expect("move card");

    assert_eq!(
        order(&store, board_id, first),
        pairs(&[("a", 0), ("b", 1), ("c", 2)])
    );
}

#[test]
fn failed_cross_move_leaves_both_lists_untouched() {
    let storage_dir = temp_dir("move_rollback");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, second) = seed(&mut store, &["a", "b", "c"], &["x", "y"]);

    // The gap-close and slot-open steps would shift rows in both lists before
    // the final rewrite discovers the card id matches nothing.
    let mv = CardMove::classify(999_999, first, second, 1, 1).expect("classify");
    let err = store.move_card(mv).expect_err("expected unknown card");
    assert!(matches!(err, StoreError::UnknownId));

    assert_eq!(
        order(&store, board_id, first),
        pairs(&[("a", 0), ("b", 1), ("c", 2)])
    );
    assert_eq!(order(&store, board_id, second), pairs(&[("x", 0), ("y", 1)]));
}

#[test]
fn move_to_unknown_destination_list_rolls_back() {
    let storage_dir = temp_dir("move_bad_dest");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (board_id, first, second) = seed(&mut store, &["a", "b", "c"], &["x", "y"]);

    let moving = card_id_by_title(&store, board_id, "b");
    let mv = CardMove::classify(moving, first, 999_999, 1, 0).expect("classify");
    let err = store.move_card(mv).expect_err("expected unknown list");
    assert!(matches!(err, StoreError::UnknownId));

    assert_eq!(
        order(&store, board_id, first),
        pairs(&[("a", 0), ("b", 1), ("c", 2)])
    );
    assert_eq!(order(&store, board_id, second), pairs(&[("x", 0), ("y", 1)]));
}

#[test]
fn stay_move_still_reports_unknown_cards() {
    let storage_dir = temp_dir("stay_unknown");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (_, first, _) = seed(&mut store, &["a"], &[]);

    let mv = CardMove::classify(999_999, first, first, 0, 0).expect("classify");
    let err = store.move_card(mv).expect_err("expected unknown card");
    assert!(matches!(err, StoreError::UnknownId));
}
