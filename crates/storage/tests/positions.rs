#![forbid(unsafe_code)]

use kb_core::position::{CardMove, OrderEntry};
use kb_storage::{
    CreateBoardRequest, CreateCardRequest, CreateChecklistRequest, CreateListRequest,
    ReorderListsRequest, SqliteStore,
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

fn new_board(store: &mut SqliteStore) -> i64 {
    store
        .create_board(CreateBoardRequest {
            title: "Roadmap".to_string(),
            background_color: None,
        })
        .expect("create board")
        .id
}

fn new_list(store: &mut SqliteStore, board_id: i64, title: &str) -> i64 {
    store
        .create_list(CreateListRequest {
            board_id,
            title: title.to_string(),
        })
        .expect("create list")
        .id
}

fn new_card(store: &mut SqliteStore, list_id: i64, title: &str) -> i64 {
    store
        .create_card(CreateCardRequest {
            list_id,
            title: title.to_string(),
        })
        .expect("create card")
        .id
}

fn active_positions(store: &SqliteStore, board_id: i64, list_id: i64) -> Vec<i64> {
    let detail = store.board_detail(board_id).expect("board detail");
    let list = detail
        .lists
        .into_iter()
        .find(|entry| entry.list.id == list_id)
        .expect("list in board");
    list.cards
        .into_iter()
        .map(|card| card.card.position)
        .collect()
}

#[test]
fn creations_append_at_the_end_of_their_scope() {
    let storage_dir = temp_dir("append_last");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let board_id = new_board(&mut store);

    let list = store
        .create_list(CreateListRequest {
            board_id,
            title: "Backlog".to_string(),
        })
        .expect("create list");
    assert_eq!(list.position, 0);
    let second = store
        .create_list(CreateListRequest {
            board_id,
            title: "Doing".to_string(),
        })
        .expect("create list");
    assert_eq!(second.position, 1);

    let first_card = store
        .create_card(CreateCardRequest {
            list_id: list.id,
            title: "one".to_string(),
        })
        .expect("create card");
    assert_eq!(first_card.position, 0);
    let second_card = store
        .create_card(CreateCardRequest {
            list_id: list.id,
            title: "two".to_string(),
        })
        .expect("create card");
    assert_eq!(second_card.position, 1);

    let checklist = store
        .create_checklist(CreateChecklistRequest {
            card_id: first_card.id,
            title: "Steps".to_string(),
        })
        .expect("create checklist");
    assert_eq!(checklist.checklist.position, 0);
    let second_checklist = store
        .create_checklist(CreateChecklistRequest {
            card_id: first_card.id,
            title: "More steps".to_string(),
        })
        .expect("create checklist");
    assert_eq!(second_checklist.checklist.position, 1);
}

#[test]
fn positions_stay_dense_across_mixed_mutations() {
    let storage_dir = temp_dir("density");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let board_id = new_board(&mut store);
    let first = new_list(&mut store, board_id, "Todo");
    let second = new_list(&mut store, board_id, "Doing");

    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d", "e"] {
        ids.push(new_card(&mut store, first, title));
    }
    for title in ["x", "y"] {
        new_card(&mut store, second, title);
    }

    // within-list shuffle, then two cross-list hops
    store
        .move_card(CardMove::classify(ids[1], first, first, 1, 4).expect("classify"))
        .expect("move within");
    store
        .move_card(CardMove::classify(ids[0], first, second, 0, 1).expect("classify"))
        .expect("move across");
    store
        .move_card(CardMove::classify(ids[4], first, second, 2, 0).expect("classify"))
        .expect("move across");

    // bulk list reorder on top
    store
        .reorder_lists(ReorderListsRequest {
            entries: vec![
                OrderEntry {
                    id: second,
                    position: 0,
                },
                OrderEntry {
                    id: first,
                    position: 1,
                },
            ],
        })
        .expect("reorder lists");

    assert_eq!(active_positions(&store, board_id, first), vec![0, 1, 2]);
    assert_eq!(active_positions(&store, board_id, second), vec![0, 1, 2, 3]);

    let detail = store.board_detail(board_id).expect("board detail");
    let list_positions: Vec<i64> = detail
        .lists
        .iter()
        .map(|entry| entry.list.position)
        .collect();
    assert_eq!(list_positions, vec![0, 1]);
    assert_eq!(detail.lists[0].list.id, second);
}

#[test]
fn archived_cards_keep_their_position_but_leave_the_ordering() {
    let storage_dir = temp_dir("archived");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let board_id = new_board(&mut store);
    let list_id = new_list(&mut store, board_id, "Todo");

    new_card(&mut store, list_id, "a");
    let b = new_card(&mut store, list_id, "b");
    new_card(&mut store, list_id, "c");

    let archived = store.set_card_archived(b, true).expect("archive card");
    assert!(archived.archived);
    assert_eq!(archived.position, 1);

    // the archived card is gone from the active view; its slot stays frozen
    assert_eq!(active_positions(&store, board_id, list_id), vec![0, 2]);

    // appends look at active cards only
    let next = store
        .create_card(CreateCardRequest {
            list_id,
            title: "d".to_string(),
        })
        .expect("create card");
    assert_eq!(next.position, 3);

    let restored = store.set_card_archived(b, false).expect("unarchive card");
    assert_eq!(restored.position, 1);
    assert_eq!(active_positions(&store, board_id, list_id), vec![0, 1, 2, 3]);
}
