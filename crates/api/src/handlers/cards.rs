#![forbid(unsafe_code)]

use super::{card_json, search_hit_json};
use crate::ApiServer;
use crate::support::ai::{ai_error, ai_ok, store_failure};
use crate::support::args::{
    optional_i64, optional_nullable_i64, optional_nullable_string, optional_string, require_bool,
    require_i64, require_string,
};
use kb_core::position::{CardMove, MoveError};
use kb_storage::{CreateCardRequest, SearchCardsRequest, UpdateCardRequest};
use serde_json::{Map, Value, json};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let list_id = match require_i64(args, "listId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.create_card(CreateCardRequest { list_id, title }) {
        Ok(card) => ai_ok(card_json(&card)),
        Err(err) => store_failure("cards.create", err),
    }
}

pub(crate) fn update(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match optional_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let description = match optional_nullable_string(args, "description") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let due_date_ms = match optional_nullable_i64(args, "dueDateMs") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.update_card(UpdateCardRequest {
        card_id,
        title,
        description,
        due_date_ms,
    }) {
        Ok(card) => ai_ok(card_json(&card)),
        Err(err) => store_failure("cards.update", err),
    }
}

/// The one entry point for drags. Same-list and cross-list moves are told
/// apart here, before any shift logic runs.
pub(crate) fn move_card(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let source_list_id = match require_i64(args, "sourceListId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let dest_list_id = match require_i64(args, "destListId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let source_position = match require_i64(args, "sourcePosition") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let dest_position = match require_i64(args, "destPosition") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let mv = match CardMove::classify(
        card_id,
        source_list_id,
        dest_list_id,
        source_position,
        dest_position,
    ) {
        Ok(mv) => mv,
        Err(MoveError::NonPositiveId) => {
            return ai_error("INVALID_INPUT", "ids must be positive integers");
        }
        Err(MoveError::NegativePosition) => {
            return ai_error("INVALID_INPUT", "positions must not be negative");
        }
    };

    match server.store.move_card(mv) {
        Ok(()) => ai_ok(json!({"moved": true})),
        Err(err) => store_failure("cards.move", err),
    }
}

pub(crate) fn archive(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let archived = match require_bool(args, "archived") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.set_card_archived(card_id, archived) {
        Ok(card) => ai_ok(card_json(&card)),
        Err(err) => store_failure("cards.archive", err),
    }
}

pub(crate) fn delete(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.delete_card(card_id) {
        Ok(()) => ai_ok(json!({"deleted": true})),
        Err(err) => store_failure("cards.delete", err),
    }
}

pub(crate) fn search(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let text = match require_string(args, "q") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let board_id = match optional_i64(args, "boardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.search_cards(SearchCardsRequest { text, board_id }) {
        Ok(hits) => ai_ok(Value::Array(hits.iter().map(search_hit_json).collect())),
        Err(err) => store_failure("cards.search", err),
    }
}
