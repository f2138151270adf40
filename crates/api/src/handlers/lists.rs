#![forbid(unsafe_code)]

use super::list_json;
use crate::ApiServer;
use crate::support::ai::{ai_error, ai_ok, store_failure};
use crate::support::args::{require_i64, require_string};
use kb_core::position::OrderEntry;
use kb_storage::{CreateListRequest, ReorderListsRequest};
use serde_json::{Map, Value, json};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let board_id = match require_i64(args, "boardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server
        .store
        .create_list(CreateListRequest { board_id, title })
    {
        Ok(list) => ai_ok(list_json(&list)),
        Err(err) => store_failure("lists.create", err),
    }
}

pub(crate) fn rename(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let list_id = match require_i64(args, "listId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.rename_list(list_id, &title) {
        Ok(list) => ai_ok(list_json(&list)),
        Err(err) => store_failure("lists.rename", err),
    }
}

pub(crate) fn delete(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let list_id = match require_i64(args, "listId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.delete_list(list_id) {
        Ok(()) => ai_ok(json!({"deleted": true})),
        Err(err) => store_failure("lists.delete", err),
    }
}

/// Whole-array replacement of a board's list ordering. The array shape is
/// checked element by element before anything reaches storage.
pub(crate) fn reorder(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let Some(value) = args.get("lists") else {
        return ai_error("INVALID_INPUT", "lists array is required");
    };
    let Some(raw) = value.as_array() else {
        return ai_error("INVALID_INPUT", "lists array is required");
    };
    if raw.is_empty() {
        return ai_error("INVALID_INPUT", "lists array must not be empty");
    }

    let mut entries = Vec::with_capacity(raw.len());
    for element in raw {
        let Some(pair) = element.as_object() else {
            return ai_error("INVALID_INPUT", "each list must be an object");
        };
        let Some(id) = pair.get("id").and_then(|v| v.as_i64()) else {
            return ai_error("INVALID_INPUT", "each list must have an id");
        };
        let Some(position) = pair.get("position").and_then(|v| v.as_i64()) else {
            return ai_error("INVALID_INPUT", "each list must have a position");
        };
        entries.push(OrderEntry { id, position });
    }

    match server.store.reorder_lists(ReorderListsRequest { entries }) {
        Ok(()) => ai_ok(json!({"reordered": true})),
        Err(err) => store_failure("lists.reorder", err),
    }
}
