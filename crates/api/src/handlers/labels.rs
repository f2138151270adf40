#![forbid(unsafe_code)]

use super::{card_detail_json, label_json};
use crate::ApiServer;
use crate::support::ai::{ai_ok, store_failure};
use crate::support::args::{require_i64, require_string};
use kb_storage::CreateLabelRequest;
use serde_json::{Map, Value};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let board_id = match require_i64(args, "boardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let name = match require_string(args, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let color = match require_string(args, "color") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.create_label(CreateLabelRequest {
        board_id,
        name,
        color,
    }) {
        Ok(label) => ai_ok(label_json(&label)),
        Err(err) => store_failure("labels.create", err),
    }
}

pub(crate) fn list(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let board_id = match require_i64(args, "boardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.list_labels(board_id) {
        Ok(labels) => ai_ok(Value::Array(labels.iter().map(label_json).collect())),
        Err(err) => store_failure("labels.list", err),
    }
}

pub(crate) fn attach(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let label_id = match require_i64(args, "labelId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.attach_label(card_id, label_id) {
        Ok(card) => ai_ok(card_detail_json(&card)),
        Err(err) => store_failure("labels.attach", err),
    }
}

pub(crate) fn detach(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let label_id = match require_i64(args, "labelId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.detach_label(card_id, label_id) {
        Ok(card) => ai_ok(card_detail_json(&card)),
        Err(err) => store_failure("labels.detach", err),
    }
}
