#![forbid(unsafe_code)]

use super::checklist_json;
use crate::ApiServer;
use crate::support::ai::{ai_ok, store_failure};
use crate::support::args::{require_bool, require_i64, require_string};
use kb_storage::{AddChecklistItemRequest, CreateChecklistRequest};
use serde_json::{Map, Value, json};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server
        .store
        .create_checklist(CreateChecklistRequest { card_id, title })
    {
        Ok(checklist) => ai_ok(checklist_json(&checklist)),
        Err(err) => store_failure("checklists.create", err),
    }
}

pub(crate) fn delete(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let checklist_id = match require_i64(args, "checklistId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.delete_checklist(checklist_id) {
        Ok(()) => ai_ok(json!({"deleted": true})),
        Err(err) => store_failure("checklists.delete", err),
    }
}

pub(crate) fn add_item(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let checklist_id = match require_i64(args, "checklistId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let text = match require_string(args, "text") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server
        .store
        .add_checklist_item(AddChecklistItemRequest { checklist_id, text })
    {
        Ok(checklist) => ai_ok(checklist_json(&checklist)),
        Err(err) => store_failure("checklists.add_item", err),
    }
}

pub(crate) fn set_item(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let item_id = match require_i64(args, "itemId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let completed = match require_bool(args, "completed") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.set_item_completed(item_id, completed) {
        Ok(item) => ai_ok(json!({
            "id": item.id,
            "checklistId": item.checklist_id,
            "text": item.text,
            "completed": item.completed,
            "position": item.position,
        })),
        Err(err) => store_failure("checklists.set_item", err),
    }
}

pub(crate) fn delete_item(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let item_id = match require_i64(args, "itemId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.delete_checklist_item(item_id) {
        Ok(()) => ai_ok(json!({"deleted": true})),
        Err(err) => store_failure("checklists.delete_item", err),
    }
}
