#![forbid(unsafe_code)]

pub(crate) mod boards;
pub(crate) mod cards;
pub(crate) mod checklists;
pub(crate) mod events;
pub(crate) mod labels;
pub(crate) mod lists;
pub(crate) mod members;

use kb_storage::{
    BoardDetail, BoardRow, CardDetail, CardRow, CardSearchHit, ChecklistDetail, EventRow, LabelRow,
    ListRow, MemberRow,
};
use serde_json::{Map, Value, json};

fn board_fields(board: &BoardRow) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("id".to_string(), json!(board.id));
    out.insert("title".to_string(), json!(board.title));
    out.insert(
        "backgroundColor".to_string(),
        json!(board.background_color),
    );
    out.insert("createdAtMs".to_string(), json!(board.created_at_ms));
    out
}

fn list_fields(list: &ListRow) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("id".to_string(), json!(list.id));
    out.insert("boardId".to_string(), json!(list.board_id));
    out.insert("title".to_string(), json!(list.title));
    out.insert("position".to_string(), json!(list.position));
    out.insert("createdAtMs".to_string(), json!(list.created_at_ms));
    out
}

fn card_fields(card: &CardRow) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("id".to_string(), json!(card.id));
    out.insert("listId".to_string(), json!(card.list_id));
    out.insert("title".to_string(), json!(card.title));
    out.insert("description".to_string(), json!(card.description));
    out.insert("dueDateMs".to_string(), json!(card.due_date_ms));
    out.insert("position".to_string(), json!(card.position));
    out.insert("archived".to_string(), json!(card.archived));
    out.insert("createdAtMs".to_string(), json!(card.created_at_ms));
    out.insert("updatedAtMs".to_string(), json!(card.updated_at_ms));
    out
}

pub(crate) fn board_json(board: &BoardRow) -> Value {
    Value::Object(board_fields(board))
}

pub(crate) fn list_json(list: &ListRow) -> Value {
    Value::Object(list_fields(list))
}

pub(crate) fn card_json(card: &CardRow) -> Value {
    Value::Object(card_fields(card))
}

pub(crate) fn label_json(label: &LabelRow) -> Value {
    json!({
        "id": label.id,
        "boardId": label.board_id,
        "name": label.name,
        "color": label.color,
    })
}

pub(crate) fn member_json(member: &MemberRow) -> Value {
    json!({
        "id": member.id,
        "name": member.name,
        "initials": member.initials,
        "avatarColor": member.avatar_color,
    })
}

pub(crate) fn checklist_json(detail: &ChecklistDetail) -> Value {
    json!({
        "id": detail.checklist.id,
        "cardId": detail.checklist.card_id,
        "title": detail.checklist.title,
        "position": detail.checklist.position,
        "items": detail
            .items
            .iter()
            .map(|item| json!({
                "id": item.id,
                "checklistId": item.checklist_id,
                "text": item.text,
                "completed": item.completed,
                "position": item.position,
            }))
            .collect::<Vec<_>>(),
    })
}

pub(crate) fn card_detail_json(detail: &CardDetail) -> Value {
    let mut out = card_fields(&detail.card);
    out.insert(
        "labels".to_string(),
        Value::Array(detail.labels.iter().map(label_json).collect()),
    );
    out.insert(
        "members".to_string(),
        Value::Array(detail.members.iter().map(member_json).collect()),
    );
    out.insert(
        "checklists".to_string(),
        Value::Array(detail.checklists.iter().map(checklist_json).collect()),
    );
    Value::Object(out)
}

pub(crate) fn board_detail_json(detail: &BoardDetail) -> Value {
    let mut out = board_fields(&detail.board);
    out.insert(
        "lists".to_string(),
        Value::Array(
            detail
                .lists
                .iter()
                .map(|list| {
                    let mut fields = list_fields(&list.list);
                    fields.insert(
                        "cards".to_string(),
                        Value::Array(list.cards.iter().map(card_detail_json).collect()),
                    );
                    Value::Object(fields)
                })
                .collect(),
        ),
    );
    out.insert(
        "labels".to_string(),
        Value::Array(detail.labels.iter().map(label_json).collect()),
    );
    Value::Object(out)
}

pub(crate) fn search_hit_json(hit: &CardSearchHit) -> Value {
    let mut out = card_fields(&hit.card);
    out.insert("list".to_string(), list_json(&hit.list));
    out.insert(
        "labels".to_string(),
        Value::Array(hit.labels.iter().map(label_json).collect()),
    );
    out.insert(
        "members".to_string(),
        Value::Array(hit.members.iter().map(member_json).collect()),
    );
    Value::Object(out)
}

pub(crate) fn event_json(event: &EventRow) -> Value {
    let payload: Value = serde_json::from_str(&event.payload_json).unwrap_or(Value::Null);
    json!({
        "seq": event.seq,
        "ts": crate::support::time::ts_ms_to_rfc3339(event.ts_ms),
        "tsMs": event.ts_ms,
        "entity": event.entity,
        "entityId": event.entity_id,
        "type": event.event_type,
        "payload": payload,
    })
}
