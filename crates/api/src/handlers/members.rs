#![forbid(unsafe_code)]

use super::{card_detail_json, member_json};
use crate::ApiServer;
use crate::support::ai::{ai_ok, store_failure};
use crate::support::args::{require_i64, require_string};
use kb_storage::CreateMemberRequest;
use serde_json::{Map, Value};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let name = match require_string(args, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let initials = match require_string(args, "initials") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let avatar_color = match require_string(args, "avatarColor") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.create_member(CreateMemberRequest {
        name,
        initials,
        avatar_color,
    }) {
        Ok(member) => ai_ok(member_json(&member)),
        Err(err) => store_failure("members.create", err),
    }
}

pub(crate) fn list(server: &mut ApiServer, _args: &Map<String, Value>) -> Value {
    match server.store.list_members() {
        Ok(members) => ai_ok(Value::Array(members.iter().map(member_json).collect())),
        Err(err) => store_failure("members.list", err),
    }
}

pub(crate) fn assign(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let member_id = match require_i64(args, "memberId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.assign_member(card_id, member_id) {
        Ok(card) => ai_ok(card_detail_json(&card)),
        Err(err) => store_failure("members.assign", err),
    }
}

pub(crate) fn unassign(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let card_id = match require_i64(args, "cardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let member_id = match require_i64(args, "memberId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.unassign_member(card_id, member_id) {
        Ok(card) => ai_ok(card_detail_json(&card)),
        Err(err) => store_failure("members.unassign", err),
    }
}
