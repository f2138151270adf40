#![forbid(unsafe_code)]

use super::{board_detail_json, board_json};
use crate::ApiServer;
use crate::support::ai::{ai_ok, store_failure};
use crate::support::args::{optional_string, require_i64, require_string};
use kb_storage::CreateBoardRequest;
use serde_json::{Map, Value};

pub(crate) fn create(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let background_color = match optional_string(args, "backgroundColor") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.create_board(CreateBoardRequest {
        title,
        background_color,
    }) {
        Ok(board) => ai_ok(board_json(&board)),
        Err(err) => store_failure("boards.create", err),
    }
}

pub(crate) fn list(server: &mut ApiServer, _args: &Map<String, Value>) -> Value {
    match server.store.list_boards() {
        Ok(boards) => ai_ok(Value::Array(boards.iter().map(board_json).collect())),
        Err(err) => store_failure("boards.list", err),
    }
}

pub(crate) fn detail(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let board_id = match require_i64(args, "boardId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.board_detail(board_id) {
        Ok(detail) => ai_ok(board_detail_json(&detail)),
        Err(err) => store_failure("boards.detail", err),
    }
}
