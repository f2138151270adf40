#![forbid(unsafe_code)]

use super::event_json;
use crate::ApiServer;
use crate::support::ai::{ai_ok, store_failure};
use crate::support::args::optional_i64;
use kb_storage::ListEventsRequest;
use serde_json::{Map, Value};

const DEFAULT_LIMIT: usize = 100;

pub(crate) fn list(server: &mut ApiServer, args: &Map<String, Value>) -> Value {
    let since_seq = match optional_i64(args, "sinceSeq") {
        Ok(v) => v.unwrap_or(0),
        Err(resp) => return resp,
    };
    let limit = match optional_i64(args, "limit") {
        Ok(v) => v
            .filter(|limit| *limit > 0)
            .map(|limit| limit as usize)
            .unwrap_or(DEFAULT_LIMIT),
        Err(resp) => return resp,
    };

    match server.store.list_events(ListEventsRequest { since_seq, limit }) {
        Ok(events) => ai_ok(Value::Array(events.iter().map(event_json).collect())),
        Err(err) => store_failure("events.list", err),
    }
}
