#![forbid(unsafe_code)]

use kb_storage::StoreError;
use serde_json::{Value, json};

pub(crate) fn format_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Io(e) => format!("IO: {e}"),
        StoreError::Sql(e) => format!("SQL: {e}"),
        StoreError::InvalidInput(msg) => format!("Invalid input: {msg}"),
        StoreError::UnknownId => "Unknown id".to_string(),
    }
}

pub(crate) fn ai_ok(result: Value) -> Value {
    json!({
        "success": true,
        "result": result,
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    ai_error_with(code, message, None)
}

pub(crate) fn ai_error_with(code: &str, message: &str, recovery: Option<&str>) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert(
            "recovery".to_string(),
            Value::String(recovery.trim().to_string()),
        );
    }

    json!({
        "success": false,
        "result": null,
        "error": Value::Object(error_obj)
    })
}

/// Maps a store failure to the envelope the client reacts to. Anything that
/// reached the storage layer and still failed means the caller's picture of
/// the board may be stale, hence the refetch hint on the generic branch.
pub(crate) fn store_failure(operation: &str, err: StoreError) -> Value {
    match err {
        StoreError::UnknownId => ai_error("NOT_FOUND", &format!("{operation}: unknown id")),
        StoreError::InvalidInput(msg) => ai_error("INVALID_INPUT", msg),
        other => ai_error_with(
            "STORAGE_ERROR",
            &format!("{operation}: {}", format_store_error(&other)),
            Some("Discard local ordering and reload the board via boards.detail."),
        ),
    }
}
