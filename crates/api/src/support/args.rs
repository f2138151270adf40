#![forbid(unsafe_code)]

use super::ai::ai_error;
use serde_json::{Map, Value};

pub(crate) fn require_i64(args: &Map<String, Value>, key: &str) -> Result<i64, Value> {
    let Some(value) = args.get(key) else {
        return Err(ai_error("INVALID_INPUT", &format!("{key} is required")));
    };
    value
        .as_i64()
        .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be an integer")))
}

pub(crate) fn optional_i64(args: &Map<String, Value>, key: &str) -> Result<Option<i64>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be an integer"))),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be an integer"),
        )),
    }
}

pub(crate) fn require_string(args: &Map<String, Value>, key: &str) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(ai_error("INVALID_INPUT", &format!("{key} is required")));
    };
    Ok(v.to_string())
}

pub(crate) fn optional_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(v) => Ok(Some(v.to_string())),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a string"),
        )),
    }
}

/// Absent means "leave untouched"; an explicit null clears the field.
pub(crate) fn optional_nullable_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    if !args.contains_key(key) {
        return Ok(None);
    }
    match args.get(key) {
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a string or null"),
        )),
        None => Ok(None),
    }
}

pub(crate) fn optional_nullable_i64(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Option<i64>>, Value> {
    if !args.contains_key(key) {
        return Ok(None);
    }
    match args.get(key) {
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Ok(Some(Some(v))),
            None => Err(ai_error(
                "INVALID_INPUT",
                &format!("{key} must be an integer or null"),
            )),
        },
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be an integer or null"),
        )),
        None => Ok(None),
    }
}

pub(crate) fn require_bool(args: &Map<String, Value>, key: &str) -> Result<bool, Value> {
    let Some(value) = args.get(key) else {
        return Err(ai_error("INVALID_INPUT", &format!("{key} is required")));
    };
    value
        .as_bool()
        .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be a boolean")))
}
