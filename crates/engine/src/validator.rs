//! Response validator — turns an untrusted API payload into homework records.
//!
//! Checks, in order:
//! 1. The payload is not empty
//! 2. The payload is a JSON object
//! 3. `homeworks` and `current_date` are both present
//! 4. `homeworks` is an array
//!
//! Items are handed back untouched; only the record that is actually
//! translated gets shape-checked, via `parse_record`.

use serde_json::Value;

use reviewbot_common::error::{BotError, Result};
use reviewbot_common::types::HomeworkRecord;

/// Keys the homework API promises in every response.
const REQUIRED_KEYS: [&str; 2] = ["homeworks", "current_date"];

/// Validate a raw API response and return its `homeworks` items.
///
/// Items are returned unchanged in the order the API sent them; the first one
/// is the most recent submission.
pub fn validate(raw: Value) -> Result<Vec<Value>> {
    if is_empty(&raw) {
        return Err(BotError::EmptyResponse);
    }

    let mut response = match raw {
        Value::Object(map) => map,
        other => {
            return Err(BotError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            )));
        }
    };

    for key in REQUIRED_KEYS {
        if !response.contains_key(key) {
            return Err(BotError::MissingField(key.to_string()));
        }
    }

    let homeworks = match response.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(BotError::MalformedResponse(format!(
                "homeworks must be an array, got {}",
                json_type(&other)
            )));
        }
        None => return Err(BotError::MissingField("homeworks".to_string())),
    };

    tracing::debug!(count = homeworks.len(), "Validated API response");
    Ok(homeworks)
}

/// Read one `homeworks` item as a record.
///
/// Absent fields are left for the translator to report; a non-object item or
/// a field of the wrong JSON type is `MalformedResponse`.
pub fn parse_record(item: Value) -> Result<HomeworkRecord> {
    serde_json::from_value(item)
        .map_err(|e| BotError::MalformedResponse(format!("homework is not a record: {}", e)))
}

/// Mirrors the API contract's notion of "no payload".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
