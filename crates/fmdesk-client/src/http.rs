//! Shared HTTP response helpers.
//!
//! Centralizes status checks (non-success -> [`ApiError::Http`] with a
//! message pulled from the body), tolerant JSON reading, and envelope
//! unwrapping so request methods stay focused on routes and payloads.

use serde_json::Value;

use crate::error::ApiError;

/// Body fields that may carry a human-readable error, in lookup order.
const MESSAGE_KEYS: &[&str] = &["message", "error", "detail"];

/// Envelope keys that may wrap a single record.
const RECORD_ENVELOPES: &[&str] = &["data", "task"];

/// Envelope keys that may wrap a list of records.
const LIST_ENVELOPES: &[&str] = &["data", "tasks", "items"];

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`ApiError::Http`] with the status code and the best message found in
/// the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
    })
}

/// Message from a JSON error body, or the trimmed raw text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|value| json_message(&value))
        .or_else(|| Some(trimmed.to_string()))
}

fn json_message(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    MESSAGE_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        nested @ Value::Object(_) => json_message(nested),
        _ => None,
    })
}

/// Read a response body as JSON. An empty body reads as `null`.
pub async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("invalid JSON body: {e}")))
}

/// Strip `{data: {...}}` and `{task: {...}}` wrappers from a single record,
/// however deeply nested.
pub fn unwrap_record(value: Value) -> Value {
    match value {
        Value::Object(mut object) => {
            let envelope = RECORD_ENVELOPES
                .iter()
                .find(|key| object.get(**key).is_some_and(Value::is_object));
            match envelope {
                Some(key) if !object.contains_key("id") && !object.contains_key("_id") => {
                    object.remove(*key).map_or(Value::Null, unwrap_record)
                }
                _ => Value::Object(object),
            }
        }
        other => other,
    }
}

/// Records from a list response: a bare array, or one wrapped as
/// `{data: [...]}`, `{tasks: [...]}`, or `{data: {tasks: [...]}}`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if no array can be found.
pub fn unwrap_list(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut object) => {
            for key in LIST_ENVELOPES {
                match object.remove(*key) {
                    Some(Value::Array(items)) => return Ok(items),
                    Some(nested @ Value::Object(_)) => return unwrap_list(nested),
                    Some(_) | None => {}
                }
            }
            Err(ApiError::Decode(
                "expected a list of tasks or a {data|tasks: [...]} envelope".to_string(),
            ))
        }
        other => Err(ApiError::Decode(format!(
            "expected a list of tasks, got {}",
            kind(&other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
