//! Helpers for reading backend payloads.
//!
//! The backend is inconsistent about envelopes: some endpoints return the
//! entity directly, others wrap it as `{ "isSuccess": …, "message": …, "data": { … } }`.
//! These helpers look inside `data` first and fall back to the top level.

use booking_gateway_core::{GatewayError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The nested `data` object if present, else the value itself.
pub(crate) fn payload(value: &Value) -> &Value {
    match value.get("data") {
        Some(data) if data.is_object() => data,
        _ => value,
    }
}

/// First non-empty string found under any of `keys`, in `data` then at the top level.
pub(crate) fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    [payload(value), value].into_iter().find_map(|scope| {
        keys.iter().find_map(|key| match scope.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    })
}

/// The envelope's `message`, if any.
pub(crate) fn message(value: &Value) -> Option<String> {
    string_field(value, &["message", "Message"])
}

/// `Some(false)` when the envelope reports failure.
pub(crate) fn is_success(value: &Value) -> Option<bool> {
    value.get("isSuccess").and_then(Value::as_bool)
}

/// Turn an `isSuccess: false` envelope into `Rejected`.
pub(crate) fn ensure_success(value: Value, fallback: &str) -> Result<Value> {
    if is_success(&value) == Some(false) {
        return Err(GatewayError::Rejected {
            message: message(&value).unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(value)
}

/// Deserialize the payload (inside `data` when wrapped).
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    T::deserialize(payload(value)).map_err(|e| GatewayError::UnexpectedResponse {
        reason: format!("{what}: {e}"),
    })
}
