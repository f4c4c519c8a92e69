//! Unified `{ code, message, data }` response envelope.
//!
//! A body is treated as an envelope only when it is a JSON object carrying
//! both `code` and `message` keys. Anything else passes through unchanged.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde_json::{Map, Value};

use super::error::{ApiError, ClassifiedError, DEFAULT_FAILURE_MESSAGE, ErrorCode};
use super::types::{ApiResponse, Payload};

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 200;

/// Whether `body` has the envelope shape.
pub fn is_envelope(body: &Value) -> bool {
    body.as_object().is_some_and(has_envelope_keys)
}

fn has_envelope_keys(object: &Map<String, Value>) -> bool {
    object.contains_key("code") && object.contains_key("message")
}

/// Unwrap a successful transport response.
///
/// # Errors
///
/// Returns a business [`ClassifiedError`] when the envelope code is not 200.
pub fn unwrap_response(response: ApiResponse) -> Result<Payload, ApiError> {
    let mut object = match response.body {
        Value::Object(object) if has_envelope_keys(&object) => object,
        body => return Ok(Payload::Raw(ApiResponse { body, ..response })),
    };

    let code = object.remove("code").unwrap_or(Value::Null);
    if is_success_code(&code) {
        let data = object.remove("data").unwrap_or(Value::Null);
        return Ok(Payload::Data(data));
    }

    let message = object
        .get("message")
        .and_then(message_text)
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_owned());
    Err(ClassifiedError::business(message, ErrorCode::from_json(&code)).into())
}

/// Strict numeric comparison: the string `"200"` is not success.
fn is_success_code(code: &Value) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let success = SUCCESS_CODE as f64;
    code.as_f64().is_some_and(|c| (c - success).abs() < f64::EPSILON)
}

/// Usable message text; empty, `null`, `false` and `0` yield `None`.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
        other => Some(other.to_string()),
    }
}
