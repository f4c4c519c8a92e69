//! Error taxonomy for the API client.
//!
//! DESIGN
//! ======
//! Business failures (envelope `code != 200`), HTTP status failures and
//! network failures all collapse into [`ClassifiedError`], which serializes
//! as `{ "message": ..., "code": ... }`. Requests that never left the client
//! are passed through as [`ApiError::Setup`] untouched.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::types::ApiResponse;

/// Code attached to failures where no response arrived.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, no response from server";
/// Fallback when a business envelope carries no usable message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// User-facing message for a failed HTTP status.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request parameters".to_owned(),
        401 => "Unauthorized, please log in again".to_owned(),
        403 => "Access forbidden".to_owned(),
        404 => "Requested resource not found".to_owned(),
        500 => "Internal server error".to_owned(),
        other => format!("Request failed ({other})"),
    }
}

/// Numeric status/business code, or a symbolic one such as [`NETWORK_ERROR_CODE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl ErrorCode {
    /// Convert an envelope `code` field, preserving numbers as numbers.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Which failure class produced a [`ClassifiedError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Business,
    Http,
    Network,
}

/// Uniform error surfaced to callers.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub message: String,
    pub code: ErrorCode,
    #[serde(skip)]
    pub kind: ErrorKind,
    /// Failed response for HTTP status errors.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

impl ClassifiedError {
    pub fn business(message: impl Into<String>, code: ErrorCode) -> Self {
        Self { message: message.into(), code, kind: ErrorKind::Business, response: None }
    }

    pub fn http(response: ApiResponse) -> Self {
        Self {
            message: status_message(response.status),
            code: ErrorCode::Number(i64::from(response.status)),
            kind: ErrorKind::Http,
            response: Some(response),
        }
    }

    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_owned(),
            code: ErrorCode::Text(NETWORK_ERROR_CODE.to_owned()),
            kind: ErrorKind::Network,
            response: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Http && self.code == ErrorCode::Number(401)
    }
}

/// Everything a request through the client can fail with.
///
/// `Status` and `NoResponse` are raw transport outcomes; the standard
/// pipeline rewrites them into `Classified` before callers see them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Classified(#[from] ClassifiedError),
    #[error("unexpected status {}", .0.status)]
    Status(ApiResponse),
    #[error("no response received: {0}")]
    NoResponse(String),
    #[error("request setup failed: {0}")]
    Setup(String),
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(err) => Some(err),
            _ => None,
        }
    }
}
