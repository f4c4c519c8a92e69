//! Request/response values flowing through the API client pipeline.
//!
//! DESIGN
//! ======
//! Bodies are kept as `serde_json::Value` until the last step so middleware
//! can inspect the envelope shape without knowing the caller's payload type.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde_json::Value;

/// HTTP verbs the client issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Outbound request before it reaches the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, or an absolute URL.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Insert or replace a header, matching names case-insensitively.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name.to_owned(), value)),
        }
    }
}

/// Response as handed back by the transport, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl ApiResponse {
    /// Build a response from raw body text. JSON is parsed; anything else is
    /// kept as a string and an empty body becomes `null`.
    pub fn from_text(status: u16, headers: Vec<(String, String)>, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        };
        Self { status, headers, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Successful pipeline output.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// `data` unwrapped from a success envelope.
    Data(Value),
    /// Response that did not use the envelope, returned as-is.
    Raw(ApiResponse),
}

impl Payload {
    /// The JSON a caller should deserialize: envelope data or the raw body.
    pub fn into_value(self) -> Value {
        match self {
            Self::Data(value) => value,
            Self::Raw(response) => response.body,
        }
    }
}
