//! API client configuration.
//!
//! The base URL is baked in at compile time from `APP_API_URL`, the same way
//! the bundle picks up other build-time settings. The default `/api` prefix is
//! what the host server proxies to the backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Ceiling for a single request; exceeding it counts as "no response".
    pub timeout: Duration,
    /// Headers added to every request unless already present.
    pub default_headers: Vec<(String, String)>,
    /// Send cookies and auth on cross-origin requests.
    pub with_credentials: bool,
}

impl ClientConfig {
    /// Config for `base_url` with the standard timeout and JSON headers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            default_headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            with_credentials: true,
        }
    }

    /// Config using the compile-time `APP_API_URL`, falling back to `/api`.
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("APP_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Resolve a request path against the base URL. Absolute URLs are used as-is.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return format!("{}/", self.base_url);
        }
        format!("{}/{path}", self.base_url)
    }

    /// Timeout in whole milliseconds, saturating at `u32::MAX`.
    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
