//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the pooled HTTP client used to reach the backend and the proxy
//! settings it was built from. Nothing in it is mutated after startup.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ProxyConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub proxy: Arc<ProxyConfig>,
}

impl AppState {
    /// Build state with a client honoring the proxy timeout.
    ///
    /// Redirects are not followed so the browser sees them as the backend sent them.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(proxy: ProxyConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(proxy.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(proxy, http))
    }

    pub fn with_client(proxy: ProxyConfig, http: reqwest::Client) -> Self {
        Self { http, proxy: Arc::new(proxy) }
    }
}
