//! `/api` reverse proxy to the backend.
//!
//! The browser bundle talks to same-origin `/api/...`; this handler forwards
//! those requests to the configured backend origin, optionally dropping the
//! `/api` prefix. The upstream `Host` comes from the target URL, not the
//! incoming request.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use crate::config::ProxyConfig;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api";
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Routes forwarding `/api` and everything below it.
pub fn router(state: AppState) -> Router {
    router_with_body_limit(state, MAX_BODY_BYTES)
}

/// Bodies over `limit` bytes are rejected with `413 Payload Too Large`
/// before anything is sent upstream.
fn router_with_body_limit(state: AppState, limit: usize) -> Router {
    Router::new()
        .route(API_PREFIX, any(forward))
        .route("/api/{*path}", any(forward))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Remove the leading `/api`, keeping the result rooted.
pub fn strip_api_prefix(path_and_query: &str) -> String {
    let rest = path_and_query.strip_prefix(API_PREFIX).unwrap_or(path_and_query);
    if rest.starts_with('/') {
        rest.to_owned()
    } else {
        format!("/{rest}")
    }
}

/// Backend URL for an incoming path + query.
pub fn upstream_url(config: &ProxyConfig, path_and_query: &str) -> String {
    if config.strip_prefix {
        format!("{}{}", config.target, strip_api_prefix(path_and_query))
    } else {
        format!("{}{path_and_query}", config.target)
    }
}

/// Hop-by-hop and framing headers are not forwarded in either direction.
fn is_forwardable(name: &HeaderName) -> bool {
    !matches!(
        name.as_str(),
        "host"
            | "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "content-length"
    )
}

fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| is_forwardable(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match forward_request(&state, method, &uri, &headers, body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "api proxy failed");
            err.into_response()
        }
    }
}

async fn forward_request(
    state: &AppState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    let url = upstream_url(&state.proxy, path_and_query);

    tracing::debug!(%method, %url, "proxying api request");
    let upstream = state
        .http
        .request(method, url.as_str())
        .headers(forwardable_headers(headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
