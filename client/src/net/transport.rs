//! Network seam for the API client.
//!
//! Client-side (hydrate): browser `fetch` via `gloo-net`, with the request
//! timeout enforced by racing a `gloo-timers` future and aborting the fetch.
//! Server-side (SSR): requests fail as setup errors since the session token
//! only exists in the browser.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::config::ClientConfig;
use super::error::ApiError;
use super::types::{ApiRequest, ApiResponse};

/// Failure before any HTTP status was observed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request went out but nothing came back (DNS, refused, timeout).
    #[error("no response received: {0}")]
    NoResponse(String),
    /// The request could not be built or dispatched.
    #[error("{0}")]
    Setup(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(detail) => Self::NoResponse(detail),
            TransportError::Setup(detail) => Self::Setup(detail),
        }
    }
}

/// Sends a fully prepared request and returns whatever status came back.
///
/// Non-2xx statuses are not errors at this layer.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, config: &ClientConfig, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Browser fetch transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, config: &ClientConfig, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            fetch(config, request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, request);
            Err(TransportError::Setup("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
fn http_method(method: super::types::Method) -> gloo_net::http::Method {
    use super::types::Method;
    use gloo_net::http::Method as HttpMethod;

    match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(config: &ClientConfig, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    use futures::future::{Either, select};
    use gloo_net::http::RequestBuilder;
    use gloo_timers::future::TimeoutFuture;

    let controller =
        web_sys::AbortController::new().map_err(|e| TransportError::Setup(format!("abort controller: {e:?}")))?;
    let signal = controller.signal();

    let mut builder = RequestBuilder::new(&config.url_for(&request.path))
        .method(http_method(request.method))
        .abort_signal(Some(&signal));
    if config.with_credentials {
        builder = builder.credentials(web_sys::RequestCredentials::Include);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let outgoing = match &request.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::Setup(e.to_string()))?;

    let timeout_ms = config.timeout_millis();
    let response = match select(Box::pin(outgoing.send()), Box::pin(TimeoutFuture::new(timeout_ms))).await {
        Either::Left((result, _)) => result.map_err(|e| TransportError::NoResponse(e.to_string()))?,
        Either::Right(((), _)) => {
            controller.abort();
            return Err(TransportError::NoResponse(format!("timeout of {timeout_ms}ms exceeded")));
        }
    };

    let status = response.status();
    let headers = response.headers().entries().collect();
    let text = response
        .text()
        .await
        .map_err(|e| TransportError::NoResponse(e.to_string()))?;
    Ok(ApiResponse::from_text(status, headers, &text))
}
