//! Authenticated API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call the typed helpers (`get`, `post`, ...) and receive either the
//! unwrapped envelope data or a [`ClassifiedError`]. The session is passed in
//! at construction so the client never reads storage on its own.
//!
//! [`ClassifiedError`]: super::error::ClassifiedError

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::config::ClientConfig;
use super::error::ApiError;
use super::middleware::{Outcome, Pipeline, UnauthorizedHook};
use super::transport::{FetchTransport, Transport};
use super::types::{ApiRequest, Method, Payload};
use crate::state::session::Session;

/// Client used by the app: browser fetch + standard pipeline.
pub type BrowserClient = ApiClient<FetchTransport>;

pub struct ApiClient<T> {
    transport: T,
    config: ClientConfig,
    session: Session,
    pipeline: Pipeline,
}

impl BrowserClient {
    /// Standard browser client; `on_unauthorized` runs after a `401`.
    pub fn browser(session: Session, on_unauthorized: Option<UnauthorizedHook>) -> Self {
        Self::new(FetchTransport, ClientConfig::default(), session, Pipeline::standard(on_unauthorized))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig, session: Session, pipeline: Pipeline) -> Self {
        Self { transport, config, session, pipeline }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run `request` through the pipeline.
    ///
    /// # Errors
    ///
    /// With the standard pipeline: [`ApiError::Classified`] for business, HTTP
    /// and network failures, [`ApiError::Setup`] when the request never left.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Payload, ApiError> {
        for (name, value) in &self.config.default_headers {
            if request.header(name).is_none() {
                request.set_header(name, value.clone());
            }
        }
        self.pipeline.prepare(&mut request, &self.session);

        let method = request.method;
        let path = request.path.clone();
        let outcome: Outcome = match self.transport.send(&self.config, request).await {
            Ok(response) if response.is_success() => Ok(Payload::Raw(response)),
            Ok(response) => Err(ApiError::Status(response)),
            Err(err) => Err(err.into()),
        };

        let outcome = self.pipeline.finish(outcome, &self.session);
        if let Err(err) = &outcome {
            leptos::logging::warn!("api: {} {path} failed: {err}", method.as_str());
        }
        outcome
    }

    /// `GET path`, decoding the payload into `R`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] when the payload
    /// does not match `R`.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::Get, path, None).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.request(Method::Post, path, Some(encode(body)?)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.request(Method::Put, path, Some(encode(body)?)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::Delete, path, None).await
    }

    async fn request<R: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<R, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        let payload = self.send(request).await?;
        Ok(serde_json::from_value(payload.into_value())?)
    }
}

/// Body serialization happens before anything is sent, so failures are setup errors.
fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Setup(e.to_string()))
}
