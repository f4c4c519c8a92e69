//! Ordered request/response middleware for the API client.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient::send` runs every [`RequestMiddleware`] in order, hands the
//! request to the transport, turns the transport result into an [`Outcome`],
//! then folds that outcome through every [`ResponseMiddleware`] in order.
//!
//! The standard pipeline is:
//!
//! ```text
//! request:  BearerAuth
//! response: UnwrapEnvelope -> ClassifyFailures
//! ```

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

use std::sync::Arc;

use super::envelope;
use super::error::{ApiError, ClassifiedError};
use super::types::{ApiRequest, Payload};
use crate::state::session::Session;

/// Result threaded through the response middleware.
pub type Outcome = Result<Payload, ApiError>;

/// Callback run after a `401` has cleared the session.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

pub trait RequestMiddleware: Send + Sync {
    fn on_request(&self, request: &mut ApiRequest, session: &Session);
}

pub trait ResponseMiddleware: Send + Sync {
    fn on_response(&self, outcome: Outcome, session: &Session) -> Outcome;
}

/// Attach `Authorization: Bearer <token>` when the session has a token.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerAuth;

impl RequestMiddleware for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest, session: &Session) {
        if let Some(token) = session.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }
}

/// Unwrap `{ code, message, data }` envelopes on successful responses.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnwrapEnvelope;

impl ResponseMiddleware for UnwrapEnvelope {
    fn on_response(&self, outcome: Outcome, _session: &Session) -> Outcome {
        match outcome {
            Ok(Payload::Raw(response)) => envelope::unwrap_response(response),
            other => other,
        }
    }
}

/// Map raw status and network failures onto [`ClassifiedError`].
///
/// A `401` also clears the session and fires the unauthorized hook.
/// Setup errors are left untouched.
#[derive(Clone, Default)]
pub struct ClassifyFailures {
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ClassifyFailures {
    pub fn new(on_unauthorized: Option<UnauthorizedHook>) -> Self {
        Self { on_unauthorized }
    }
}

impl ResponseMiddleware for ClassifyFailures {
    fn on_response(&self, outcome: Outcome, session: &Session) -> Outcome {
        match outcome {
            Err(ApiError::Status(response)) => {
                let err = ClassifiedError::http(response);
                if err.is_unauthorized() {
                    leptos::logging::warn!("api: 401 received, clearing session");
                    session.clear();
                    if let Some(hook) = &self.on_unauthorized {
                        hook();
                    }
                }
                Err(err.into())
            }
            Err(ApiError::NoResponse(detail)) => {
                leptos::logging::warn!("api: no response ({detail})");
                Err(ClassifiedError::network().into())
            }
            other => other,
        }
    }
}

/// Ordered middleware lists applied around the transport call.
#[derive(Clone, Default)]
pub struct Pipeline {
    pub(crate) request: Vec<Arc<dyn RequestMiddleware>>,
    pub(crate) response: Vec<Arc<dyn ResponseMiddleware>>,
}

impl Pipeline {
    /// No middleware at all: transport results surface unclassified.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bearer auth, envelope unwrapping and failure classification.
    pub fn standard(on_unauthorized: Option<UnauthorizedHook>) -> Self {
        Self::empty()
            .with_request(BearerAuth)
            .with_response(UnwrapEnvelope)
            .with_response(ClassifyFailures::new(on_unauthorized))
    }

    #[must_use]
    pub fn with_request(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Arc::new(middleware));
        self
    }

    #[must_use]
    pub fn with_response(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Arc::new(middleware));
        self
    }

    pub(crate) fn prepare(&self, request: &mut ApiRequest, session: &Session) {
        for middleware in &self.request {
            middleware.on_request(request, session);
        }
    }

    pub(crate) fn finish(&self, outcome: Outcome, session: &Session) -> Outcome {
        self.response
            .iter()
            .fold(outcome, |outcome, middleware| middleware.on_response(outcome, session))
    }
}
