use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::executor::block_on;
use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::net::error::{ClassifiedError, ErrorCode, NETWORK_ERROR_MESSAGE};
use crate::net::transport::TransportError;
use crate::net::types::ApiResponse;

/// Replays canned transport results and records every request it sees.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn replying(reply: Result<ApiResponse, TransportError>) -> Self {
        let transport = Self::default();
        transport.replies.lock().unwrap().push_back(reply);
        transport
    }

    fn json(status: u16, body: Value) -> Self {
        Self::replying(Ok(ApiResponse { status, headers: Vec::new(), body }))
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, _config: &ClientConfig, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Setup("no scripted reply".to_owned())))
    }
}

fn client(transport: ScriptedTransport, session: Session) -> ApiClient<ScriptedTransport> {
    ApiClient::new(transport, ClientConfig::with_base_url("/api"), session, Pipeline::standard(None))
}

fn classified(err: ApiError) -> ClassifiedError {
    match err {
        ApiError::Classified(err) => err,
        other => panic!("expected classified error, got {other:?}"),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Agent {
    id: u32,
    name: String,
}

#[test]
fn success_envelope_returns_exactly_data() {
    let api = client(
        ScriptedTransport::json(200, json!({ "code": 200, "message": "ok", "data": { "id": 1, "name": "scout" } })),
        Session::in_memory(),
    );
    let agent: Agent = block_on(api.get("/agents/1")).unwrap();
    assert_eq!(agent, Agent { id: 1, name: "scout".to_owned() });
}

#[test]
fn business_envelope_rejects_with_message_and_code() {
    let api = client(ScriptedTransport::json(200, json!({ "code": 400, "message": "bad" })), Session::in_memory());
    let err = classified(block_on(api.get::<Value>("/agents")).unwrap_err());
    assert_eq!(serde_json::to_value(&err).unwrap(), json!({ "message": "bad", "code": 400 }));
}

#[test]
fn non_envelope_body_is_returned_raw() {
    let api = client(ScriptedTransport::json(200, json!([{ "id": 2, "name": "raw" }])), Session::in_memory());
    let payload = block_on(api.send(ApiRequest::new(Method::Get, "/agents"))).unwrap();
    match payload {
        Payload::Raw(response) => assert_eq!(response.body, json!([{ "id": 2, "name": "raw" }])),
        Payload::Data(_) => panic!("expected raw payload"),
    }
}

#[test]
fn status_401_clears_session_and_rejects() {
    let session = Session::in_memory();
    session.login("tok", Some(r#"{"name":"a"}"#));
    let redirected = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&redirected);
    let api = ApiClient::new(
        ScriptedTransport::json(401, json!({ "error": "expired" })),
        ClientConfig::with_base_url("/api"),
        session.clone(),
        Pipeline::standard(Some(Arc::new(move || flag.store(true, Ordering::SeqCst)))),
    );

    let err = classified(block_on(api.get::<Value>("/me")).unwrap_err());
    assert_eq!(err.code, ErrorCode::Number(401));
    assert_eq!(err.message, "Unauthorized, please log in again");
    assert!(session.token().is_none());
    assert!(session.user_info().is_none());
    assert!(redirected.load(Ordering::SeqCst));
}

#[test]
fn other_status_maps_through_table() {
    let api = client(ScriptedTransport::json(503, json!("unavailable")), Session::in_memory());
    let err = classified(block_on(api.get::<Value>("/x")).unwrap_err());
    assert_eq!(err.message, "Request failed (503)");
    assert_eq!(err.response.map(|r| r.body), Some(json!("unavailable")));
}

#[test]
fn no_response_rejects_with_network_error() {
    let api = client(
        ScriptedTransport::replying(Err(TransportError::NoResponse("dns lookup failed".to_owned()))),
        Session::in_memory(),
    );
    let err = classified(block_on(api.get::<Value>("/x")).unwrap_err());
    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    assert!(err.code.as_number().is_none());
}

#[test]
fn setup_error_propagates_unchanged() {
    let api = client(
        ScriptedTransport::replying(Err(TransportError::Setup("invalid header value".to_owned()))),
        Session::in_memory(),
    );
    match block_on(api.get::<Value>("/x")).unwrap_err() {
        ApiError::Setup(detail) => assert_eq!(detail, "invalid header value"),
        other => panic!("expected setup error, got {other:?}"),
    }
}

#[test]
fn outbound_request_carries_default_headers_and_bearer_token() {
    let session = Session::in_memory();
    session.login("tok-9", None);
    let api = client(ScriptedTransport::json(200, json!({ "code": 200, "message": "ok", "data": null })), session);

    let _: Value = block_on(api.post("/chat", &json!({ "text": "hi" }))).unwrap();

    let seen = api.transport.seen.lock().unwrap();
    let request = &seen[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/chat");
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("Authorization"), Some("Bearer tok-9"));
    assert_eq!(request.body, Some(json!({ "text": "hi" })));
}

#[test]
fn anonymous_request_has_no_authorization_header() {
    let api = client(ScriptedTransport::json(204, Value::Null), Session::in_memory());
    let _: Value = block_on(api.delete("/agents/3")).unwrap();
    let seen = api.transport.seen.lock().unwrap();
    assert!(seen[0].header("Authorization").is_none());
}

#[test]
fn caller_content_type_is_not_overridden() {
    let api = client(ScriptedTransport::json(200, Value::Null), Session::in_memory());
    let mut request = ApiRequest::new(Method::Put, "/upload");
    request.set_header("content-type", "text/plain");
    let _ = block_on(api.send(request)).unwrap();
    let seen = api.transport.seen.lock().unwrap();
    assert_eq!(seen[0].header("Content-Type"), Some("text/plain"));
    assert_eq!(seen[0].headers.len(), 1);
}

#[test]
fn payload_shape_mismatch_is_decode_error() {
    let api = client(
        ScriptedTransport::json(200, json!({ "code": 200, "message": "ok", "data": "not an agent" })),
        Session::in_memory(),
    );
    assert!(matches!(block_on(api.get::<Agent>("/agents/1")), Err(ApiError::Decode(_))));
}

#[test]
fn empty_pipeline_leaves_status_unclassified() {
    let api = ApiClient::new(
        ScriptedTransport::json(404, Value::Null),
        ClientConfig::with_base_url("/api"),
        Session::in_memory(),
        Pipeline::empty(),
    );
    assert!(matches!(block_on(api.send(ApiRequest::new(Method::Get, "/x"))), Err(ApiError::Status(_))));
}

#[test]
fn fetch_transport_is_unavailable_off_browser() {
    let api = BrowserClient::browser(Session::in_memory(), None);
    assert!(matches!(block_on(api.get::<Value>("/x")), Err(ApiError::Setup(_))));
    assert!(api.config().with_credentials);
    assert!(!api.session().is_authenticated());
}
