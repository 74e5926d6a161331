//! Integration tests for the WorkPro client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p workpro-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `interceptor` - Authorization and content-type rules on the wire
//! - `errors` - Error taxonomy for HTTP, network and setup failures
//! - `session` - Session persistence and company scoping
//! - `workflows` - Multi-step flows (signup, companies, admin console)
//!
//! Each test starts a [`MockBackend`]: an axum app on an ephemeral local port
//! that records every request and answers from canned responses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use workpro_client::{ApiClient, ClientConfig, SessionContext};

/// A request as the backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body parsed as JSON, `Value::Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Body as lossy UTF-8, for multipart assertions.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone, Default)]
struct BackendState {
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    routes: Arc<Mutex<HashMap<(Method, String), (StatusCode, Value)>>>,
}

/// In-process backend that records requests.
pub struct MockBackend {
    addr: SocketAddr,
    state: BackendState,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the local listener cannot be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("failed to bind mock backend: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("mock backend has no address: {e}"));

        let state = BackendState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_owned()), (status, body));
    }

    /// Base URL clients should use.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The single request received; panics on any other count.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one request was received.
    #[must_use]
    pub fn only_request(&self) -> RecordedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.remove(0)
    }

    /// Client pointed at this backend with a fresh in-memory session.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client_with(SessionContext::in_memory())
    }

    /// Client pointed at this backend using `session`.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client_with(&self, session: SessionContext) -> ApiClient {
        let config = ClientConfig::with_base_url(&self.base_url())
            .unwrap_or_else(|e| panic!("bad mock base url: {e}"));
        ApiClient::new(&config, session).unwrap_or_else(|e| panic!("client setup failed: {e}"))
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn record(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    let canned = state
        .routes
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(method.clone(), path.clone()))
        .cloned();

    state
        .recorded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method,
            path,
            query: uri.query().map(str::to_owned),
            headers,
            body,
        });

    let (status, body) =
        canned.unwrap_or_else(|| (StatusCode::NOT_FOUND, json!({ "message": "Not found" })));
    (status, axum::Json(body)).into_response()
}

/// Base URL of a port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be reserved.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("failed to reserve a port: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("listener has no address: {e}"));
    drop(listener);
    format!("http://{addr}")
}

/// Profile JSON as the backend sends it.
#[must_use]
pub fn profile_json(id: &str, email: &str) -> Value {
    json!({
        "_id": id,
        "name": "Jane Doe",
        "email": email,
    })
}

/// Directory under the system temp dir unique to one test.
#[must_use]
pub fn temp_session_path() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("workpro-it-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}
