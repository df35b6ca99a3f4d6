//! Mock Deepgram backend for integration tests
//!
//! Records every `/v1/listen` request (query parameters, content type,
//! body) and answers with a canned prerecorded response.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// One captured vendor call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Query parameters as sent (`model`, feature flags, ...)
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    /// The `url` field when the body was a JSON URL source
    pub url_source: Option<String>,
    /// Raw body length for upload sources
    pub body_len: usize,
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    response: serde_json::Value,
    /// When set, every request fails with this status
    fail_status: Option<u16>,
}

/// Mock Deepgram server handle
pub struct MockDeepgram {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockDeepgram {
    /// Start with a minimal successful response
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Self::default_response(), None).await
    }

    /// Start with a custom response body
    pub async fn start_with_response(response: serde_json::Value) -> anyhow::Result<Self> {
        Self::start_inner(response, None).await
    }

    /// Start a server that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(serde_json::json!({}), Some(status)).await
    }

    async fn start_inner(response: serde_json::Value, fail_status: Option<u16>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            response,
            fail_status,
        });

        let app = Router::new()
            .route("/v1/listen", routing::post(handle_listen))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the Deepgram endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// All captured requests, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The single captured request; panics unless exactly one arrived
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one vendor call");
        requests.into_iter().next().unwrap()
    }

    /// A plausible two-word prerecorded response
    pub fn default_response() -> serde_json::Value {
        serde_json::json!({
            "metadata": {
                "request_id": "mock-request-id",
                "model_info": {"mock-model-uuid": {"name": "general"}},
                "duration": 2.5
            },
            "results": {
                "channels": [{
                    "alternatives": [{
                        "transcript": "hello world",
                        "words": [
                            {"word": "hello", "start": 0.0, "end": 0.5, "confidence": 0.99, "punctuated_word": "Hello"},
                            {"word": "world", "start": 0.5, "end": 1.0, "confidence": 0.97, "punctuated_word": "world."}
                        ]
                    }]
                }]
            }
        })
    }
}

impl Drop for MockDeepgram {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_listen(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let query: HashMap<String, String> = query
        .as_deref()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| {
                    let (key, value) = pair.split_once('=')?;
                    Some((key.to_string(), value.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    let content_type = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let url_source = content_type
        .as_deref()
        .filter(|ct| ct.starts_with("application/json"))
        .and_then(|_| serde_json::from_slice::<serde_json::Value>(&body).ok())
        .and_then(|v| v.get("url").and_then(|u| u.as_str()).map(str::to_string));

    state.requests.lock().unwrap().push(RecordedRequest {
        query,
        content_type,
        url_source,
        body_len: body.len(),
    });

    if let Some(status) = state.fail_status {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(serde_json::json!({"err_code": "MOCK_FAILURE", "err_msg": "injected failure"})),
        )
            .into_response();
    }

    Json(state.response.clone()).into_response()
}
