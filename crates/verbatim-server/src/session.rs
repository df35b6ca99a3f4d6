use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::HeaderMap;
use verbatim_session::SessionError;

use crate::respond::error_response;
use crate::state::AppState;

/// Header carrying the page-load nonce
const SESSION_NONCE_HEADER: &str = "x-session-nonce";

/// Issue a session token
///
/// When nonce enforcement is on, the request must present a nonce that
/// was injected into a previously served page and has not been used.
pub(crate) async fn session_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.require_nonce {
        let consumed = headers
            .get(SESSION_NONCE_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|nonce| state.nonces.consume(nonce));

        if !consumed {
            return error_response(&SessionError::InvalidNonce);
        }
    }

    let token = state.signer.issue(state.token_ttl_seconds);
    Json(serde_json::json!({ "token": token })).into_response()
}
