use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use verbatim_session::SessionError;

use crate::respond::error_response;
use crate::state::AppState;

/// Require a valid bearer token on the wrapped routes
///
/// Missing header (or a non-Bearer scheme) and invalid/expired tokens
/// are distinguished in the response code, nothing more.
pub(crate) async fn require_bearer(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return error_response(&SessionError::MissingToken);
    };

    if let Err(err) = state.signer.verify(token) {
        tracing::debug!("session token rejected");
        return error_response(&err);
    }

    next.run(request).await
}
