use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::{StatusCode, Uri, header};

use verbatim_session::NonceRegistry;

use crate::state::AppState;

/// Serve a file from the static root
///
/// `/` maps to `index.html`. When nonce enforcement is on, a fresh
/// session nonce is injected into the served index so the page can
/// exchange it for a token.
pub(crate) async fn serve_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let request_path = uri.path();
    let relative = if request_path == "/" {
        "index.html"
    } else {
        request_path.trim_start_matches('/')
    };

    if !is_safe_path(relative) {
        return not_found();
    }

    let file_path = state.static_root.join(relative);
    let Ok(contents) = tokio::fs::read(&file_path).await else {
        return not_found();
    };

    let mime = mime_for(relative);

    if request_path == "/" && state.require_nonce {
        let html = String::from_utf8_lossy(&contents);
        if let Some(injected) = inject_nonce(&html, &state.nonces) {
            return ([(header::CONTENT_TYPE, mime)], injected).into_response();
        }
        tracing::warn!("index page has no </head>, serving without a session nonce");
    }

    ([(header::CONTENT_TYPE, mime)], contents).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Reject traversal outside the static root
fn is_safe_path(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .all(|c| matches!(c, std::path::Component::Normal(_)))
}

/// Content type by file extension
fn mime_for(path: &str) -> &'static str {
    let extension = Path::new(path).extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "html" => "text/html",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "js" => "application/javascript",
        _ => "text/plain",
    }
}

/// Issue a fresh nonce and insert it as a meta tag before `</head>`
///
/// Returns `None` without issuing anything when the page has no
/// injection point; a nonce the client never sees would sit in the
/// registry until the sweep.
fn inject_nonce(html: &str, nonces: &NonceRegistry) -> Option<String> {
    if !html.contains("</head>") {
        return None;
    }

    let nonce = nonces.issue();
    Some(html.replacen(
        "</head>",
        &format!("<meta name=\"session-nonce\" content=\"{nonce}\">\n</head>"),
        1,
    ))
}
