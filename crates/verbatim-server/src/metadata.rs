use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::state::AppState;

/// Serve the `[meta]` section of the project TOML file as JSON
pub(crate) async fn metadata_handler(State(state): State<Arc<AppState>>) -> Response {
    let raw = match tokio::fs::read_to_string(&state.metadata_path).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("failed to read {}: {e}", state.metadata_path.display());
            return internal_error(format!("Failed to read metadata from {}", state.metadata_path.display()));
        }
    };

    let table: toml::Table = match raw.parse() {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("failed to parse {}: {e}", state.metadata_path.display());
            return internal_error(format!("Failed to read metadata from {}", state.metadata_path.display()));
        }
    };

    let Some(toml::Value::Table(meta)) = table.get("meta") else {
        return internal_error(format!("Missing [meta] section in {}", state.metadata_path.display()));
    };

    match serde_json::to_value(meta) {
        Ok(json) => Json(json).into_response(),
        Err(e) => {
            tracing::error!("failed to serialize metadata: {e}");
            internal_error("Failed to serialize metadata".to_string())
        }
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "INTERNAL_SERVER_ERROR",
            "message": message,
        })),
    )
        .into_response()
}
