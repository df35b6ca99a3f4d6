use axum::Json;
use axum::response::{IntoResponse, Response};
use verbatim_core::{ErrorEnvelope, HttpError};

/// Convert a domain error into the uniform JSON envelope response
pub(crate) fn error_response<E: HttpError>(err: &E) -> Response {
    (err.status_code(), Json(ErrorEnvelope::from_error(err))).into_response()
}
