use http::StatusCode;
use serde::Serialize;

/// Broad classification of API errors
///
/// Serialized verbatim into the envelope's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Client supplied insufficient or malformed input (HTTP 400)
    ValidationError,
    /// Missing, invalid, or expired token/nonce (HTTP 401/403)
    AuthenticationError,
    /// Vendor call failed or returned an unusable shape (HTTP 500)
    TranscriptionError,
}

/// Trait for domain errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Error classification for the envelope's `type` field
    fn kind(&self) -> ErrorKind;

    /// Stable machine-readable code (e.g. `MISSING_INPUT`)
    fn error_code(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Full diagnostic text for `details.originalError`
    ///
    /// `None` omits the details block entirely.
    fn original_error(&self) -> Option<String> {
        None
    }
}

/// Uniform JSON error envelope returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub r#type: ErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    #[serde(rename = "originalError")]
    pub original_error: String,
}

impl ErrorEnvelope {
    /// Build the envelope from any domain error
    pub fn from_error<E: HttpError + ?Sized>(err: &E) -> Self {
        Self {
            error: ErrorBody {
                r#type: err.kind(),
                code: err.error_code().to_string(),
                message: err.client_message(),
                details: err.original_error().map(|original_error| ErrorDetails { original_error }),
            },
        }
    }
}
