use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use verbatim_core::{ErrorEnvelope, ErrorKind, HttpError};

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription pipeline errors
///
/// Validation variants return 400; everything else surfaces as a 500
/// `TRANSCRIPTION_FAILED`, matching the single catch-all exit of the
/// handler pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SttError {
    /// Neither a usable URL nor a non-empty file was supplied
    #[error("Either file or url must be provided")]
    MissingInput,

    /// Recognized feature flag with a value that does not parse as a boolean
    #[error("Feature `{flag}` expects a boolean value, got `{value}`")]
    InvalidFlagValue { flag: String, value: String },

    /// The `features` form field is not a JSON object
    #[error("Invalid JSON in features field: {0}")]
    InvalidFeatures(String),

    /// The form body could not be parsed at all
    #[error("Malformed form body: {0}")]
    MalformedForm(String),

    /// Request to the vendor could not be sent
    #[error("Failed to send request to Deepgram: {0}")]
    Connection(String),

    /// Vendor returned a non-success status
    #[error("Deepgram API error ({status}): {message}")]
    ProviderApi { status: u16, message: String },

    /// Vendor response had no channels or alternatives
    #[error("No transcription results returned from Deepgram")]
    EmptyResult,

    /// Vendor response body did not match the expected shape
    #[error("Failed to parse Deepgram response: {0}")]
    MalformedResponse(String),

    /// Provider misconfiguration caught at startup
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SttError {
    const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput | Self::InvalidFlagValue { .. } | Self::InvalidFeatures(_) | Self::MalformedForm(_)
        )
    }
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn kind(&self) -> ErrorKind {
        if self.is_validation() {
            ErrorKind::ValidationError
        } else {
            ErrorKind::TranscriptionError
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::MissingInput => "MISSING_INPUT",
            Self::InvalidFlagValue { .. } => "INVALID_FEATURE_VALUE",
            Self::InvalidFeatures(_) => "INVALID_FEATURES",
            Self::MalformedForm(_) => "INVALID_FORM",
            Self::Connection(_)
            | Self::ProviderApi { .. }
            | Self::EmptyResult
            | Self::MalformedResponse(_)
            | Self::Config(_) => "TRANSCRIPTION_FAILED",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn original_error(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorEnvelope::from_error(&self))).into_response()
    }
}
