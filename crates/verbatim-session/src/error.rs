use http::StatusCode;
use verbatim_core::{ErrorKind, HttpError};

/// Session and nonce errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No Bearer token on a protected endpoint
    #[error("Authorization header with Bearer token is required")]
    MissingToken,

    /// Token failed signature or expiry validation
    #[error("Invalid or expired session token")]
    InvalidToken,

    /// Nonce missing, already consumed, or expired
    #[error("Valid session nonce required. Please refresh the page.")]
    InvalidNonce,
}

impl HttpError for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidNonce => StatusCode::FORBIDDEN,
        }
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::AuthenticationError
    }

    fn error_code(&self) -> &str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidNonce => "INVALID_NONCE",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
