//! Shared error contract for the Verbatim gateway
//!
//! Every API error, regardless of which crate produced it, is surfaced to
//! the caller as the same JSON envelope. Feature crates implement
//! [`HttpError`] and the server layer turns it into an actual response,
//! keeping domain errors decoupled from axum.

mod error;

pub use error::{ErrorBody, ErrorDetails, ErrorEnvelope, ErrorKind, HttpError};
