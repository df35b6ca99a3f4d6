//! Session token issuance and nonce gating
//!
//! Short-lived HMAC-signed bearer tokens, optionally gated by a
//! single-use page-load nonce. All mutable state lives in the injected
//! [`NonceRegistry`]; there are no process-wide singletons.

mod error;
mod nonce;
mod token;

pub use error::SessionError;
pub use nonce::{NonceRegistry, NonceSweeper};
pub use token::TokenSigner;
