use std::path::PathBuf;

use verbatim_session::{NonceRegistry, TokenSigner};

/// Shared request-handling state
///
/// The only cross-request mutable structure is the nonce registry; the
/// signing key is immutable after startup.
pub(crate) struct AppState {
    pub signer: TokenSigner,
    pub nonces: NonceRegistry,
    /// Whether `GET /api/session` demands a valid page-load nonce
    pub require_nonce: bool,
    pub token_ttl_seconds: u64,
    pub static_root: PathBuf,
    pub metadata_path: PathBuf,
}
