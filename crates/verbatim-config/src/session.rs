use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Session token and nonce configuration
///
/// A non-empty `secret` enables nonce-gated token issuance. Without one,
/// tokens are signed with an ephemeral per-process key and `GET
/// /api/session` hands them out unconditionally.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// HMAC signing secret for session tokens
    #[serde(default)]
    pub secret: Option<SecretString>,
    /// Whether the transcription endpoint requires a bearer token
    #[serde(default = "default_require_auth")]
    pub require_auth: bool,
    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Nonce lifetime in seconds
    #[serde(default = "default_nonce_ttl")]
    pub nonce_ttl_seconds: u64,
    /// Interval between expired-nonce sweeps, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl SessionConfig {
    /// Whether token issuance is gated by a page-load nonce
    pub fn require_nonce(&self) -> bool {
        self.secret.as_ref().is_some_and(|s| !s.expose_secret().is_empty())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            require_auth: default_require_auth(),
            token_ttl_seconds: default_token_ttl(),
            nonce_ttl_seconds: default_nonce_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

const fn default_require_auth() -> bool {
    true
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_nonce_ttl() -> u64 {
    5 * 60
}

fn default_sweep_interval() -> u64 {
    60
}
