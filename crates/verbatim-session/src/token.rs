use jwt_compact::{
    AlgorithmExt as _, Claims, Empty, Header, TimeOptions, UntrustedToken,
    alg::{Hs256, Hs256Key},
};
use rand::Rng as _;
use secrecy::{ExposeSecret as _, SecretString};

use crate::error::SessionError;

/// Issues and validates HMAC-SHA256 session tokens
///
/// Tokens carry only an expiry claim; possession of a valid signature is
/// the whole contract.
pub struct TokenSigner {
    key: Hs256Key,
}

impl TokenSigner {
    /// Build a signer from a configured secret
    pub fn new(secret: &SecretString) -> Self {
        Self {
            key: Hs256Key::new(secret.expose_secret().as_bytes()),
        }
    }

    /// Build a signer with an ephemeral per-process key
    ///
    /// Used when no secret is configured; tokens stop validating on
    /// restart, which is acceptable for the no-auth development mode.
    pub fn ephemeral() -> Self {
        let key: [u8; 32] = rand::rng().random();
        Self {
            key: Hs256Key::new(&key),
        }
    }

    /// Issue a token that expires after `ttl_seconds`
    pub fn issue(&self, ttl_seconds: u64) -> String {
        self.issue_expiring_in(chrono::Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(3600)))
    }

    /// Issue a token with an explicit validity window
    ///
    /// A negative duration produces an already-expired token, which the
    /// expiry tests rely on.
    pub fn issue_expiring_in(&self, validity: chrono::Duration) -> String {
        let time_options = TimeOptions::default();
        let claims = Claims::empty().set_duration_and_issuance(&time_options, validity);

        Hs256
            .token(&Header::empty(), &claims, &self.key)
            .expect("HS256 signing of empty claims cannot fail")
    }

    /// Validate a token's signature and expiry
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidToken` on any parse, signature, or
    /// expiry failure; the caller never learns which.
    pub fn verify(&self, raw: &str) -> Result<(), SessionError> {
        let untrusted = UntrustedToken::new(raw).map_err(|_| SessionError::InvalidToken)?;

        let token = Hs256
            .validator::<Empty>(&self.key)
            .validate(&untrusted)
            .map_err(|_| SessionError::InvalidToken)?;

        token
            .claims()
            .validate_expiration(&TimeOptions::default())
            .map_err(|_| SessionError::InvalidToken)?;

        Ok(())
    }
}
