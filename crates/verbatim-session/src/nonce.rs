use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng as _;
use tokio_util::sync::CancellationToken;

/// Registry of outstanding single-use session nonces
///
/// A nonce binds one page load to at most one token issuance: `issue`
/// generates it, `consume` removes it atomically so a replay fails even
/// under concurrent requests. Injected into handlers rather than held in
/// ambient static state.
#[derive(Clone)]
pub struct NonceRegistry {
    nonces: Arc<DashMap<String, Instant>>,
    ttl: Duration,
}

impl NonceRegistry {
    /// Create a registry whose nonces expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            nonces: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Generate and register a fresh nonce
    pub fn issue(&self) -> String {
        let bytes: [u8; 16] = rand::rng().random();
        let nonce = bytes.iter().fold(String::with_capacity(32), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        });

        self.nonces.insert(nonce.clone(), Instant::now() + self.ttl);
        nonce
    }

    /// Consume a nonce, succeeding at most once per issued value
    ///
    /// Removal happens unconditionally, so an expired nonce is also gone
    /// after a failed consume.
    pub fn consume(&self, nonce: &str) -> bool {
        match self.nonces.remove(nonce) {
            Some((_, expires_at)) => Instant::now() < expires_at,
            None => false,
        }
    }

    /// Drop all expired nonces
    pub fn sweep(&self) {
        let now = Instant::now();
        self.nonces.retain(|_, expires_at| now < *expires_at);
    }

    /// Number of outstanding nonces
    pub fn len(&self) -> usize {
        self.nonces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nonces.is_empty()
    }
}

/// Handle for the background expired-nonce sweeper
///
/// Dropping the handle stops the task.
pub struct NonceSweeper {
    cancel: CancellationToken,
}

impl NonceSweeper {
    /// Spawn a task that sweeps the registry at a fixed interval
    #[must_use]
    pub fn spawn(registry: NonceRegistry, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        registry.sweep();
                        tracing::trace!(outstanding = registry.len(), "swept expired nonces");
                    }
                    () = token.cancelled() => break,
                }
            }
        });

        Self { cancel }
    }
}

impl Drop for NonceSweeper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
