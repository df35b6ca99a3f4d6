use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Overall cap on a vendor call, including the audio upload
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP client so vendor calls reuse pooled connections
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
