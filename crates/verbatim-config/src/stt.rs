use secrecy::SecretString;
use serde::Deserialize;

/// Speech-to-text provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Deepgram API key
    ///
    /// Required; startup fails without it.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (defaults to the public Deepgram API)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model used when the request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Route the transcription endpoint is mounted at
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
    /// Per-request timeout for the vendor call, in seconds
    ///
    /// Unset means only the shared HTTP client's overall timeout applies.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            default_model: default_model(),
            endpoint_path: default_endpoint_path(),
            request_timeout_seconds: None,
        }
    }
}

fn default_model() -> String {
    "nova-3".to_string()
}

fn default_endpoint_path() -> String {
    "/api/transcription".to_string()
}
