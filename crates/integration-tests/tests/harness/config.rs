//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use secrecy::SecretString;
use verbatim_config::{Config, ServerConfig, SessionConfig, SttConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal defaults: mock-friendly listen address, auth off
    ///
    /// Auth is opt-in per test via [`Self::with_auth`] so transcription
    /// tests don't need a token dance.
    pub fn new(deepgram_base_url: &str) -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                ..ServerConfig::default()
            },
            stt: SttConfig {
                api_key: Some(SecretString::from("dg-test-key")),
                base_url: Some(deepgram_base_url.to_string()),
                ..SttConfig::default()
            },
            session: SessionConfig::default(),
        };
        config.session.require_auth = false;
        Self { config }
    }

    /// Require a bearer token on the transcription endpoint
    pub fn with_auth(mut self) -> Self {
        self.config.session.require_auth = true;
        self
    }

    /// Set the session secret, enabling nonce enforcement
    pub fn with_session_secret(mut self, secret: &str) -> Self {
        self.config.session.secret = Some(SecretString::from(secret));
        self
    }

    /// Serve static files from the given root
    pub fn with_static_root(mut self, root: &Path) -> Self {
        self.config.server.static_files.root = root.to_path_buf();
        self
    }

    /// Point the metadata endpoint at the given TOML file
    pub fn with_metadata_path(mut self, path: &Path) -> Self {
        self.config.server.metadata_path = path.to_path_buf();
        self
    }

    /// Override the default transcription model
    pub fn with_default_model(mut self, model: &str) -> Self {
        self.config.stt.default_model = model.to_string();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
