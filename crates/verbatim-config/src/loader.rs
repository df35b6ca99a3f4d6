use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the Deepgram API key is missing or route
    /// paths are malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_api_key()?;
        self.validate_paths()?;
        Ok(())
    }

    /// The whole gateway is a facade over Deepgram, so refuse to start
    /// without a key rather than fail on the first request
    fn validate_api_key(&self) -> anyhow::Result<()> {
        let has_key = self
            .stt
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty());

        if !has_key {
            anyhow::bail!(
                "Deepgram API key not found: set DEEPGRAM_API_KEY or stt.api_key \
                 (get a key at https://console.deepgram.com)"
            );
        }

        Ok(())
    }

    fn validate_paths(&self) -> anyhow::Result<()> {
        if !self.stt.endpoint_path.starts_with('/') {
            anyhow::bail!("stt.endpoint_path must start with '/': `{}`", self.stt.endpoint_path);
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", self.server.health.path);
        }

        Ok(())
    }
}
