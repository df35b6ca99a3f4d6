use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    /// TOML file whose `[meta]` section backs `GET /api/metadata`
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            health: HealthConfig::default(),
            cors: None,
            static_files: StaticFilesConfig::default(),
            metadata_path: default_metadata_path(),
        }
    }
}

/// Static asset serving configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,
    /// Root directory files are served from
    #[serde(default = "default_static_root")]
    pub root: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root: default_static_root(),
        }
    }
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_metadata_path() -> PathBuf {
    PathBuf::from("deepgram.toml")
}
