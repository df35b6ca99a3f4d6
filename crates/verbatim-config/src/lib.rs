#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod session;
pub mod stt;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use server::*;
pub use session::SessionConfig;
pub use stt::SttConfig;

/// Top-level Verbatim configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech-to-text provider configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Session token and nonce configuration
    #[serde(default)]
    pub session: SessionConfig,
}
