use std::path::PathBuf;

use clap::Parser;

/// Verbatim transcription gateway
#[derive(Debug, Parser)]
#[command(name = "verbatim", about = "HTTP gateway for Deepgram speech-to-text")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "verbatim.toml", env = "VERBATIM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VERBATIM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
