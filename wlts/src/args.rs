use std::path::PathBuf;

use clap::Parser;

/// WLTS transcription server
#[derive(Debug, Parser)]
#[command(name = "wlts", about = "Word-level timestamp transcription front-end")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wlts.toml", env = "WLTS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "WLTS_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
