#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod stt;

use serde::Deserialize;

pub use health::*;
pub use server::*;
pub use stt::*;

/// Top-level WLTS configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Transcription provider configuration
    #[serde(default)]
    pub stt: SttConfig,
}
