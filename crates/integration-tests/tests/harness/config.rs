//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use wlts_config::{Config, HealthConfig, ServerConfig, SttConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at a mock transcription backend
    pub fn new(base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                },
                stt: SttConfig {
                    api_key: Some(SecretString::from("test-key")),
                    base_url: Some(base_url.to_owned()),
                    ..SttConfig::default()
                },
            },
        }
    }

    /// Override the default language
    pub fn with_language(mut self, language: &str) -> Self {
        self.config.stt.language = language.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
