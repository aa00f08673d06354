//! Server configuration module

use clap::Parser;
use thiserror::Error;

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreSelectionConfig,
};

pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arguments or environment could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The selected store is missing a setting it cannot start without.
    #[error("{setting} is required when PERSISTENCE={persistence}")]
    MissingStoreSetting {
        persistence: &'static str,
        setting: &'static str,
    },
}

/// Catalog JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "catalog-json", about = "Catalog JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Metrics and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Products store selection.
    #[command(flatten)]
    pub store: StoreSelectionConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
