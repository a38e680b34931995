//! Server configuration module

use clap::Parser;
use jiff::SignedDuration;

use expresskart_app::{auth::TokenSettings, context::AppSettings, uploads::UploadSettings};

use crate::config::{
    auth::TokenConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    uploads::UploadConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod uploads;

/// ExpressKart JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "expresskart-json", about = "ExpressKart JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token lifetimes.
    #[command(flatten)]
    pub tokens: TokenConfig,

    /// Image upload storage.
    #[command(flatten)]
    pub uploads: UploadConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            tokens: self.tokens.token_settings(),
            uploads: self.uploads.upload_settings(),
        }
    }
}

impl TokenConfig {
    fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            access_ttl: SignedDuration::from_secs(
                i64::try_from(self.access_token_ttl_seconds).unwrap_or(i64::MAX),
            ),
            refresh_ttl: SignedDuration::from_secs(
                i64::try_from(self.refresh_token_ttl_seconds).unwrap_or(i64::MAX),
            ),
        }
    }
}

impl UploadConfig {
    fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            dir: self.upload_dir.clone(),
            public_base: self.upload_public_base.clone(),
            max_bytes: self.upload_max_bytes,
        }
    }
}
