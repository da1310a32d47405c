//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ANALYSIS_STORE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use analysis_store::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving bucket {}", config.storage.bucket_name);
//! ```

mod error;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Bucket variable used by earlier deployments.
pub const LEGACY_BUCKET_ENV: &str = "AWS_BUCKET_NAME";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Object storage configuration (bucket, layout, backend)
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ANALYSIS_STORE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `AWS_BUCKET_NAME` for the bucket
    ///
    /// # Environment Variable Format
    ///
    /// - `ANALYSIS_STORE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ANALYSIS_STORE__STORAGE__LAYOUT=per_field` -> `storage.layout = per_field`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The bucket name is missing from both sources
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(bucket) = std::env::var(LEGACY_BUCKET_ENV) {
            builder = builder.set_default("storage.bucket_name", bucket)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("ANALYSIS_STORE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        if self.is_production() && self.storage.backend != StorageBackend::S3 {
            return Err(ValidationError::NonDurableBackendInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
