//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROPOSAL_REPORT` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working setup.
//!
//! # Example
//!
//! ```no_run
//! use proposal_report::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reports stored under {}", config.storage.base_dir);
//! ```

mod email;
mod error;
mod export;
mod layout;
mod logging;
mod storage;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use layout::LayoutConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page geometry, table columns, currency
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Artifact storage location and limits
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feedback email sender
    #[serde(default)]
    pub email: EmailConfig,

    /// Default export format
    #[serde(default)]
    pub export: ExportConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROPOSAL_REPORT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROPOSAL_REPORT__LAYOUT__PAGE_HEIGHT=842` -> `layout.page_height = 842`
    /// - `PROPOSAL_REPORT__STORAGE__BASE_DIR=/srv/reports` -> `storage.base_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROPOSAL_REPORT")
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
        self.layout.validate()?;
        self.storage.validate()?;
        self.email.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
