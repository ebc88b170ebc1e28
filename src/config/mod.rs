//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PARETO_DECIDE` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use pareto_decide::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Sweet spot threshold: {}", config.analysis.threshold);
//! ```

mod analysis;
mod error;
mod logging;

pub use analysis::{AnalysisOverrides, AnalysisSettings, MAX_SEGMENT_COUNT};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis defaults (threshold, tolerance, name field, axis direction)
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Logging configuration (filter, format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `PARETO_DECIDE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PARETO_DECIDE__ANALYSIS__THRESHOLD=0.9` -> `analysis.threshold = 0.9`
    /// - `PARETO_DECIDE__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARETO_DECIDE")
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
    /// Returns `ValidationError` if any configuration value is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
