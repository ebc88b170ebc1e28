//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Sweet spot threshold must be finite and > 0")]
    InvalidThreshold,

    #[error("Trap tolerance must be between 0 and 1")]
    InvalidTolerance,

    #[error("Segment count must be between 1 and {max}")]
    InvalidSegmentCount { max: usize },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
