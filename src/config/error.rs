//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("LLM timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("LLM api_base must be an http(s) URL, got '{0}'")]
    InvalidApiBase(String),

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("top_p must be between 0.0 and 1.0, got {0}")]
    InvalidTopP(f32),
}
