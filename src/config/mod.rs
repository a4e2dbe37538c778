//! Application configuration module
//!
//! Configuration is read once at startup from a YAML file (default
//! `config.yaml`) layered with environment variables using the
//! `ANGEL_DEVIL` prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use angel_devil::config::AppConfig;
//!
//! let config = AppConfig::load_or_default("config.yaml");
//! println!("Server running on {}", config.server.bind_address());
//! ```

mod ai;
mod app;
mod error;
mod server;

pub use ai::{LlmConfig, LlmParameters};
pub use app::{AppInfoConfig, CorsConfig};
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_PREFIX: &str = "ANGEL_DEVIL";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, log level)
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM provider configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Service metadata and CORS policy
    #[serde(default)]
    pub app: AppInfoConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file plus environment overrides
    ///
    /// A missing file is not an error; every key then takes its default.
    ///
    /// # Environment Variable Format
    ///
    /// - `ANGEL_DEVIL__SERVER__PORT=9000` -> `server.port = 9000`
    /// - `ANGEL_DEVIL__LLM__API_KEY=...` -> `llm.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or values cannot be
    /// parsed into the expected types.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Yaml).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate
    pub fn load_validated(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate, falling back to the built-in defaults on any error
    pub fn load_or_default(path: &str) -> Self {
        match Self::load_validated(path) {
            Ok(config) => {
                tracing::info!(path, "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}
