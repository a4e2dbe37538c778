//! Service metadata and CORS configuration

use serde::Deserialize;

/// Service metadata exposed by the health check
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub cors: CorsConfig,
}

/// Cross-origin policy. A `"*"` entry allows any value.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "wildcard")]
    pub allow_origins: Vec<String>,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    #[serde(default = "wildcard")]
    pub allow_methods: Vec<String>,

    #[serde(default = "wildcard")]
    pub allow_headers: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        is_wildcard(&self.allow_origins)
    }

    pub fn allows_any_method(&self) -> bool {
        is_wildcard(&self.allow_methods)
    }

    pub fn allows_any_header(&self) -> bool {
        is_wildcard(&self.allow_headers)
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v.trim() == "*")
}

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            version: default_version(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: wildcard(),
            allow_credentials: default_allow_credentials(),
            allow_methods: wildcard(),
            allow_headers: wildcard(),
        }
    }
}

fn default_title() -> String {
    "Decision Helper API".to_string()
}

fn default_description() -> String {
    "A playful angel-versus-devil decision helper".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_allow_credentials() -> bool {
    true
}

fn wildcard() -> Vec<String> {
    vec!["*".to_string()]
}
