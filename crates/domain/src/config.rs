//! Configuration structures
//!
//! Loaded by the infra config loader from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HTTP_TIMEOUT_SECS;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Remote document store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the JSON document store, without a trailing slash.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: "https://one-of-wun-default-rtdb.firebaseio.com".to_string() }
    }
}

/// Identity service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL for account endpoints (sign-up, password sign-in).
    pub base_url: String,
    /// URL of the refresh-token exchange endpoint.
    pub token_url: String,
    /// API key appended to every identity request.
    pub api_key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
            token_url: "https://securetoken.googleapis.com/v1/token".to_string(),
            api_key: String::new(),
        }
    }
}

/// HTTP client settings shared by the document and identity clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}
