//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ONEWUN_BACKEND_URL`: Base URL of the remote document store
//! - `ONEWUN_API_KEY`: Identity service API key
//! - `ONEWUN_IDENTITY_URL`: Identity account endpoint base (optional)
//! - `ONEWUN_TOKEN_URL`: Refresh-token exchange endpoint (optional)
//! - `ONEWUN_HTTP_TIMEOUT_SECS`: Request timeout in seconds (optional)
//!
//! ## File Locations
//! The loader probes `./onewun.json`, `./onewun.toml`, `./config.json` and
//! `./config.toml` in the current working directory.

use std::path::PathBuf;

use onewun_domain::{BackendConfig, Config, HttpConfig, IdentityConfig, OneWunError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `Config` if configuration cannot be loaded from either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `ONEWUN_BACKEND_URL` and `ONEWUN_API_KEY` are required; the remaining
/// variables fall back to their defaults.
///
/// # Errors
/// Returns `Config` if required variables are missing or have invalid
/// values.
pub fn load_from_env() -> Result<Config> {
    let backend_url = env_var("ONEWUN_BACKEND_URL")?;
    let api_key = env_var("ONEWUN_API_KEY")?;

    let identity_defaults = IdentityConfig::default();
    let identity_url =
        std::env::var("ONEWUN_IDENTITY_URL").unwrap_or(identity_defaults.base_url);
    let token_url = std::env::var("ONEWUN_TOKEN_URL").unwrap_or(identity_defaults.token_url);

    let timeout_seconds = match std::env::var("ONEWUN_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            OneWunError::Config(format!("Invalid HTTP timeout: {e}"))
        })?,
        Err(_) => HttpConfig::default().timeout_seconds,
    };

    Ok(Config {
        backend: BackendConfig { base_url: backend_url },
        identity: IdentityConfig { base_url: identity_url, token_url, api_key },
        http: HttpConfig { timeout_seconds },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports both JSON
/// and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `Config` if the file is missing, unreadable, or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OneWunError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OneWunError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        OneWunError::Config(format!("Failed to read {}: {e}", config_path.display()))
    })?;

    let config = match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|e| {
            OneWunError::Config(format!("Invalid JSON in {}: {e}", config_path.display()))
        })?,
        Some("toml") => toml::from_str(&contents).map_err(|e| {
            OneWunError::Config(format!("Invalid TOML in {}: {e}", config_path.display()))
        })?,
        _ => {
            return Err(OneWunError::Config(format!(
                "Unsupported config format: {}",
                config_path.display()
            )));
        }
    };

    tracing::info!(path = %config_path.display(), "Configuration loaded from file");
    Ok(config)
}

/// Probe the standard locations for a config file, first hit wins.
pub fn probe_config_paths() -> Option<PathBuf> {
    ["onewun.json", "onewun.toml", "config.json", "config.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| OneWunError::Config(format!("Missing environment variable: {name}")))
}
