//! Error types used throughout the application
//!
//! Every variant carries a human-readable message: rejected operations are
//! surfaced verbatim to the screen layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for OneWun
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OneWunError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for OneWun operations
pub type Result<T> = std::result::Result<T, OneWunError>;
