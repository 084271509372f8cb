//! Port interfaces for session persistence and the identity service

use async_trait::async_trait;
use onewun_domain::{AuthTokens, RefreshedTokens, Result};

/// Durable string key/value storage for session state. Survives process
/// restart; each entry is independent.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read one entry, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write one entry, replacing any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove one entry. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Thin wrapper over the third-party identity service.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Create an account; returns a bearer token, user id and refresh token.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens>;

    /// Password sign-in; same response shape as sign-up.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens>;

    /// Exchange a refresh token for a rotated token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens>;
}
