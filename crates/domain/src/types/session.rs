//! Session and identity types

/// The credential pair a store reads from the live session for one remote
/// call. Never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScope {
    pub user_id: String,
    pub token: String,
}

impl UserScope {
    #[must_use]
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), token: token.into() }
    }
}

/// Tokens issued by identity sign-up or password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    /// Bearer credential for document-store calls.
    pub token: String,
    /// Opaque user identifier scoping all resources.
    pub user_id: String,
    pub refresh_token: String,
}

/// Rotated tokens returned by a refresh exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    pub token: String,
    pub refresh_token: String,
    /// Lifetime of the new token in seconds.
    pub expires_in: i64,
}
