//! Session supervisor - live credentials, durable persistence, auto-expiry

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use onewun_domain::constants::{REFRESH_WINDOW_SECS, TOKEN_TTL_SECS};
use onewun_domain::{OneWunError, Result, UserScope};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::ports::{CredentialStore, IdentityGateway};

/// Durable storage keys. Three independent entries describe a persisted
/// session; the refresh token is stored separately and rotated on refresh.
pub const KEY_TOKEN: &str = "token";
pub const KEY_USER_ID: &str = "userId";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_TOKEN_EXPIRATION: &str = "tokenExpiration";

#[derive(Debug, Clone)]
struct LiveSession {
    token: String,
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// Auth/session supervisor.
///
/// Owns the credential pair and its expiry. Only this service mutates the
/// session; the stores read the current pair through [`scope`](Self::scope)
/// on every remote call and never cache a copy, so a logout takes effect at
/// the very next call.
pub struct SessionService {
    live: RwLock<Option<LiveSession>>,
    credentials: Arc<dyn CredentialStore>,
    identity: Arc<dyn IdentityGateway>,
}

impl SessionService {
    /// Create an unauthenticated supervisor.
    pub fn new(credentials: Arc<dyn CredentialStore>, identity: Arc<dyn IdentityGateway>) -> Self {
        Self { live: RwLock::new(None), credentials, identity }
    }

    /// Install a credential pair as the live session.
    ///
    /// Logs and no-ops when either value is empty. Expiry is set one hour
    /// out and the triple is persisted; a persistence failure is logged and
    /// the live session stands for the rest of the process lifetime.
    pub async fn authenticate(&self, token: &str, user_id: &str) {
        if token.is_empty() || user_id.is_empty() {
            error!(
                token_present = !token.is_empty(),
                user_id_present = !user_id.is_empty(),
                "rejected authenticate call with missing credentials"
            );
            return;
        }

        let expires_at = Utc::now() + Duration::seconds(TOKEN_TTL_SECS);
        {
            let mut live = self.live.write().await;
            *live = Some(LiveSession {
                token: token.to_string(),
                user_id: user_id.to_string(),
                expires_at,
            });
        }
        info!(user_id = %user_id, "session authenticated");

        let expiration = expires_at.to_rfc3339();
        for (key, value) in [
            (KEY_TOKEN, token),
            (KEY_USER_ID, user_id),
            (KEY_TOKEN_EXPIRATION, expiration.as_str()),
        ] {
            if let Err(err) = self.credentials.set(key, value).await {
                warn!(key, error = %err, "failed to persist session entry");
            }
        }
    }

    /// Clear the live session and erase the persisted entries. Idempotent;
    /// safe to call when already logged out.
    pub async fn logout(&self) {
        {
            let mut live = self.live.write().await;
            *live = None;
        }
        info!("session cleared");

        for key in [KEY_TOKEN, KEY_USER_ID, KEY_TOKEN_EXPIRATION] {
            if let Err(err) = self.credentials.remove(key).await {
                warn!(key, error = %err, "failed to erase session entry");
            }
        }
    }

    /// Whether a live session is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.live.read().await.is_some()
    }

    /// Current user id, if authenticated.
    pub async fn user_id(&self) -> Option<String> {
        self.live.read().await.as_ref().map(|s| s.user_id.clone())
    }

    /// Current bearer token, if authenticated.
    pub async fn token(&self) -> Option<String> {
        self.live.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Instant of the scheduled expiry, if authenticated.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.live.read().await.as_ref().map(|s| s.expires_at)
    }

    /// The credential pair for one remote call, read at call time.
    ///
    /// # Errors
    /// `Auth` when no session is live.
    pub async fn scope(&self) -> Result<UserScope> {
        self.live
            .read()
            .await
            .as_ref()
            .map(|s| UserScope::new(s.user_id.clone(), s.token.clone()))
            .ok_or_else(|| OneWunError::Auth("Not authenticated".to_string()))
    }

    /// Restore a persisted session at process start.
    ///
    /// With more than a minute left on the persisted expiry the session is
    /// re-installed as-is and a forced [`logout`](Self::logout) is scheduled
    /// for the remaining duration. Within the final minute (or past it) the
    /// refresh token is exchanged first and the rotated credentials are
    /// installed; a failed exchange degrades to a logout instead of
    /// propagating. With nothing persisted the store is wiped to a clean
    /// unauthenticated state.
    ///
    /// # Errors
    /// `Storage` when the credential store fails or holds an unparseable
    /// expiration timestamp.
    pub async fn bootstrap(self: Arc<Self>) -> Result<()> {
        let token = self.credentials.get(KEY_TOKEN).await?;
        let user_id = self.credentials.get(KEY_USER_ID).await?;
        let expiration = self.credentials.get(KEY_TOKEN_EXPIRATION).await?;

        let (Some(token), Some(user_id), Some(expiration)) = (token, user_id, expiration) else {
            debug!("no persisted session; starting unauthenticated");
            self.logout().await;
            return Ok(());
        };

        let expires_at = DateTime::parse_from_rfc3339(&expiration)
            .map_err(|err| {
                OneWunError::Storage(format!("invalid persisted expiration timestamp: {err}"))
            })?
            .with_timezone(&Utc);

        let remaining = expires_at - Utc::now();
        if remaining > Duration::seconds(REFRESH_WINDOW_SECS) {
            self.authenticate(&token, &user_id).await;
            Self::schedule_logout(&self, remaining);
        } else if let Err(err) = self.refresh_session(&user_id).await {
            warn!(error = %err, "session refresh failed; logging out");
            self.logout().await;
        }
        Ok(())
    }

    /// Exchange the persisted refresh token and install the rotated
    /// credentials.
    async fn refresh_session(&self, user_id: &str) -> Result<()> {
        let refresh_token = self
            .credentials
            .get(KEY_REFRESH_TOKEN)
            .await?
            .ok_or_else(|| OneWunError::Auth("No refresh token available".to_string()))?;

        let rotated = self.identity.refresh(&refresh_token).await?;
        info!("session token refreshed");

        if let Err(err) = self.credentials.set(KEY_REFRESH_TOKEN, &rotated.refresh_token).await {
            warn!(error = %err, "failed to persist rotated refresh token");
        }

        self.authenticate(&rotated.token, user_id).await;
        Ok(())
    }

    /// Force a logout when the persisted expiry lands.
    fn schedule_logout(this: &Arc<Self>, remaining: Duration) {
        let this = Arc::clone(this);
        let sleep_for = remaining.to_std().unwrap_or_default();
        debug!(seconds = sleep_for.as_secs(), "scheduled session expiry");
        tokio::spawn(async move {
            tokio::time::sleep(sleep_for).await;
            this.logout().await;
        });
    }
}
