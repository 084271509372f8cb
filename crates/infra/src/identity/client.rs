//! Thin client for the third-party identity service
//!
//! Wraps the three endpoints the app needs: account sign-up, password
//! sign-in, and the refresh-token exchange. Like the document client this
//! never retries; failures surface to the caller.

use std::time::Duration;

use async_trait::async_trait;
use onewun_core::session::ports::IdentityGateway;
use onewun_domain::{AuthTokens, HttpConfig, IdentityConfig, OneWunError, RefreshedTokens, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{reject_error_status, transport_error};

#[derive(Debug, Serialize)]
struct AccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "idToken")]
    id_token: String,
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// The token endpoint reports numbers as strings.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// Client for the identity service's account and token endpoints.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Build a client for the configured identity service.
    ///
    /// # Errors
    /// Returns `Config` if the underlying HTTP client cannot be built.
    pub fn new(config: IdentityConfig, http: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()
            .map_err(|err| {
                OneWunError::Config(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self { http: client, config })
    }

    async fn account_request(&self, endpoint: &str, email: &str, password: &str) -> Result<AuthTokens> {
        let url = format!("{}/accounts:{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(endpoint, "identity account request");

        let body = AccountRequest { email, password, return_secure_token: true };
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let response = reject_error_status(response, &url).await?;

        let account: AccountResponse = response.json().await.map_err(|err| {
            OneWunError::Network(format!("failed to parse identity response: {err}"))
        })?;
        Ok(AuthTokens {
            token: account.id_token,
            user_id: account.local_id,
            refresh_token: account.refresh_token,
        })
    }
}

#[async_trait]
impl IdentityGateway for IdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens> {
        self.account_request("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens> {
        self.account_request("signInWithPassword", email, password).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens> {
        let url = self.config.token_url.clone();
        debug!("identity token refresh");

        let body = RefreshRequest { grant_type: "refresh_token", refresh_token };
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let response = reject_error_status(response, &url).await?;

        let refreshed: RefreshResponse = response.json().await.map_err(|err| {
            OneWunError::Network(format!("failed to parse refresh response: {err}"))
        })?;
        let expires_in = refreshed.expires_in.parse::<i64>().map_err(|err| {
            OneWunError::Network(format!("unexpected expires_in in refresh response: {err}"))
        })?;

        Ok(RefreshedTokens {
            token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            expires_in,
        })
    }
}
