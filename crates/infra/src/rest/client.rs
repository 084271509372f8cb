//! Low-level client for the per-user-namespaced JSON document store
//!
//! Stateless request/response only: no retries, no caching, no request
//! coalescing. Every failure propagates to the calling store, which never
//! retries either - surfacing the error is the contract.

use std::collections::BTreeMap;
use std::time::Duration;

use onewun_domain::{BackendConfig, HttpConfig, OneWunError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{reject_error_status, transport_error};

/// Create responses carry the generated key under `name`.
#[derive(Debug, Deserialize)]
struct PushKey {
    name: String,
}

/// HTTP client for the remote JSON document store.
///
/// Paths are built from segments (`["expenses", user_id]` for a collection,
/// plus a trailing id for one record) with the bearer credential passed as
/// the `auth` query parameter on every call.
#[derive(Clone)]
pub struct DocumentStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl DocumentStoreClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    /// Returns `Config` if the underlying HTTP client cannot be built.
    pub fn new(backend: &BackendConfig, http: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()
            .map_err(|err| {
                OneWunError::Config(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self { http: client, base_url: backend.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, segments: &[&str]) -> String {
        format!("{}/{}.json", self.base_url, segments.join("/"))
    }

    /// POST a record and return the server-assigned key.
    ///
    /// The backend generates a fresh key on every write, so repeating a
    /// create duplicates the record; no deduplication happens here.
    ///
    /// # Errors
    /// `Network` on transport failure or non-auth rejection, `Auth` on a
    /// refused credential.
    pub async fn create<B: Serialize>(
        &self,
        segments: &[&str],
        token: &str,
        body: &B,
    ) -> Result<String> {
        let url = self.url(segments);
        debug!(url = %url, "POST document");

        let response = self
            .http
            .post(&url)
            .query(&[("auth", token)])
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let response = reject_error_status(response, &url).await?;

        let key: PushKey = response
            .json()
            .await
            .map_err(|err| OneWunError::Network(format!("failed to parse create response: {err}")))?;
        Ok(key.name)
    }

    /// GET a whole collection as `(key, record)` pairs, oldest first.
    ///
    /// An absent collection comes back as JSON `null` and yields an empty
    /// vector, never an error. Keys sort lexicographically, which for
    /// server-generated push ids is chronological insertion order.
    ///
    /// # Errors
    /// `Network` on transport failure or non-auth rejection, `Auth` on a
    /// refused credential.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: &str,
    ) -> Result<Vec<(String, T)>> {
        let url = self.url(segments);
        debug!(url = %url, "GET collection");

        let response = self
            .http
            .get(&url)
            .query(&[("auth", token)])
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let response = reject_error_status(response, &url).await?;

        let records: Option<BTreeMap<String, T>> = response
            .json()
            .await
            .map_err(|err| OneWunError::Network(format!("failed to parse collection: {err}")))?;
        Ok(records.unwrap_or_default().into_iter().collect())
    }

    /// PUT the full field payload for one record. Idempotent; there are no
    /// partial-patch semantics.
    ///
    /// # Errors
    /// `Network` on transport failure or non-auth rejection, `Auth` on a
    /// refused credential.
    pub async fn put<B: Serialize>(&self, segments: &[&str], token: &str, body: &B) -> Result<()> {
        let url = self.url(segments);
        debug!(url = %url, "PUT document");

        let response = self
            .http
            .put(&url)
            .query(&[("auth", token)])
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        reject_error_status(response, &url).await?;
        Ok(())
    }

    /// DELETE one record. Idempotent.
    ///
    /// # Errors
    /// `Network` on transport failure or non-auth rejection, `Auth` on a
    /// refused credential.
    pub async fn delete(&self, segments: &[&str], token: &str) -> Result<()> {
        let url = self.url(segments);
        debug!(url = %url, "DELETE document");

        let response = self
            .http
            .delete(&url)
            .query(&[("auth", token)])
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        reject_error_status(response, &url).await?;
        Ok(())
    }
}
