//! File-backed credential storage
//!
//! Implements the session supervisor's `CredentialStore` port as a small
//! JSON object on disk - one string entry per key, rewritten atomically on
//! every change. Survives process restart; that is its whole job.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use onewun_core::session::ports::CredentialStore;
use onewun_domain::{OneWunError, Result};
use tokio::sync::RwLock;
use tracing::debug;

/// JSON-file-backed string key/value store.
pub struct FileCredentialStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Open (or create) the store at `path`. A missing file starts empty;
    /// a present one is loaded eagerly so reads never touch the disk.
    ///
    /// # Errors
    /// `Storage` when the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                OneWunError::Storage(format!(
                    "corrupt credential store at {}: {err}",
                    path.display()
                ))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(OneWunError::Storage(format!(
                    "failed to read credential store at {}: {err}",
                    path.display()
                )));
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "opened credential store");
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|err| OneWunError::Storage(format!("failed to encode entries: {err}")))?;
        tokio::fs::write(&self.path, bytes).await.map_err(|err| {
            OneWunError::Storage(format!(
                "failed to write credential store at {}: {err}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }
}
