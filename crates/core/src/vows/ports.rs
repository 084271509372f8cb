//! Port interfaces for vow and progression persistence

use async_trait::async_trait;
use onewun_domain::{Progression, ProgressionFields, Result, UserScope, Vow, VowFields};

/// Remote CRUD for the vow collection.
#[async_trait]
pub trait VowGateway: Send + Sync {
    /// Create a record and return the server-assigned key.
    async fn create(&self, scope: &UserScope, fields: &VowFields) -> Result<String>;

    /// Fetch the user's full collection, oldest first. An absent remote
    /// collection yields an empty vector, not an error.
    async fn fetch_all(&self, scope: &UserScope) -> Result<Vec<Vow>>;

    /// Full-field replace of one record.
    async fn update(&self, scope: &UserScope, id: &str, fields: &VowFields) -> Result<()>;

    /// Delete one record.
    async fn delete(&self, scope: &UserScope, id: &str) -> Result<()>;
}

/// Remote CRUD for progression records, keyed under their owning vow.
#[async_trait]
pub trait ProgressionGateway: Send + Sync {
    async fn create(
        &self,
        scope: &UserScope,
        vow_id: &str,
        fields: &ProgressionFields,
    ) -> Result<String>;

    async fn fetch_all(&self, scope: &UserScope, vow_id: &str) -> Result<Vec<Progression>>;

    async fn update(
        &self,
        scope: &UserScope,
        vow_id: &str,
        progression_id: &str,
        fields: &ProgressionFields,
    ) -> Result<()>;

    async fn delete(&self, scope: &UserScope, vow_id: &str, progression_id: &str) -> Result<()>;
}
