//! Progression gateway over the document store
//!
//! Progressions are keyed under their owning vow:
//! `progressions/<userId>/<vowId>[/<progressionId>]`.

use async_trait::async_trait;
use onewun_core::vows::ports::ProgressionGateway;
use onewun_domain::{Progression, ProgressionFields, Result, UserScope};

use super::client::DocumentStoreClient;

const COLLECTION: &str = "progressions";

/// Remote CRUD for progression records.
#[derive(Clone)]
pub struct ProgressionsClient {
    docs: DocumentStoreClient,
}

impl ProgressionsClient {
    pub fn new(docs: DocumentStoreClient) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl ProgressionGateway for ProgressionsClient {
    async fn create(
        &self,
        scope: &UserScope,
        vow_id: &str,
        fields: &ProgressionFields,
    ) -> Result<String> {
        self.docs.create(&[COLLECTION, &scope.user_id, vow_id], &scope.token, fields).await
    }

    async fn fetch_all(&self, scope: &UserScope, vow_id: &str) -> Result<Vec<Progression>> {
        let records: Vec<(String, ProgressionFields)> =
            self.docs.fetch_all(&[COLLECTION, &scope.user_id, vow_id], &scope.token).await?;
        Ok(records.into_iter().map(|(id, fields)| Progression::from_fields(id, fields)).collect())
    }

    async fn update(
        &self,
        scope: &UserScope,
        vow_id: &str,
        progression_id: &str,
        fields: &ProgressionFields,
    ) -> Result<()> {
        self.docs
            .put(&[COLLECTION, &scope.user_id, vow_id, progression_id], &scope.token, fields)
            .await
    }

    async fn delete(&self, scope: &UserScope, vow_id: &str, progression_id: &str) -> Result<()> {
        self.docs
            .delete(&[COLLECTION, &scope.user_id, vow_id, progression_id], &scope.token)
            .await
    }
}
