//! Workout gateway over the document store
//!
//! Workouts are keyed under their owning expense:
//! `workouts/<userId>/<expenseId>[/<workoutId>]`.

use async_trait::async_trait;
use onewun_core::expenses::ports::WorkoutGateway;
use onewun_domain::{Result, UserScope, Workout, WorkoutFields};

use super::client::DocumentStoreClient;

const COLLECTION: &str = "workouts";

/// Remote CRUD for workout sub-records.
#[derive(Clone)]
pub struct WorkoutsClient {
    docs: DocumentStoreClient,
}

impl WorkoutsClient {
    pub fn new(docs: DocumentStoreClient) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl WorkoutGateway for WorkoutsClient {
    async fn create(
        &self,
        scope: &UserScope,
        expense_id: &str,
        fields: &WorkoutFields,
    ) -> Result<String> {
        self.docs.create(&[COLLECTION, &scope.user_id, expense_id], &scope.token, fields).await
    }

    async fn fetch_all(&self, scope: &UserScope, expense_id: &str) -> Result<Vec<Workout>> {
        let records: Vec<(String, WorkoutFields)> = self
            .docs
            .fetch_all(&[COLLECTION, &scope.user_id, expense_id], &scope.token)
            .await?;
        Ok(records.into_iter().map(|(id, fields)| Workout::from_fields(id, fields)).collect())
    }

    async fn update(
        &self,
        scope: &UserScope,
        expense_id: &str,
        workout_id: &str,
        fields: &WorkoutFields,
    ) -> Result<()> {
        self.docs
            .put(&[COLLECTION, &scope.user_id, expense_id, workout_id], &scope.token, fields)
            .await
    }

    async fn delete(&self, scope: &UserScope, expense_id: &str, workout_id: &str) -> Result<()> {
        self.docs
            .delete(&[COLLECTION, &scope.user_id, expense_id, workout_id], &scope.token)
            .await
    }
}
