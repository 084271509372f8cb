//! Port interfaces for expense and workout persistence
//!
//! These traits define the boundary between the expense store and the
//! remote document store. Every call is scoped to the authenticated user;
//! the store reads the scope from the live session at call time and passes
//! it through.

use async_trait::async_trait;
use onewun_domain::{Expense, ExpenseFields, Result, UserScope, Workout, WorkoutFields};

/// Remote CRUD for the expense collection.
#[async_trait]
pub trait ExpenseGateway: Send + Sync {
    /// Create a record and return the server-assigned key. Repeating a
    /// create produces a duplicate record; the gateway never deduplicates.
    async fn create(&self, scope: &UserScope, fields: &ExpenseFields) -> Result<String>;

    /// Fetch the user's full collection, oldest first. An absent remote
    /// collection yields an empty vector, not an error.
    async fn fetch_all(&self, scope: &UserScope) -> Result<Vec<Expense>>;

    /// Full-field replace of one record. No partial-patch semantics.
    async fn update(&self, scope: &UserScope, id: &str, fields: &ExpenseFields) -> Result<()>;

    /// Delete one record.
    async fn delete(&self, scope: &UserScope, id: &str) -> Result<()>;
}

/// Remote CRUD for workout sub-records, keyed under their owning expense.
#[async_trait]
pub trait WorkoutGateway: Send + Sync {
    async fn create(
        &self,
        scope: &UserScope,
        expense_id: &str,
        fields: &WorkoutFields,
    ) -> Result<String>;

    async fn fetch_all(&self, scope: &UserScope, expense_id: &str) -> Result<Vec<Workout>>;

    async fn update(
        &self,
        scope: &UserScope,
        expense_id: &str,
        workout_id: &str,
        fields: &WorkoutFields,
    ) -> Result<()>;

    async fn delete(&self, scope: &UserScope, expense_id: &str, workout_id: &str) -> Result<()>;
}
