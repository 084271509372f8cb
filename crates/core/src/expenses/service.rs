//! Expense store - optimistic mirror of the remote expense collection

use std::sync::Arc;

use onewun_domain::validation::validate_rating;
use onewun_domain::{
    Expense, ExpenseFields, ExpensePatch, OneWunError, Result, Workout, WorkoutFields,
};
use tokio::sync::RwLock;
use tracing::debug;

use super::ports::{ExpenseGateway, WorkoutGateway};
use crate::session::SessionService;

/// Expense store.
///
/// Owns the in-memory ordered collection of logged expenses, newest first.
/// Every mutation issues the remote call first and applies the matching
/// local transition only on success; an already-applied transition is never
/// rolled back by a later failure.
pub struct ExpenseService {
    expenses: RwLock<Vec<Expense>>,
    gateway: Arc<dyn ExpenseGateway>,
    workouts: Arc<dyn WorkoutGateway>,
    session: Arc<SessionService>,
}

impl ExpenseService {
    /// Create a new expense store. The collection starts empty; call
    /// [`reload`](Self::reload) whenever the session's credential pair
    /// changes (including on startup).
    pub fn new(
        gateway: Arc<dyn ExpenseGateway>,
        workouts: Arc<dyn WorkoutGateway>,
        session: Arc<SessionService>,
    ) -> Self {
        Self { expenses: RwLock::new(Vec::new()), gateway, workouts, session }
    }

    /// Snapshot of the current collection, newest first.
    pub async fn expenses(&self) -> Vec<Expense> {
        self.expenses.read().await.clone()
    }

    /// Log a new expense and its workouts.
    ///
    /// The expense is created remotely, then prepended locally with the
    /// server key attached. Workouts with a non-empty name are created
    /// sequentially afterwards, parented to the new expense. If a workout
    /// create fails the error propagates but the expense stays, both
    /// remotely and locally - there is no compensating delete.
    ///
    /// # Errors
    /// `Validation` for an out-of-range rating (checked before any remote
    /// call), `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn add_expense(
        &self,
        fields: ExpenseFields,
        workouts: Vec<WorkoutFields>,
    ) -> Result<String> {
        validate_rating(fields.rating)?;
        let scope = self.session.scope().await?;

        let id = self.gateway.create(&scope, &fields).await?;
        debug!(id = %id, "stored expense");

        {
            let mut state = self.expenses.write().await;
            state.insert(0, Expense::from_fields(id.clone(), fields));
        }

        for workout in workouts.iter().filter(|w| !w.name.trim().is_empty()) {
            self.workouts.create(&scope, &id, workout).await?;
        }

        Ok(id)
    }

    /// Replace the whole collection, e.g. after a full reload.
    ///
    /// The incoming sequence arrives in remote insertion order (oldest
    /// first) and is reversed so display order is newest first. The
    /// reversal is part of the contract, not a detail.
    pub async fn set_expenses(&self, mut list: Vec<Expense>) {
        list.reverse();
        let mut state = self.expenses.write().await;
        *state = list;
    }

    /// Fetch the remote collection and replace local state with it.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn reload(&self) -> Result<()> {
        let scope = self.session.scope().await?;
        let list = self.gateway.fetch_all(&scope).await?;
        debug!(count = list.len(), "fetched expenses");
        self.set_expenses(list).await;
        Ok(())
    }

    /// Update an expense with a partial patch.
    ///
    /// The full merged record (prior fields overlaid with the patch) is PUT
    /// remotely, then the same merge is applied locally. Fields absent from
    /// the patch and any loaded workouts are preserved.
    ///
    /// # Errors
    /// `NotFound` (before any remote call) when `id` is not in the local
    /// collection, `Validation` for a bad patched rating, `Auth` when
    /// unauthenticated, or whatever the gateway surfaces.
    pub async fn update_expense(&self, id: &str, patch: &ExpensePatch) -> Result<()> {
        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
        }
        let scope = self.session.scope().await?;

        let merged = {
            let state = self.expenses.read().await;
            let prior = state
                .iter()
                .find(|expense| expense.id == id)
                .ok_or_else(|| OneWunError::NotFound(format!("expense {id}")))?;
            prior.fields().merged(patch)
        };

        self.gateway.update(&scope, id, &merged).await?;

        let mut state = self.expenses.write().await;
        if let Some(existing) = state.iter_mut().find(|expense| expense.id == id) {
            existing.rating = merged.rating;
            existing.date = merged.date;
            existing.description = merged.description;
        }
        Ok(())
    }

    /// Delete an expense remotely, then drop it from local state.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let scope = self.session.scope().await?;
        self.gateway.delete(&scope, id).await?;

        let mut state = self.expenses.write().await;
        state.retain(|expense| expense.id != id);
        Ok(())
    }

    /// Load the workout sub-records for one expense and attach them to the
    /// local record. Workouts live in their own keyspace and are not part
    /// of the expense wire payload.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn load_workouts(&self, expense_id: &str) -> Result<Vec<Workout>> {
        let scope = self.session.scope().await?;
        let list = self.workouts.fetch_all(&scope, expense_id).await?;

        let mut state = self.expenses.write().await;
        if let Some(expense) = state.iter_mut().find(|expense| expense.id == expense_id) {
            expense.workouts = list.clone();
        }
        Ok(list)
    }

    /// Persist edited workouts for an expense: a workout without a server
    /// key is created, one with a key is updated. Sequential; the first
    /// failure propagates and already-saved workouts stay saved.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn save_workouts(&self, expense_id: &str, workouts: &[Workout]) -> Result<()> {
        let scope = self.session.scope().await?;
        for workout in workouts {
            match &workout.id {
                Some(workout_id) => {
                    self.workouts.update(&scope, expense_id, workout_id, &workout.fields()).await?;
                }
                None => {
                    self.workouts.create(&scope, expense_id, &workout.fields()).await?;
                }
            }
        }
        Ok(())
    }

    /// Delete one workout remotely, then drop it from the loaded record.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn delete_workout(&self, expense_id: &str, workout_id: &str) -> Result<()> {
        let scope = self.session.scope().await?;
        self.workouts.delete(&scope, expense_id, workout_id).await?;

        let mut state = self.expenses.write().await;
        if let Some(expense) = state.iter_mut().find(|expense| expense.id == expense_id) {
            expense.workouts.retain(|w| w.id.as_deref() != Some(workout_id));
        }
        Ok(())
    }
}
