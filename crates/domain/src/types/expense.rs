//! Expense and workout types
//!
//! An expense is a logged, rated activity entry (not a monetary record).
//! Workouts are sub-records stored under their own keyspace indexed by
//! expense id; they are loaded lazily and never embedded in the expense
//! wire payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire payload for an expense record (everything except the server key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFields {
    pub rating: f64,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl ExpenseFields {
    /// Merge a partial update into these fields, keeping prior values for
    /// anything the patch leaves unset.
    #[must_use]
    pub fn merged(&self, patch: &ExpensePatch) -> Self {
        Self {
            rating: patch.rating.unwrap_or(self.rating),
            date: patch.date.unwrap_or(self.date),
            description: patch.description.clone().unwrap_or_else(|| self.description.clone()),
        }
    }
}

/// Partial update for an expense. `None` means "keep the prior value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub rating: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// A logged expense with its server key and lazily-loaded workouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Server-assigned key, immutable after create.
    pub id: String,
    pub rating: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    /// Loaded on demand; empty until the store fetches the workout keyspace.
    pub workouts: Vec<Workout>,
}

impl Expense {
    /// Build a local record from a server key and its wire payload.
    #[must_use]
    pub fn from_fields(id: String, fields: ExpenseFields) -> Self {
        Self {
            id,
            rating: fields.rating,
            date: fields.date,
            description: fields.description,
            workouts: Vec::new(),
        }
    }

    /// The wire payload for this record.
    #[must_use]
    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            rating: self.rating,
            date: self.date,
            description: self.description.clone(),
        }
    }
}

/// A single set within a workout. Sets have no identity of their own and are
/// wholly owned by their workout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub reps: String,
    pub rpe: String,
}

/// Wire payload for a workout. `reps`/`rpe` are free-form: numeric meaning
/// is a client-side convention the storage layer does not enforce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFields {
    pub name: String,
    pub reps: String,
    pub rpe: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

/// A workout sub-record. `id` is `None` until the record has been persisted;
/// saving treats `None` as create and `Some` as update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workout {
    pub id: Option<String>,
    pub name: String,
    pub reps: String,
    pub rpe: String,
    pub sets: Vec<WorkoutSet>,
}

impl Workout {
    /// Build a local record from a server key and its wire payload.
    #[must_use]
    pub fn from_fields(id: String, fields: WorkoutFields) -> Self {
        Self {
            id: Some(id),
            name: fields.name,
            reps: fields.reps,
            rpe: fields.rpe,
            sets: fields.sets,
        }
    }

    /// The wire payload for this record.
    #[must_use]
    pub fn fields(&self) -> WorkoutFields {
        WorkoutFields {
            name: self.name.clone(),
            reps: self.reps.clone(),
            rpe: self.rpe.clone(),
            sets: self.sets.clone(),
        }
    }
}
