//! Domain data types
//!
//! Local records carry a server-assigned `id` alongside their fields; the
//! `*Fields` structs are the wire payloads (camelCase keys, RFC 3339 dates)
//! exchanged with the remote document store.

pub mod expense;
pub mod session;
pub mod vow;

pub use expense::{Expense, ExpenseFields, ExpensePatch, Workout, WorkoutFields, WorkoutSet};
pub use session::{AuthTokens, RefreshedTokens, UserScope};
pub use vow::{Progression, ProgressionFields, Vow, VowDraft, VowFields, VowKind};
