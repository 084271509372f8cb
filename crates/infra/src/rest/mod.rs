//! Remote document store access
//!
//! [`DocumentStoreClient`] speaks the raw wire protocol
//! (`<base>/<collection>/<userId>[/<parent>][/<id>].json?auth=<token>`);
//! the per-resource clients implement the core gateway ports on top of it.

mod client;
mod expenses;
mod progressions;
mod vows;
mod workouts;

pub use client::DocumentStoreClient;
pub use expenses::ExpensesClient;
pub use progressions::ProgressionsClient;
pub use vows::VowsClient;
pub use workouts::WorkoutsClient;
