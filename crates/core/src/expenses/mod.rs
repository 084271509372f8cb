//! Expense store: the ordered collection of logged ratings and their
//! workout sub-records.

pub mod ports;
mod service;

pub use service::ExpenseService;
