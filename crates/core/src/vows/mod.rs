//! Vow store: long-horizon commitments and their pending/completed
//! progression collections.

pub mod ports;
mod service;

pub use service::VowService;
