//! Identity service access

mod client;

pub use client::IdentityClient;
