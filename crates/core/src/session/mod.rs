//! Auth/session supervisor: the live credential pair, its expiry, and the
//! bootstrap sequence that restores a persisted session at startup.

pub mod ports;
mod service;

pub use service::{SessionService, KEY_REFRESH_TOKEN, KEY_TOKEN, KEY_TOKEN_EXPIRATION, KEY_USER_ID};
