//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! sync core.

// Session lifetime
pub const TOKEN_TTL_SECS: i64 = 3600;
pub const REFRESH_WINDOW_SECS: i64 = 60;

// Expense form bounds. The entry form accepts the full range even though the
// UI renders ratings as "x/10"; the form range is what the backend sees.
pub const RATING_MIN: f64 = -1000.0;
pub const RATING_MAX: f64 = 1000.0;

// Vow target-date window
pub const VOW_WINDOW_MONTHS: u32 = 2;

// HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
