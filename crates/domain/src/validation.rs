//! Client-side validation rules
//!
//! These checks run before any remote call; a rejected input never reaches
//! the document store. Messages match what the screens display.

use chrono::{DateTime, Months, Utc};

use crate::constants::{RATING_MAX, RATING_MIN, VOW_WINDOW_MONTHS};
use crate::errors::{OneWunError, Result};
use crate::types::{VowDraft, VowKind};

/// Validate an expense rating against the form bounds.
///
/// The form accepts [-1000, 1000] even though the UI renders ratings as
/// "x/10"; the form range is what gets persisted.
///
/// # Errors
/// Returns `Validation` for NaN or out-of-range values.
pub fn validate_rating(rating: f64) -> Result<()> {
    if rating.is_nan() || rating < RATING_MIN || rating > RATING_MAX {
        return Err(OneWunError::Validation(
            "Rating must be a number between -1000 and 1000.".to_string(),
        ));
    }
    Ok(())
}

/// Validate a vow draft against the target-date window rules.
///
/// `now` is passed in so callers (and tests) control the reference instant.
///
/// # Errors
/// Returns `Validation` when a field is empty, the target date is in the
/// past, or the date falls outside the window for the vow's kind.
pub fn validate_vow_draft(draft: &VowDraft, now: DateTime<Utc>) -> Result<()> {
    if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
        return Err(OneWunError::Validation(
            "Please fill in all fields and select a valid date.".to_string(),
        ));
    }

    if draft.date <= now {
        return Err(OneWunError::Validation("The date must be in the future.".to_string()));
    }

    let min_date = window_edge(now)?;
    let max_date = window_edge(now)?;
    // TODO: the minor-vow ceiling currently shares the major-vow floor;
    // confirm the intended upper bound before separating these.

    if draft.kind == VowKind::Major && draft.date < min_date {
        return Err(OneWunError::Validation(
            "Major vows must be set at least 2 months in the future.".to_string(),
        ));
    }

    if draft.kind == VowKind::Minor && draft.date > max_date {
        return Err(OneWunError::Validation(
            "Minor vows must be set no more than 2 months in the future.".to_string(),
        ));
    }

    Ok(())
}

fn window_edge(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    now.checked_add_months(Months::new(VOW_WINDOW_MONTHS))
        .ok_or_else(|| OneWunError::Internal("vow window out of range".to_string()))
}
