//! Vow and progression types
//!
//! A vow is a long-horizon commitment with a target date. Progressions are
//! incremental steps toward a vow; each one is pending until archived with a
//! completion timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vow classification. Major vows target at least two months out, minor
/// vows no more than two months out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowKind {
    Major,
    Minor,
}

/// Wire payload for a vow record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VowFields {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: VowKind,
    /// Target completion date.
    pub date: DateTime<Utc>,
    /// Creation timestamp, set once and never mutated.
    pub start_date: DateTime<Utc>,
}

/// Caller-supplied vow data; the store stamps `start_date` at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct VowDraft {
    pub title: String,
    pub description: String,
    pub kind: VowKind,
    pub date: DateTime<Utc>,
}

impl VowDraft {
    /// Promote the draft to a wire payload with the given creation instant.
    #[must_use]
    pub fn into_fields(self, start_date: DateTime<Utc>) -> VowFields {
        VowFields {
            title: self.title,
            description: self.description,
            kind: self.kind,
            date: self.date,
            start_date,
        }
    }
}

/// A vow with its server key.
#[derive(Debug, Clone, PartialEq)]
pub struct Vow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: VowKind,
    pub date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
}

impl Vow {
    /// Build a local record from a server key and its wire payload.
    #[must_use]
    pub fn from_fields(id: String, fields: VowFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            kind: fields.kind,
            date: fields.date,
            start_date: fields.start_date,
        }
    }

    /// The wire payload for this record.
    #[must_use]
    pub fn fields(&self) -> VowFields {
        VowFields {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            date: self.date,
            start_date: self.start_date,
        }
    }
}

/// Wire payload for a progression. A pending progression carries no
/// `completedDate` key at all, so the field round-trips as `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionFields {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

/// An incremental step toward a vow. Lives in exactly one of the per-vow
/// pending or completed collections, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub id: String,
    pub text: String,
    /// Set when the progression is archived; cleared again on undo.
    pub completed_date: Option<DateTime<Utc>>,
}

impl Progression {
    /// Build a local record from a server key and its wire payload.
    #[must_use]
    pub fn from_fields(id: String, fields: ProgressionFields) -> Self {
        Self { id, text: fields.text, completed_date: fields.completed_date }
    }

    /// The wire payload for this record.
    #[must_use]
    pub fn fields(&self) -> ProgressionFields {
        ProgressionFields { text: self.text.clone(), completed_date: self.completed_date }
    }
}
