//! Reading and overlay record shapes.
//!
//! # Responsibility
//! - Define the result type returned to callers and the persisted overlay
//!   row shadowing generated output for a date.
//!
//! # Invariants
//! - `date` carries day granularity only, no time component, no timezone.
//! - `message` literally contains every entry of `cards`.
//! - Record timestamps are informational; resolution logic never reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The card set and message resolved for one calendar date.
///
/// Card order matters for display; the set identity is what determinism
/// guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Exactly three distinct catalog cards, in draw order.
    pub cards: Vec<String>,
    /// Rendered message mentioning every card in `cards`.
    pub message: String,
}

/// Persisted overlay row for one date.
///
/// Created on first resolution or first operator edit, updated in place on
/// later edits. The store owns these exclusively; the generator never
/// aliases stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRecord {
    /// Unique key.
    pub date: NaiveDate,
    /// Cards as originally generated (or preserved across edits).
    pub cards: Vec<String>,
    /// Message, possibly operator-edited.
    pub message: String,
    /// Unix epoch milliseconds at row creation.
    pub created_at: i64,
    /// Unix epoch milliseconds at last write.
    pub updated_at: i64,
}

impl ReadingRecord {
    /// Projects the stored row into the caller-facing reading shape.
    pub fn into_reading(self) -> Reading {
        Reading {
            date: self.date,
            cards: self.cards,
            message: self.message,
        }
    }
}
