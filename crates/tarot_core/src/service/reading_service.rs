//! Reading resolution and operator override use cases.
//!
//! # Responsibility
//! - Resolve a date to a reading: overlay row wins, otherwise generate,
//!   persist, and return (cache-and-persist-on-first-read).
//! - Apply operator overrides: message is replaceable, cards are set once
//!   and then frozen.
//!
//! # Invariants
//! - An existing overlay row is returned verbatim; no merge, no
//!   re-validation against the generator.
//! - Storage failures propagate unchanged; there is no fallback value for
//!   persisted operator intent.

use crate::generator::compute_reading;
use crate::model::reading::{Reading, ReadingRecord};
use crate::repo::reading_repo::{ReadingRepository, RepoResult};
use chrono::NaiveDate;
use log::info;

/// Use-case service tying the generator to an overlay store handle.
///
/// The store is passed in explicitly so the core stays testable with an
/// in-memory implementation of [`ReadingRepository`].
pub struct ReadingService<R: ReadingRepository> {
    repo: R,
}

impl<R: ReadingRepository> ReadingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Resolves the reading for a date.
    ///
    /// # Contract
    /// - Overlay hit: stored cards and message returned verbatim.
    /// - Overlay miss: compute, upsert, return the persisted values.
    pub fn resolve_reading(&self, date: NaiveDate) -> RepoResult<Reading> {
        if let Some(record) = self.repo.get_reading(date)? {
            info!("event=resolve_reading module=service status=ok date={date} source=overlay");
            return Ok(record.into_reading());
        }

        let generated = compute_reading(date);
        let record = self
            .repo
            .upsert_reading(date, &generated.cards, &generated.message)?;
        info!("event=resolve_reading module=service status=ok date={date} source=generated");
        Ok(record.into_reading())
    }

    /// Replaces the message for a date, preserving its cards.
    ///
    /// # Contract
    /// - Existing row: cards kept as stored.
    /// - Absent row: cards generated exactly as the read path would have,
    ///   folded into a single upsert.
    pub fn apply_override(&self, date: NaiveDate, new_message: &str) -> RepoResult<ReadingRecord> {
        let cards = match self.repo.get_reading(date)? {
            Some(existing) => existing.cards,
            None => compute_reading(date).cards,
        };

        let record = self.repo.upsert_reading(date, &cards, new_message)?;
        info!("event=apply_override module=service status=ok date={date}");
        Ok(record)
    }
}
