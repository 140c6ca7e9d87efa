//! Domain model for daily readings.
//!
//! # Responsibility
//! - Define the fixed card catalog and the reading/record shapes shared by
//!   generator, storage and service layers.
//!
//! # Invariants
//! - Every reading holds exactly [`cards::CARDS_PER_READING`] distinct
//!   catalog cards.
//! - A persisted record is uniquely keyed by its calendar date.

pub mod cards;
pub mod reading;
