//! Deterministic daily reading generator.
//!
//! # Responsibility
//! - Map a calendar date to three distinct catalog cards and a rendered
//!   message, with no I/O and no state.
//!
//! # Invariants
//! - Same date always yields the same cards and message, across processes
//!   and restarts.
//! - Seed derivation and the draw procedure are a frozen compatibility
//!   contract: changing either changes the output of every date that has
//!   no overlay row yet.

use crate::model::cards::{CARDS_PER_READING, CARD_CATALOG};
use crate::model::reading::Reading;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Static insight clause appended to every generated message.
const DAILY_INSIGHT: &str = "Stay balanced and keep your intent clear.";

/// Derives the integer seed for a date.
///
/// SHA-256 over the UTF-8 bytes of the canonical `YYYY-MM-DD` string; the
/// first 16 hex characters of the digest, read as a base-16 integer. The
/// first 8 digest bytes in big-endian order are that same value.
pub fn seed_from_date(date: NaiveDate) -> u64 {
    let canonical = date.format("%Y-%m-%d").to_string();
    let digest = Sha256::digest(canonical.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Draws three distinct cards from the catalog, preserving draw order.
///
/// Partial Fisher-Yates over catalog indices with a seeded `StdRng`. The
/// sequence is a pure function of the seed.
pub fn draw_cards(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool: Vec<usize> = (0..CARD_CATALOG.len()).collect();
    let mut drawn = Vec::with_capacity(CARDS_PER_READING);
    for _ in 0..CARDS_PER_READING {
        let pick = rng.random_range(0..pool.len());
        drawn.push(CARD_CATALOG[pool.swap_remove(pick)].to_string());
    }
    drawn
}

/// Computes the deterministic reading for a date.
///
/// Total function: every representable date produces a reading. The message
/// lists every drawn card, comma-separated and in draw order, followed by a
/// static insight clause.
pub fn compute_reading(date: NaiveDate) -> Reading {
    let cards = draw_cards(seed_from_date(date));
    let message = format!("Today's cards: {}. Insight: {}", cards.join(", "), DAILY_INSIGHT);
    Reading {
        date,
        cards,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_sha256_prefix_of_canonical_date() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 11).unwrap();
        // sha256("2025-09-11") starts with c6895f0109c89711.
        assert_eq!(seed_from_date(date), 0xc689_5f01_09c8_9711);

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // sha256("2024-01-01") starts with 41b62fb4518505d3.
        assert_eq!(seed_from_date(date), 0x41b6_2fb4_5185_05d3);
    }

    #[test]
    fn same_seed_draws_same_cards() {
        assert_eq!(draw_cards(42), draw_cards(42));
    }
}
