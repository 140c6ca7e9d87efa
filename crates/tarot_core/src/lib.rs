//! Core domain logic for deterministic daily tarot readings.
//! This crate is the single source of truth for the generation and
//! overlay-store invariants.

pub mod db;
pub mod generator;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use generator::{compute_reading, draw_cards, seed_from_date};
pub use logging::{default_log_level, init_logging};
pub use model::cards::{is_catalog_card, CARDS_PER_READING, CARD_CATALOG};
pub use model::reading::{Reading, ReadingRecord};
pub use repo::reading_repo::{
    ReadingRepository, RepoError, RepoResult, SqliteReadingRepository,
};
pub use service::reading_service::ReadingService;
