//! Overlay store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `get`/`upsert` access to persisted reading rows.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - One row per date; `upsert_reading` preserves `created_at` on existing
//!   rows and refreshes `updated_at`.
//! - Rows are never deleted by the core.

use crate::db::DbError;
use crate::model::cards::CARDS_PER_READING;
use crate::model::reading::ReadingRecord;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CARD_SEPARATOR: &str = ",";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for overlay persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reading data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Overlay store interface: durable per-date records shadowing generator
/// output once a date has been touched.
pub trait ReadingRepository {
    /// Pure lookup, no side effects.
    fn get_reading(&self, date: NaiveDate) -> RepoResult<Option<ReadingRecord>>;

    /// Creates or replaces the row for `date`.
    ///
    /// Existing rows keep `created_at` and get `cards`/`message` replaced
    /// with `updated_at` refreshed; new rows get both timestamps set to now.
    fn upsert_reading(
        &self,
        date: NaiveDate,
        cards: &[String],
        message: &str,
    ) -> RepoResult<ReadingRecord>;
}

/// SQLite-backed overlay store.
pub struct SqliteReadingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReadingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReadingRepository for SqliteReadingRepository<'_> {
    fn get_reading(&self, date: NaiveDate) -> RepoResult<Option<ReadingRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, cards, message, created_at, updated_at
             FROM readings
             WHERE date = ?1;",
        )?;

        let mut rows = stmt.query([date_to_db(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reading_row(row)?));
        }

        Ok(None)
    }

    fn upsert_reading(
        &self,
        date: NaiveDate,
        cards: &[String],
        message: &str,
    ) -> RepoResult<ReadingRecord> {
        // Single statement: conflict resolution and read-back cannot
        // interleave with another writer for the same date.
        let mut stmt = self.conn.prepare(
            "INSERT INTO readings (date, cards, message, created_at, updated_at)
             VALUES (?1, ?2, ?3,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000))
             ON CONFLICT(date) DO UPDATE SET
                cards = excluded.cards,
                message = excluded.message,
                updated_at = excluded.updated_at
             RETURNING date, cards, message, created_at, updated_at;",
        )?;

        let mut rows = stmt.query(params![
            date_to_db(date),
            cards.join(CARD_SEPARATOR),
            message
        ])?;
        match rows.next()? {
            Some(row) => parse_reading_row(row),
            None => Err(RepoError::InvalidData(format!(
                "upsert for `{date}` returned no row"
            ))),
        }
    }
}

fn parse_reading_row(row: &Row<'_>) -> RepoResult<ReadingRecord> {
    let date_text: String = row.get("date")?;
    let date = parse_db_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in readings.date"))
    })?;

    let cards_text: String = row.get("cards")?;
    let cards = parse_db_cards(&cards_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid cards value `{cards_text}` in readings.cards"
        ))
    })?;

    Ok(ReadingRecord {
        date,
        cards,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_db_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_db_cards(value: &str) -> Option<Vec<String>> {
    let cards: Vec<String> = value.split(CARD_SEPARATOR).map(str::to_string).collect();
    if cards.len() != CARDS_PER_READING || cards.iter().any(|card| card.is_empty()) {
        return None;
    }
    Some(cards)
}
