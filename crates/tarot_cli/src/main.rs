//! Terminal entry point for daily readings.
//!
//! # Responsibility
//! - Resolve or override a reading against the local overlay store.
//! - Reject malformed dates instead of silently defaulting to today.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tarot_core::db::open_db;
use tarot_core::{ReadingService, SqliteReadingRepository};

#[derive(Parser)]
#[command(name = "tarot", version, about = "Deterministic daily tarot readings")]
struct Cli {
    /// Path to the readings database (default: $DATA_DIR/tarot.db).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the reading for a date (today if omitted).
    Daily {
        /// Date in YYYY-MM-DD form.
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace the stored message for a date; its cards are preserved.
    Override {
        /// Date in YYYY-MM-DD form.
        #[arg(long)]
        date: String,
        /// Replacement message text.
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory `{}`", parent.display()))?;
    }

    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open readings database `{}`", db_path.display()))?;
    let service = ReadingService::new(SqliteReadingRepository::new(&conn));

    match cli.command {
        Command::Daily { date } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Local::now().date_naive(),
            };
            let reading = service.resolve_reading(date)?;
            println!("{}", reading.message);
        }
        Command::Override { date, message } => {
            let date = parse_date(&date)?;
            let record = service.apply_override(date, &message)?;
            println!("{}: {}", record.date, record.message);
        }
    }

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date `{raw}`, expected YYYY-MM-DD"))
}

fn default_db_path() -> PathBuf {
    match std::env::var_os("DATA_DIR") {
        Some(dir) => PathBuf::from(dir).join("tarot.db"),
        None => PathBuf::from("data").join("tarot.db"),
    }
}
