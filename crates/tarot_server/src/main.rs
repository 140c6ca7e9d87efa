//! HTTP service entry point.
//!
//! # Responsibility
//! - Parse flags, bootstrap logging and storage, and hand the shared
//!   state to the router.

mod server;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;
use tarot_core::db::open_db;
use tarot_core::{default_log_level, init_logging};
use tokio::sync::Mutex;

use server::{run_server, AppState};

#[derive(Parser)]
#[command(name = "tarotd", version, about = "Daily tarot reading HTTP service")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// Path to the readings database (default: $DATA_DIR/tarot.db).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Log level spec passed to the logger.
    #[arg(long, default_value = default_log_level())]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, &args.log_dir).map_err(anyhow::Error::msg)?;

    let db_path = args.db.unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory `{}`", parent.display()))?;
    }
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open readings database `{}`", db_path.display()))?;

    let admin_password = std::env::var("ADMIN_PASSWORD").ok();
    if admin_password.is_none() {
        warn!("event=server_start module=server status=degraded detail=admin_password_unset");
    }

    let state = AppState {
        conn: Arc::new(Mutex::new(conn)),
        admin_password,
    };

    run_server(&args.bind, state).await
}

fn default_db_path() -> PathBuf {
    match std::env::var_os("DATA_DIR") {
        Some(dir) => PathBuf::from(dir).join("tarot.db"),
        None => PathBuf::from("data").join("tarot.db"),
    }
}
