//! Core logging bootstrap.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Keep `event=... module=... status=...` diagnostics usable from any
//!   binary embedding the core.
//!
//! # Invariants
//! - Initialization is idempotent for the same directory.
//! - Re-initialization with a different directory or level is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "tarot";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: String,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Default log level used by binaries when none is configured.
pub fn default_log_level() -> &'static str {
    "info"
}

/// Initializes rolling file logging with the given level and directory.
///
/// Returns `Ok(())` when logging is active, or a human-readable error
/// string when initialization fails.
///
/// # Errors
/// - Unsupported `level` spec.
/// - `log_dir` cannot be created.
/// - Logger backend setup failure.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested_dir = PathBuf::from(log_dir);

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir != requested_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                state.log_dir.display(),
                requested_dir.display()
            ));
        }
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{level}`",
                state.level
            ));
        }
        return Ok(());
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, String> {
            std::fs::create_dir_all(&requested_dir).map_err(|err| {
                format!(
                    "failed to create log directory `{}`: {err}",
                    requested_dir.display()
                )
            })?;

            let logger = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_file(
                    FileSpec::default()
                        .directory(requested_dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;

            info!(
                "event=core_init module=core status=ok level={level} log_dir={} version={}",
                requested_dir.display(),
                env!("CARGO_PKG_VERSION")
            );

            Ok(LoggingState {
                level: level.to_string(),
                log_dir: requested_dir,
                _logger: logger,
            })
        })
        .map(|_| ())
}
