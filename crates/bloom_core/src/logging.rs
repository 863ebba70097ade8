//! File-based logging bootstrap.
//!
//! The terminal is the user interface, so log records only ever go to
//! rotating files under the data directory. Initialization happens at most
//! once per process.

use crate::error::AppError;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "bloom";
const LOG_DIR_NAME: &str = "logs";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const SUPPORTED_LEVELS: [&str; 6] = ["error", "warn", "info", "debug", "trace", "off"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Directory that receives log files for a given data directory.
pub fn log_dir_for(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_DIR_NAME)
}

/// Starts file logging at `level` into `log_dir`.
///
/// Repeating the call with the same arguments is a no-op; switching level or
/// directory afterwards is rejected.
///
/// # Errors
/// - `invalid_input` for an unsupported level or a conflicting re-init.
/// - `io_error` when the directory cannot be created or the backend fails.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), AppError> {
    let level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, AppError> {
        std::fs::create_dir_all(log_dir)
            .map_err(|err| AppError::io(format!("{}: {}", log_dir.display(), err)))?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| AppError::invalid_input(format!("invalid log level `{level}`: {err}")))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::Direct)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| AppError::io(format!("failed to start logger: {err}")))?;

        info!(
            "event=app_start module=logging platform={} version={} level={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION"),
            level
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(AppError::invalid_input(format!(
            "logging already initialized at `{}`",
            state.log_dir.display()
        )));
    }
    if state.level != level {
        return Err(AppError::invalid_input(format!(
            "logging already initialized with level `{}`",
            state.level
        )));
    }

    Ok(())
}

/// Returns `(level, log_dir)` once logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

pub fn normalize_level(level: &str) -> Result<&'static str, AppError> {
    let wanted = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .copied()
        .find(|candidate| *candidate == wanted)
        .ok_or_else(|| {
            AppError::invalid_input(format!(
                "unsupported log level `{}`; expected one of {}",
                level.trim(),
                SUPPORTED_LEVELS.join("|")
            ))
        })
}
