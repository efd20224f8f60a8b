//! Diagnostic logging
//!
//! The terminal belongs to the session, so log output only goes to a file.
//! Nothing is installed unless a log file is requested, and every `tracing`
//! call in the crate is then a no-op.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a log file when `--log-file` is not given
pub const LOG_FILE_ENV: &str = "SEPA_VIEW_LOG_FILE";

/// Environment variable holding the filter directive, e.g. `debug`
pub const LOG_FILTER_ENV: &str = "SEPA_VIEW_LOG";

const DEFAULT_FILTER: &str = "info";

/// Pick the log file: the explicit path wins over the environment
#[must_use]
pub fn resolve_log_file(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(LOG_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Build the filter from `SEPA_VIEW_LOG`, falling back to `info`
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber appending to `path`
///
/// # Errors
///
/// Returns a message if the file cannot be opened or a subscriber is
/// already installed.
pub fn init(path: &Path) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file '{}': {e}", path.display()))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
