//! Locations of the demo's config and log files

use std::path::PathBuf;
use std::sync::OnceLock;

/// Data directory chosen at startup
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Pick the data directory. Call once from main() before anything reads a
/// path; `None` keeps the default `~/.conduit`.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if DATA_DIR.set(path.clone()).is_err() {
        tracing::debug!(path = %path.display(), "Data directory already initialized");
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".conduit"))
        .unwrap_or_else(|| PathBuf::from(".conduit"))
}

/// Base data directory (`~/.conduit` unless overridden)
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// `<data>/logs`
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// `<data>/logs/conduit-grid.log`
pub fn log_file_path() -> PathBuf {
    logs_dir().join("conduit-grid.log")
}

/// `<data>/grid.toml`
pub fn config_path() -> PathBuf {
    data_dir().join("grid.toml")
}
