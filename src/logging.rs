//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to `~/.retrochat/retrochat.log`;
//! the headless mock server logs to stdout.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{data_dir, DEFAULT_LOG_FILTER};

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "retrochat.log";

/// `~/.retrochat/retrochat.log`.
pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(LOG_FILE))
}

/// Parse `directives`, falling back to the default filter when invalid.
pub fn filter_from(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Append logs to `path`, creating its directory. A subscriber that is
/// already installed is left alone.
pub fn init_file_logging(path: &Path, directives: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::registry()
        .with(filter_from(directives))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
    Ok(())
}

/// Log to stdout.
pub fn init_stdout_logging(directives: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter_from(directives))
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_falls_back() {
        let filter = filter_from("retrochat=loud");
        assert_eq!(filter.to_string(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_file_logging_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join(LOG_FILE);
        init_file_logging(&path, "retrochat=debug").unwrap();
        assert!(path.exists());
    }
}
