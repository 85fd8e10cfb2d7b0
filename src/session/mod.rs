//! Persistent session identifier.
//!
//! The answer source keys conversation memory on an opaque session id. One is
//! generated on first use and kept in `~/.retrochat/session_id` so later runs
//! continue the same conversation.

mod prefs;

pub use prefs::Preferences;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::data_dir;

/// File name of the stored session id inside the data directory.
pub const SESSION_FILE: &str = "session_id";

/// Loads or creates the session id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Store at `~/.retrochat/session_id`; memory-only without a home dir.
    pub fn new() -> Self {
        Self {
            path: data_dir().map(|dir| dir.join(SESSION_FILE)),
        }
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The stored id, creating and persisting a fresh one if none exists.
    ///
    /// Storage problems never fail the call: a fresh id is returned and the
    /// problem is logged, so the conversation just won't survive a restart.
    pub fn session_id(&self) -> String {
        let Some(path) = &self.path else {
            return generate_session_id();
        };

        if let Ok(existing) = fs::read_to_string(path) {
            let existing = existing.trim();
            if !existing.is_empty() {
                return existing.to_string();
            }
        }

        let id = generate_session_id();
        if let Err(e) = write_id(path, &id) {
            tracing::warn!(path = %path.display(), error = %e, "could not persist session id");
        } else {
            tracing::info!(path = %path.display(), "created new session id");
        }
        id
    }
}

fn write_id(path: &Path, id: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, id)
}

/// A random UUID followed by `-` and the current Unix time in milliseconds,
/// base 36.
pub fn generate_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    format!("{}-{}", uuid::Uuid::new_v4(), to_base36(millis))
}

/// Lower-case base-36 rendering of `n`.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
