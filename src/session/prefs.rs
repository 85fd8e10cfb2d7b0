//! User preferences persisted between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::data_dir;
use crate::error::ChatResult;

/// File name of the preferences inside the data directory.
pub const PREFS_FILE: &str = "prefs.json";

/// Persisted toggles. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Sound cues on or off. On by default.
    pub sfx_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { sfx_enabled: true }
    }
}

impl Preferences {
    /// `~/.retrochat/prefs.json`.
    pub fn default_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join(PREFS_FILE))
    }

    /// Load from `path`; an absent or unreadable file gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> ChatResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_defaults_to_sound_on() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join(PREFS_FILE));
        assert!(prefs.sfx_enabled);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join(PREFS_FILE);

        Preferences { sfx_enabled: false }.save_to(&path).unwrap();

        assert_eq!(
            Preferences::load_from(&path),
            Preferences { sfx_enabled: false }
        );
    }

    #[test]
    fn test_malformed_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(Preferences::load_from(&path).sfx_enabled);

        fs::write(&path, "{}").unwrap();
        assert!(Preferences::load_from(&path).sfx_enabled);
    }
}
