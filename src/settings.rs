use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{Speed, APP_DIR_NAME};
use crate::error::SettingsError;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// User-tunable runtime settings.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Speed used when a session is started from the command line.
    pub speed: Speed,
    /// `tracing` filter directive, e.g. `info` or `grid_snake=debug`.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// Returns defaults when the file does not exist. Returns `Err` when it
/// exists but cannot be read or parsed, so the caller can report it before
/// entering raw terminal mode.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
