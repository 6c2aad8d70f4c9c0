use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR_NAME;
use crate::error::AppError;

const LOG_FILE_NAME: &str = "grid-snake.log";

/// Returns the platform-correct log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Builds the filter: `RUST_LOG` wins over the configured directive.
pub fn build_filter(directive: &str) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(directive)
        .map_err(|error| AppError::Logging(format!("invalid filter {directive:?}: {error}")))
}

/// Installs a global subscriber appending plain-text events to `path`.
///
/// The terminal belongs to the game screen, so nothing is written to stdout.
pub fn init_logging(path: &Path, directive: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = build_filter(directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{build_filter, log_path};

    #[test]
    fn log_file_lives_in_app_directory() {
        let path = log_path();

        assert!(path.ends_with("grid-snake/grid-snake.log"));
    }

    #[test]
    fn valid_directives_build_a_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        assert!(build_filter("info").is_ok());
        assert!(build_filter("grid_snake=debug").is_ok());
        assert!(build_filter("grid_snake=loud").is_err());
    }
}
