//! Logging setup
//!
//! Two layers: a human readable one on stderr (`warn` by default, `debug`
//! with `--verbose`, `error` with `--quiet`, `RUST_LOG` wins when set) and
//! a plain-text debug log file.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{ArchScoreError, Result};
use crate::models::config::Settings;

/// Default stderr level for the given settings
pub fn default_level(settings: &Settings) -> &'static str {
    if settings.quiet {
        "error"
    } else if settings.verbose {
        "debug"
    } else {
        "warn"
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ArchScoreError::Logging {
                message: format!("cannot create {}: {}", parent.display(), e),
            })?;
        }
    }
    File::create(path).map_err(|e| ArchScoreError::Logging {
        message: format!("cannot open log file {}: {}", path.display(), e),
    })
}

/// Install the global subscriber
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(settings)));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(settings.use_colors)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = match &settings.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ArchScoreError::Logging { message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_level() {
        let mut settings = Settings::default();
        assert_eq!(default_level(&settings), "warn");
        settings.verbose = true;
        assert_eq!(default_level(&settings), "debug");
        settings.quiet = true;
        assert_eq!(default_level(&settings), "error");
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("debug.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_open_log_file_fails_on_blocked_parent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();
        let result = open_log_file(&blocker.join("debug.log"));
        assert!(matches!(result, Err(ArchScoreError::Logging { .. })));
    }
}
