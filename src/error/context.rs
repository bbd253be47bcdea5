//! Error context and severity handling

use crate::error::{ArchScoreError, ErrorSeverity, Result};
use tracing::{error, warn};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T> {
    /// Wrap the error in an analysis error prefixed with `context`
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| ArchScoreError::analysis_error(format!("{}: {}", context(), err)))
    }
}

/// Log an error at its severity
///
/// Warnings and regular errors are swallowed; critical errors are handed back
/// to the caller.
pub fn handle_error(err: ArchScoreError) -> Option<ArchScoreError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            error!("critical: {}", message);
            Some(err)
        }
    }
}
