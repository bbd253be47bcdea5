//! Error handling for archscore
//!
//! Error types, the crate-wide result alias, and helpers for attaching
//! context to lower-level failures.

pub mod context;
pub mod types;

pub use context::{handle_error, ResultExt};
pub use types::{ArchScoreError, ErrorSeverity, Result};
