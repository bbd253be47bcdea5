//! Command-line interface components

pub mod args;
pub mod commands;

pub use args::Args;
pub use commands::{analyze, exit_code, init_config, report_error, Command, RunOutcome};
