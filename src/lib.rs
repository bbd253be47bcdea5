//! archscore - maintainability assessment for TypeScript/JavaScript projects
//!
//! The crate discovers the modules of a project, measures five metrics over
//! them (cyclomatic complexity, function length, method-name cohesion,
//! coupling and propagation cost), grades each on a five-step scale and
//! aggregates the grades into maintainability sub-characteristics. Results
//! are written as `project-structure.json` and a set of Markdown reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod output;
pub mod parsers;
pub mod quality;
pub mod utils;

// Re-export commonly used types
pub use error::{handle_error, ArchScoreError, ErrorSeverity, Result, ResultExt};
pub use metrics::{Metric, MetricComponent};
pub use models::{
    config::Settings,
    grade::{Grade, GradeScale},
    metric::{MetricKind, MetricRecord},
    project::{Package, ProjectStructureReport},
};
pub use quality::{QualityAnalyzer, SubCharacteristic};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
