//! Data models and structures

pub mod config;
pub mod grade;
pub mod metric;
pub mod project;
pub mod source;

pub use config::{CohesionMode, CouplingVariant, PartialSettings, Settings, Thresholds, Weights};
pub use grade::{Boundary, Grade, GradeScale, Orientation};
pub use metric::{calculate_mean, MetricKind, MetricOutcome, MetricRecord};
pub use project::{Package, ProjectStructure, ProjectStructureReport};
pub use source::{CallableUnit, ImportStatement, SourceAnalysis};
