//! Report rendering, console output and progress

mod progress;
mod report;
mod summary;
mod writers;

pub use self::progress::ProgressReporter;
pub use self::report::{
    render_detailed, render_module_scores, render_report, ReportWriter, DETAILED_DIR, MODULES_DIR, REPORT_FILE,
};
pub use self::summary::TextFormatter;
pub use self::writers::{FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::quality::QualityAnalyzer;

/// Renders analysis results for display
pub trait Formatter {
    fn format(&self, analyzer: &QualityAnalyzer) -> Result<String>;
}
