//! Logical length of callables, averaged per module

use tracing::debug;

use super::{measure_callables, Metric};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::grade::{Boundary, GradeScale};
use crate::models::metric::{MetricKind, MetricOutcome};
use crate::models::project::ProjectStructureReport;

pub const DEFAULT_SCALE: GradeScale = GradeScale::lower_is_better([
    Boundary::at_most(15.0),
    Boundary::at_most(25.0),
    Boundary::at_most(40.0),
    Boundary::below(60.0),
]);

const SUGGESTIONS: &[&str] = &[
    "**Extract helpers:** identify self-contained blocks inside the function and move them into well-named private helper functions",
    "**Apply the Single Responsibility Principle (SRP):** check whether the function performs several independent steps (validation, calculation, persistence) and split it along them",
    "**Reduce complexity:** long functions usually come with high cyclomatic complexity. Removing branches and nesting shortens them as well",
];

pub struct CallableLength {
    scale: GradeScale,
    outcome: MetricOutcome,
}

impl CallableLength {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_SCALE)
    }

    pub fn with_scale(scale: GradeScale) -> Self {
        Self {
            scale,
            outcome: MetricOutcome::default(),
        }
    }
}

impl Default for CallableLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for CallableLength {
    fn kind(&self) -> MetricKind {
        MetricKind::CallableLength
    }

    fn name(&self) -> &str {
        "Function Length"
    }

    fn description(&self) -> &str {
        "Measures the size of the functions of a module as logical lines of code, without comments and blank lines. Excessive length often indicates a violation of the Single Responsibility Principle (SRP), harder maintenance, lower readability and potentially high complexity."
    }

    fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        debug!("calculating function length");
        self.outcome = measure_callables(
            self.kind(),
            &self.scale,
            report,
            loader,
            |callable| callable.logical_lines as f64,
            |callable, score, grade| {
                format!("Function `{}` has {} lines ({})", callable.name, score, grade)
            },
        );
        Ok(())
    }

    fn outcome(&self) -> &MetricOutcome {
        &self.outcome
    }

    fn suggestions(&self) -> &[&'static str] {
        SUGGESTIONS
    }
}
