//! McCabe cyclomatic complexity per callable, averaged per module

use tracing::debug;

use super::{measure_callables, Metric};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::grade::{Boundary, GradeScale};
use crate::models::metric::{MetricKind, MetricOutcome};
use crate::models::project::ProjectStructureReport;

/// `(20, 30]` is Okay; 30 itself never reaches Not good
pub const DEFAULT_SCALE: GradeScale = GradeScale::lower_is_better([
    Boundary::at_most(10.0),
    Boundary::at_most(20.0),
    Boundary::at_most(30.0),
    Boundary::at_most(40.0),
]);

const SUGGESTIONS: &[&str] = &[
    "**Extract functions:** split a complex function into smaller, specialised ones. Each extracted function should ideally stay below a complexity of 10",
    "**Avoid deep nesting:** reduce nested `if` statements, e.g. with early returns for error cases or invalid states",
    "**Use polymorphism:** when branches depend on different types or states, dispatch through interfaces instead of explicit type or state checks",
    "**Isolate error handling:** move `try/catch` handling into dedicated layers or wrapper functions",
];

pub struct CyclomaticComplexity {
    scale: GradeScale,
    outcome: MetricOutcome,
}

impl CyclomaticComplexity {
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

impl Default for CyclomaticComplexity {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for CyclomaticComplexity {
    fn kind(&self) -> MetricKind {
        MetricKind::CyclomaticComplexity
    }

    fn name(&self) -> &str {
        "Cyclomatic Complexity"
    }

    fn description(&self) -> &str {
        "Measures the cyclomatic complexity of a function from the **number of independent paths** through its control flow, following McCabe. A high value, caused for example by many branches, points to a function that is hard to understand, error-prone and expensive to test."
    }

    fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        debug!("calculating cyclomatic complexity");
        self.outcome = measure_callables(
            self.kind(),
            &self.scale,
            report,
            loader,
            |callable| f64::from(callable.cyclomatic_complexity),
            |callable, score, grade| {
                format!(
                    "Function {} has a cyclomatic complexity of {} ({})",
                    callable.name, score, grade
                )
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
