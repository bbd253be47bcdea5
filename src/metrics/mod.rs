//! Metric components
//!
//! Every metric follows the same contract: `calculate` fills the detail and
//! issue lists plus the aggregate score and grade, `write_result` renders a
//! report fragment from that stored state only, and `interprete_score` maps
//! a raw value onto the grade scale.

pub mod cohesion;
pub mod complexity;
pub mod coupling;
pub mod length;
pub mod propagation;

pub use cohesion::MethodNameCohesion;
pub use complexity::CyclomaticComplexity;
pub use coupling::Coupling;
pub use length::CallableLength;
pub use propagation::PropagationCost;

use tracing::{debug, warn};

use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::config::Settings;
use crate::models::grade::{Grade, GradeScale};
use crate::models::metric::{calculate_mean, format_score, MetricKind, MetricOutcome, MetricRecord};
use crate::models::project::ProjectStructureReport;
use crate::models::source::CallableUnit;

/// Uniform contract of the five metric components
pub trait Metric {
    fn kind(&self) -> MetricKind;

    /// Display name used in reports
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn scale(&self) -> &GradeScale;

    /// Measure every module of the project, replacing any previous state
    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()>;

    fn outcome(&self) -> &MetricOutcome;

    /// Improvement hints printed under the problem-module table
    fn suggestions(&self) -> &[&'static str];

    fn interprete_score(&self, score: f64) -> Grade {
        self.scale().interpret(score)
    }

    /// Report fragment built from the last `calculate`
    fn write_result(&self) -> String {
        render_result(self)
    }
}

/// Render legend, problem modules and suggestions of a metric
pub fn render_result<M: Metric + ?Sized>(metric: &M) -> String {
    let outcome = metric.outcome();
    let overall = match outcome.grade {
        Some(grade) => format!("{} (score {})", grade, format_score(outcome.score)),
        None => "n/a".to_string(),
    };

    let mut lines = vec![
        format!("**{}**", metric.name()),
        String::new(),
        format!("*Description: {}*", metric.description()),
        String::new(),
        format!("Overall grade: {}", overall),
        String::new(),
        "**Score interpretation:**".to_string(),
        "| Score | Grade |".to_string(),
        "| -------- | -------- |".to_string(),
    ];
    for (range, grade) in metric.scale().legend() {
        lines.push(format!("| {} | {} |", range, grade));
    }

    lines.push(String::new());
    lines.push("**Problem modules:**".to_string());
    lines.push("| Module | Score | Description |".to_string());
    lines.push("| -------- | -------- | -------- |".to_string());
    let issues = outcome.issues_worst_first();
    if issues.is_empty() {
        lines.push("no problem modules found".to_string());
    }
    for issue in issues {
        lines.push(format!(
            "| {} | {:.2} ({}) | {} |",
            issue.file_path.display(),
            issue.module_score,
            issue.grade,
            issue.details.as_deref().unwrap_or("")
        ));
    }

    lines.push("-----".to_string());
    lines.push("**Suggestions:**".to_string());
    for suggestion in metric.suggestions() {
        lines.push(format!("- {}", suggestion));
    }

    lines.join("\n")
}

/// The five metrics as one closed set
pub enum MetricComponent {
    CyclomaticComplexity(CyclomaticComplexity),
    CallableLength(CallableLength),
    Cohesion(MethodNameCohesion),
    Coupling(Coupling),
    PropagationCost(PropagationCost),
}

impl MetricComponent {
    /// Metric of `kind`, configured from settings
    pub fn from_settings(kind: MetricKind, settings: &Settings) -> Self {
        let thresholds = &settings.thresholds;
        match kind {
            MetricKind::CyclomaticComplexity => MetricComponent::CyclomaticComplexity(
                CyclomaticComplexity::with_scale(
                    complexity::DEFAULT_SCALE.overridden(thresholds.cyclomatic_complexity.as_ref()),
                ),
            ),
            MetricKind::CallableLength => MetricComponent::CallableLength(CallableLength::with_scale(
                length::DEFAULT_SCALE.overridden(thresholds.callable_length.as_ref()),
            )),
            MetricKind::Cohesion => MetricComponent::Cohesion(
                MethodNameCohesion::new(settings.cohesion_mode)
                    .with_scale(cohesion::DEFAULT_SCALE.overridden(thresholds.cohesion.as_ref())),
            ),
            MetricKind::Coupling => MetricComponent::Coupling(
                Coupling::new(settings.coupling_variant)
                    .with_scale(coupling::DEFAULT_SCALE.overridden(thresholds.coupling.as_ref())),
            ),
            MetricKind::PropagationCost => MetricComponent::PropagationCost(PropagationCost::with_scale(
                propagation::DEFAULT_SCALE.overridden(thresholds.propagation_cost.as_ref()),
            )),
        }
    }

    pub fn as_metric(&self) -> &dyn Metric {
        match self {
            MetricComponent::CyclomaticComplexity(metric) => metric,
            MetricComponent::CallableLength(metric) => metric,
            MetricComponent::Cohesion(metric) => metric,
            MetricComponent::Coupling(metric) => metric,
            MetricComponent::PropagationCost(metric) => metric,
        }
    }

    pub fn as_metric_mut(&mut self) -> &mut dyn Metric {
        match self {
            MetricComponent::CyclomaticComplexity(metric) => metric,
            MetricComponent::CallableLength(metric) => metric,
            MetricComponent::Cohesion(metric) => metric,
            MetricComponent::Coupling(metric) => metric,
            MetricComponent::PropagationCost(metric) => metric,
        }
    }
}

impl Metric for MetricComponent {
    fn kind(&self) -> MetricKind {
        self.as_metric().kind()
    }

    fn name(&self) -> &str {
        self.as_metric().name()
    }

    fn description(&self) -> &str {
        self.as_metric().description()
    }

    fn scale(&self) -> &GradeScale {
        self.as_metric().scale()
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        self.as_metric_mut().calculate(report, loader)
    }

    fn outcome(&self) -> &MetricOutcome {
        self.as_metric().outcome()
    }

    fn suggestions(&self) -> &[&'static str] {
        self.as_metric().suggestions()
    }

    fn write_result(&self) -> String {
        self.as_metric().write_result()
    }
}

/// Shared driver for metrics measured per callable and averaged per module
///
/// `describe` produces the issue text of a single callable whose own grade
/// is a problem grade; a module becomes an issue when any callable does.
pub(crate) fn measure_callables<F, D>(
    kind: MetricKind,
    scale: &GradeScale,
    report: &ProjectStructureReport,
    loader: &mut SourceLoader,
    measure: F,
    describe: D,
) -> MetricOutcome
where
    F: Fn(&CallableUnit) -> f64,
    D: Fn(&CallableUnit, f64, Grade) -> String,
{
    let mut outcome = MetricOutcome::default();
    let mut module_scores = Vec::new();

    for (path, name) in report.modules() {
        let analysis = loader.load_or_empty(path);
        if analysis.callables.is_empty() {
            warn!("{}: {} has no callables, skipped", kind, path.display());
            continue;
        }

        let mut scores = Vec::with_capacity(analysis.callables.len());
        let mut problems = Vec::new();
        for callable in &analysis.callables {
            let score = measure(callable);
            let grade = scale.interpret(score);
            if grade.is_problem() {
                problems.push(describe(callable, score, grade));
            }
            scores.push(score);
        }

        let Some(module_score) = calculate_mean(&scores) else {
            continue;
        };
        let grade = scale.interpret(module_score);
        debug!("{}: {} scored {:.2} ({})", kind, path.display(), module_score, grade);

        let record = MetricRecord::new(path, name, module_score, grade);
        if !problems.is_empty() {
            outcome.issues.push(record.clone().with_details(problems.join("; ")));
        }
        outcome.details.push(record);
        module_scores.push(module_score);
    }

    finish_outcome(&mut outcome, scale, &module_scores);
    outcome
}

/// Set the aggregate score and grade from the module scores
pub(crate) fn finish_outcome(outcome: &mut MetricOutcome, scale: &GradeScale, module_scores: &[f64]) {
    outcome.score = calculate_mean(module_scores);
    outcome.grade = outcome.score.map(|score| scale.interpret(score));
    if outcome.score.is_none() {
        warn!("no module scores available, overall score is not applicable");
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::project;
    use super::*;

    #[test]
    fn test_write_result_without_issues() {
        let (_dir, report, mut loader) = project(&[("src/a.ts", "export function a() { return 1; }")]);
        let mut metric = MetricComponent::from_settings(MetricKind::CyclomaticComplexity, &Settings::default());
        metric.calculate(&report, &mut loader).unwrap();

        let text = metric.write_result();
        assert!(text.starts_with("**Cyclomatic Complexity**"));
        assert!(text.contains("| <= 10 | Excellent (=1) |"));
        assert!(text.contains("no problem modules found"));
        assert!(text.contains("**Suggestions:**"));
        // rendering twice gives the same text
        assert_eq!(text, metric.write_result());
    }

    #[test]
    fn test_threshold_override() {
        let mut settings = Settings::default();
        settings.thresholds.coupling = Some(vec![0.0, 1.0, 2.0, 3.0]);
        let metric = MetricComponent::from_settings(MetricKind::Coupling, &settings);
        assert_eq!(metric.interprete_score(2.0), Grade::Okay);
        assert_eq!(metric.kind(), MetricKind::Coupling);
    }

    #[test]
    fn test_empty_project_has_no_score() {
        let report = ProjectStructureReport::default();
        let mut loader = SourceLoader::new(&["ts"]);
        for kind in MetricKind::ALL {
            let mut metric = MetricComponent::from_settings(kind, &Settings::default());
            metric.calculate(&report, &mut loader).unwrap();
            assert_eq!(metric.outcome().score, None);
            assert_eq!(metric.outcome().grade, None);
            assert!(metric.write_result().contains("Overall grade: n/a"));
        }
    }
}
