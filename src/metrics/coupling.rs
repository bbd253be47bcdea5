//! Import coupling
//!
//! Counts the relative import statements of a module whose target is part
//! of the analysed universe. The afferent and efferent variants count the
//! same direction, the module's own outgoing imports; they differ in label
//! only.

use tracing::debug;

use super::{finish_outcome, Metric};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::config::CouplingVariant;
use crate::models::grade::{Boundary, GradeScale};
use crate::models::metric::{MetricKind, MetricOutcome, MetricRecord};
use crate::models::project::ProjectStructureReport;
use crate::models::source::SourceAnalysis;

pub const DEFAULT_SCALE: GradeScale = GradeScale::lower_is_better([
    Boundary::at_most(1.0),
    Boundary::at_most(4.0),
    Boundary::at_most(7.0),
    Boundary::below(12.0),
]);

const SUGGESTIONS: &[&str] = &[
    "**Apply the Single Responsibility Principle (SRP):** check whether the module takes on too many tasks that need many different, unrelated services",
    "**Apply the Dependency Inversion Principle (DIP):** depend on interfaces and abstractions instead of concrete modules to reduce direct dependencies (dependency injection)",
    "**Pass data as parameters:** avoid importing whole services only to reach static configuration or helpers that could be passed in or kept as small utility functions",
];

/// Relative imports of `analysis` that land inside `report`
pub fn count_local_imports(analysis: &SourceAnalysis, report: &ProjectStructureReport) -> usize {
    analysis
        .relative_targets()
        .filter(|target| report.contains(target))
        .count()
}

pub struct Coupling {
    variant: CouplingVariant,
    scale: GradeScale,
    outcome: MetricOutcome,
}

impl Coupling {
    pub fn new(variant: CouplingVariant) -> Self {
        Self {
            variant,
            scale: DEFAULT_SCALE,
            outcome: MetricOutcome::default(),
        }
    }

    pub fn with_scale(mut self, scale: GradeScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn variant(&self) -> CouplingVariant {
        self.variant
    }
}

impl Default for Coupling {
    fn default() -> Self {
        Self::new(CouplingVariant::default())
    }
}

impl Metric for Coupling {
    fn kind(&self) -> MetricKind {
        MetricKind::Coupling
    }

    fn name(&self) -> &str {
        match self.variant {
            CouplingVariant::Afferent => "Afferent Coupling",
            CouplingVariant::Efferent => "Efferent Coupling",
        }
    }

    fn description(&self) -> &str {
        "Measures the **functional coupling** of a module by the **number of local modules and services it imports**. A high number of imports points to low independence, higher maintenance cost and lower testability."
    }

    fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        debug!("calculating {} coupling", self.variant);
        let mut outcome = MetricOutcome::default();
        let mut module_scores = Vec::new();

        for (path, name) in report.modules() {
            let analysis = loader.load_or_empty(path);
            let count = count_local_imports(&analysis, report);
            let score = count as f64;
            let grade = self.scale.interpret(score);
            debug!("coupling: {} imports {} local module(s)", path.display(), count);

            let record = MetricRecord::new(path, name, score, grade);
            if grade.is_problem() {
                outcome.issues.push(record.clone().with_details(format!(
                    "This module has a high number of imports ({}), which indicates strong coupling",
                    count
                )));
            }
            outcome.details.push(record);
            module_scores.push(score);
        }

        finish_outcome(&mut outcome, &self.scale, &module_scores);
        self.outcome = outcome;
        Ok(())
    }

    fn outcome(&self) -> &MetricOutcome {
        &self.outcome
    }

    fn suggestions(&self) -> &[&'static str] {
        SUGGESTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::{canonical, project};
    use crate::models::grade::Grade;

    #[test]
    fn test_interprete_score_boundaries() {
        let metric = Coupling::default();
        assert_eq!(metric.interprete_score(0.0), Grade::Excellent);
        assert_eq!(metric.interprete_score(1.0), Grade::Excellent);
        assert_eq!(metric.interprete_score(2.0), Grade::Good);
        assert_eq!(metric.interprete_score(7.0), Grade::Okay);
        assert_eq!(metric.interprete_score(11.0), Grade::NotGood);
        assert_eq!(metric.interprete_score(12.0), Grade::Horrible);
    }

    #[test]
    fn test_counts_only_local_relative_imports() {
        let (dir, report, mut loader) = project(&[
            ("src/a.ts", "export function a() {}"),
            ("src/b.ts", "export type B = number;"),
            (
                "src/main.ts",
                r#"
import { a } from './a';
import type { B } from './b';
import { readFileSync } from 'fs';
import lodash from 'lodash';
export function main() {}
"#,
            ),
        ]);
        let mut metric = Coupling::default();
        metric.calculate(&report, &mut loader).unwrap();

        let main = canonical(&dir, "src/main.ts");
        let record = metric
            .outcome()
            .details
            .iter()
            .find(|record| record.file_path == main)
            .unwrap();
        // b.ts declares no function, so it is outside the universe
        assert_eq!(record.module_score, 1.0);
        assert_eq!(record.grade, Grade::Excellent);
    }

    #[test]
    fn test_variant_changes_label_only() {
        let files = [
            ("src/a.ts", "export function a() {}"),
            ("src/b.ts", "import { a } from './a';\nexport function b() {}"),
        ];
        let (_dir, report, mut loader) = project(&files);

        let mut afferent = Coupling::new(CouplingVariant::Afferent);
        let mut efferent = Coupling::new(CouplingVariant::Efferent);
        afferent.calculate(&report, &mut loader).unwrap();
        efferent.calculate(&report, &mut loader).unwrap();

        assert_eq!(afferent.name(), "Afferent Coupling");
        assert_eq!(efferent.name(), "Efferent Coupling");
        assert_eq!(afferent.outcome(), efferent.outcome());
        assert_eq!(afferent.outcome().score, Some(0.5));
    }

    #[test]
    fn test_many_imports_raise_issue() {
        let mut files: Vec<(String, String)> = (0..12)
            .map(|i| (format!("src/dep{}.ts", i), format!("export function dep{}() {{}}", i)))
            .collect();
        let imports: String = (0..12)
            .map(|i| format!("import {{ dep{} }} from './dep{}';\n", i, i))
            .collect();
        files.push(("src/hub.ts".to_string(), format!("{}export function hub() {{}}\n", imports)));
        let borrowed: Vec<(&str, &str)> = files.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let (_dir, report, mut loader) = project(&borrowed);

        let mut metric = Coupling::default();
        metric.calculate(&report, &mut loader).unwrap();

        let issues = &metric.outcome().issues;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].module_name, "hub");
        assert_eq!(issues[0].grade, Grade::Horrible);
        assert!(issues[0].details.as_deref().unwrap().contains("(12)"));
    }
}
