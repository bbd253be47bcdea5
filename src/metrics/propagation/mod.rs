//! Propagation cost
//!
//! The share of the analysed modules a module reaches through its import
//! chain. A change in any of them can ripple into the module, and a module
//! inside an import cycle is flagged on top of its numeric score.

pub mod graph;

pub use graph::{DependencyGraph, ModuleNode, ModuleTree};

use tracing::{debug, warn};

use super::{finish_outcome, Metric};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::grade::{Boundary, GradeScale};
use crate::models::metric::{MetricKind, MetricOutcome, MetricRecord};
use crate::models::project::ProjectStructureReport;

pub const DEFAULT_SCALE: GradeScale = GradeScale::lower_is_better([
    Boundary::at_most(0.1),
    Boundary::at_most(0.2),
    Boundary::at_most(0.3),
    Boundary::at_most(0.5),
]);

const SUGGESTIONS: &[&str] = &[
    "**Reduce dependencies:** cut down the number of modules this module imports directly or indirectly, since each of them can force a change here",
    "**Apply the Dependency Inversion Principle (DIP):** depend on abstractions (interfaces) instead of concrete implementations to invert the direction of dependencies",
    "**Encapsulate internals:** keep implementation details such as internal data structures and private helpers out of the public interface so other modules cannot depend on them",
    "**Avoid global mutable state:** a module should not manage or change global state that many others read, as it causes unpredictable side effects",
    "**Define stable abstractions:** when a module acts as a central hub, keep its interface stable so dependents do not need constant changes",
    "**Break import cycles:** move the shared part of cyclic modules into a separate module both can depend on",
];

pub struct PropagationCost {
    scale: GradeScale,
    outcome: MetricOutcome,
    tree: ModuleTree,
}

impl PropagationCost {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_SCALE)
    }

    pub fn with_scale(scale: GradeScale) -> Self {
        Self {
            scale,
            outcome: MetricOutcome::default(),
            tree: ModuleTree::new(),
        }
    }

    /// Module tree of the last calculation
    pub fn module_tree(&self) -> &ModuleTree {
        &self.tree
    }
}

impl Default for PropagationCost {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for PropagationCost {
    fn kind(&self) -> MetricKind {
        MetricKind::PropagationCost
    }

    fn name(&self) -> &str {
        "Propagation Cost"
    }

    fn description(&self) -> &str {
        "Measures how far the effects of a change can spread: the share of all analysed modules a module depends on, directly or indirectly. Example: module A imports B and B imports C, so a change in C can affect B and A. A high value means changes elsewhere frequently ripple into the module."
    }

    fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn calculate(&mut self, report: &ProjectStructureReport, loader: &mut SourceLoader) -> Result<()> {
        debug!("calculating propagation cost");
        let graph = DependencyGraph::build(report, loader);
        self.tree = graph.module_tree();

        let total = report.module_count();
        let mut outcome = MetricOutcome::default();
        let mut module_scores = Vec::new();

        if total == 0 {
            warn!("propagation cost: no modules to analyse");
        }

        for (path, node) in &self.tree {
            let affected = node.affected_modules.len();
            let score = affected as f64 / total as f64;
            let grade = self.scale.interpret(score);
            debug!("propagation cost: {} reaches {}/{}", path.display(), affected, total);

            let record = MetricRecord::new(path, &node.module_name, score, grade);
            if grade.is_problem() {
                outcome.issues.push(record.clone().with_details(format!(
                    "This module has a high propagation cost of {:.2}, since it depends on {} of {} modules",
                    score, affected, total
                )));
            }
            if node.has_cycle_dependency {
                outcome.issues.push(
                    record
                        .clone()
                        .with_details("This module is part of an import cycle with other modules"),
                );
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
        let metric = PropagationCost::new();
        assert_eq!(metric.interprete_score(0.0), Grade::Excellent);
        assert_eq!(metric.interprete_score(0.1), Grade::Excellent);
        assert_eq!(metric.interprete_score(0.11), Grade::Good);
        assert_eq!(metric.interprete_score(0.2), Grade::Good);
        assert_eq!(metric.interprete_score(0.21), Grade::Okay);
        assert_eq!(metric.interprete_score(0.3), Grade::Okay);
        assert_eq!(metric.interprete_score(0.31), Grade::NotGood);
        assert_eq!(metric.interprete_score(0.5), Grade::NotGood);
        assert_eq!(metric.interprete_score(0.51), Grade::Horrible);
        assert_eq!(metric.interprete_score(1.0), Grade::Horrible);
    }

    #[test]
    fn test_isolated_module_is_excellent() {
        let (_dir, report, mut loader) = project(&[
            ("src/a.ts", "export function a() {}"),
            ("src/b.ts", "export function b() {}"),
        ]);
        let mut metric = PropagationCost::new();
        metric.calculate(&report, &mut loader).unwrap();

        for record in &metric.outcome().details {
            assert_eq!(record.module_score, 0.0);
            assert_eq!(record.grade, Grade::Excellent);
        }
        assert_eq!(metric.outcome().grade, Some(Grade::Excellent));
        assert!(metric.outcome().issues.is_empty());
    }

    #[test]
    fn test_cycle_issues() {
        let (dir, report, mut loader) = project(&[
            ("src/a.ts", "import { b } from './b';\nexport function a() {}"),
            ("src/b.ts", "import { c } from './c';\nexport function b() {}"),
            ("src/c.ts", "import { a } from './a';\nexport function c() {}"),
        ]);
        let mut metric = PropagationCost::new();
        metric.calculate(&report, &mut loader).unwrap();

        assert!(metric.module_tree().values().all(|node| node.has_cycle_dependency));

        let outcome = metric.outcome();
        let a = canonical(&dir, "src/a.ts");
        let a_issues: Vec<&str> = outcome
            .issues
            .iter()
            .filter(|issue| issue.file_path == a)
            .filter_map(|issue| issue.details.as_deref())
            .collect();
        assert_eq!(a_issues.len(), 2);
        assert!(a_issues[0].contains("depends on 2 of 3 modules"));
        assert!(a_issues[1].contains("import cycle"));
        assert_eq!(outcome.grade, Some(Grade::Horrible));
    }

    #[test]
    fn test_importers_reach_shared_dependency() {
        let (dir, report, mut loader) = project(&[
            ("src/user.ts", "import { log } from './log';\nexport function getUser() {}"),
            ("src/cart.ts", "import { log } from './log';\nexport function getCart() {}"),
            ("src/log.ts", "export function log() {}"),
        ]);
        let mut metric = PropagationCost::new();
        metric.calculate(&report, &mut loader).unwrap();

        let score_of = |rel: &str| {
            let path = canonical(&dir, rel);
            metric
                .outcome()
                .details
                .iter()
                .find(|record| record.file_path == path)
                .map(|record| record.module_score)
                .unwrap()
        };
        assert_eq!(score_of("src/log.ts"), 0.0);
        assert!((score_of("src/user.ts") - 1.0 / 3.0).abs() < 1e-9);
        assert!((score_of("src/cart.ts") - 1.0 / 3.0).abs() < 1e-9);
    }
}
