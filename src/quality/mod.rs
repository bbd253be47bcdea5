//! Quality aggregation
//!
//! Metric grades roll up into sub-characteristics, sub-characteristics into
//! a quality attribute, and attributes into one overall grade.

pub mod issues;
pub mod maintainability;

pub use issues::{merge_issues, MergedIssue};
pub use maintainability::{Maintainability, SubScore};

use std::fmt;

use crate::core::SourceLoader;
use crate::error::Result;
use crate::models::config::{Settings, Weights};
use crate::models::grade::Grade;
use crate::models::metric::MetricKind;
use crate::models::project::ProjectStructureReport;
use crate::output::ProgressReporter;

/// Sub-characteristics of maintainability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubCharacteristic {
    Analyzability,
    Modifiability,
    Testability,
    Modularity,
    Reusability,
}

impl SubCharacteristic {
    pub const ALL: [SubCharacteristic; 5] = [
        SubCharacteristic::Analyzability,
        SubCharacteristic::Modifiability,
        SubCharacteristic::Testability,
        SubCharacteristic::Modularity,
        SubCharacteristic::Reusability,
    ];

    /// File stem of the detailed reports
    pub fn key(self) -> &'static str {
        match self {
            SubCharacteristic::Analyzability => "analyzability",
            SubCharacteristic::Modifiability => "modifiability",
            SubCharacteristic::Testability => "testability",
            SubCharacteristic::Modularity => "modularity",
            SubCharacteristic::Reusability => "reusability",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SubCharacteristic::Analyzability => "Analyzability",
            SubCharacteristic::Modifiability => "Modifiability",
            SubCharacteristic::Testability => "Testability",
            SubCharacteristic::Modularity => "Modularity",
            SubCharacteristic::Reusability => "Reusability",
        }
    }

    /// Metrics whose grades make up this sub-characteristic
    pub fn inputs(self) -> &'static [MetricKind] {
        match self {
            SubCharacteristic::Analyzability => &[MetricKind::CyclomaticComplexity, MetricKind::CallableLength],
            SubCharacteristic::Modifiability => &[MetricKind::PropagationCost],
            SubCharacteristic::Testability => &[MetricKind::CyclomaticComplexity],
            SubCharacteristic::Modularity => &[MetricKind::Cohesion, MetricKind::Coupling],
            SubCharacteristic::Reusability => &[
                MetricKind::CyclomaticComplexity,
                MetricKind::Cohesion,
                MetricKind::Coupling,
            ],
        }
    }

    pub fn weight(self, weights: &Weights) -> f64 {
        match self {
            SubCharacteristic::Analyzability => weights.analyzability,
            SubCharacteristic::Modifiability => weights.modifiability,
            SubCharacteristic::Testability => weights.testability,
            SubCharacteristic::Modularity => weights.modularity,
            SubCharacteristic::Reusability => weights.reusability,
        }
    }
}

impl fmt::Display for SubCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A top-level quality attribute built from metric grades
pub trait QualityAttribute {
    fn name(&self) -> &str;

    fn analyze(
        &mut self,
        report: &ProjectStructureReport,
        loader: &mut SourceLoader,
        progress: &mut ProgressReporter,
    ) -> Result<()>;

    /// Mean grade on the 1 to 5 scale, `None` when nothing was measurable
    fn overall_score(&self) -> Option<f64>;
}

/// Runs every quality attribute over a project
pub struct QualityAnalyzer {
    maintainability: Maintainability,
}

impl QualityAnalyzer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            maintainability: Maintainability::from_settings(settings),
        }
    }

    pub fn analyze(
        &mut self,
        report: &ProjectStructureReport,
        loader: &mut SourceLoader,
        progress: &mut ProgressReporter,
    ) -> Result<()> {
        self.maintainability.analyze(report, loader, progress)
    }

    pub fn maintainability(&self) -> &Maintainability {
        &self.maintainability
    }

    /// Mean over all attributes that produced a score
    pub fn overall_score(&self) -> Option<f64> {
        let scores: Vec<f64> = [self.maintainability.overall_score()].into_iter().flatten().collect();
        crate::models::metric::calculate_mean(&scores)
    }

    pub fn overall_grade(&self) -> Option<Grade> {
        self.overall_score().map(Grade::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs() {
        assert_eq!(SubCharacteristic::Testability.inputs(), &[MetricKind::CyclomaticComplexity]);
        assert_eq!(SubCharacteristic::Reusability.inputs().len(), 3);
        // every metric feeds at least one sub-characteristic
        for kind in MetricKind::ALL {
            assert!(SubCharacteristic::ALL.iter().any(|sub| sub.inputs().contains(&kind)));
        }
    }

    #[test]
    fn test_weight_lookup() {
        let weights = Weights {
            modularity: 2.5,
            ..Weights::default()
        };
        assert_eq!(SubCharacteristic::Modularity.weight(&weights), 2.5);
        assert_eq!(SubCharacteristic::Analyzability.weight(&weights), 1.0);
    }
}
