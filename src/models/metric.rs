//! Metric result records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::grade::Grade;

/// Identity of the five metric components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CyclomaticComplexity,
    CallableLength,
    Cohesion,
    Coupling,
    PropagationCost,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::CyclomaticComplexity,
        MetricKind::CallableLength,
        MetricKind::Cohesion,
        MetricKind::Coupling,
        MetricKind::PropagationCost,
    ];

    /// Key used in settings tables
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::CyclomaticComplexity => "cyclomatic_complexity",
            MetricKind::CallableLength => "callable_length",
            MetricKind::Cohesion => "cohesion",
            MetricKind::Coupling => "coupling",
            MetricKind::PropagationCost => "propagation_cost",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One measured module
///
/// The same shape is used for detail records and for issues; an issue is a
/// record whose module crossed a problem threshold, with `details` naming
/// the problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub file_path: PathBuf,
    pub module_name: String,
    pub module_score: f64,
    pub grade: Grade,
    pub details: Option<String>,
}

impl MetricRecord {
    pub fn new(file_path: impl Into<PathBuf>, module_name: impl Into<String>, module_score: f64, grade: Grade) -> Self {
        Self {
            file_path: file_path.into(),
            module_name: module_name.into(),
            module_score,
            grade,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Final state of a metric after `calculate`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricOutcome {
    /// One record per measured module, in universe order
    pub details: Vec<MetricRecord>,
    /// Problem records, in discovery order
    pub issues: Vec<MetricRecord>,
    /// Project-wide score, `None` when nothing could be measured
    pub score: Option<f64>,
    pub grade: Option<Grade>,
}

impl MetricOutcome {
    /// Details sorted worst grade first, stable within a grade
    pub fn details_worst_first(&self) -> Vec<&MetricRecord> {
        let mut details: Vec<&MetricRecord> = self.details.iter().collect();
        details.sort_by(|a, b| b.grade.cmp(&a.grade));
        details
    }

    /// Issues sorted worst grade first, stable within a grade
    pub fn issues_worst_first(&self) -> Vec<&MetricRecord> {
        let mut issues: Vec<&MetricRecord> = self.issues.iter().collect();
        issues.sort_by(|a, b| b.grade.cmp(&a.grade));
        issues
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn calculate_mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Render an optional score with two decimals
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.2}", score),
        None => "n/a".to_string(),
    }
}
