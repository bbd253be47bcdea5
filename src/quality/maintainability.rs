//! Maintainability and its five sub-characteristics

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::issues::{merge_issues, MergedIssue};
use super::{QualityAttribute, SubCharacteristic};
use crate::core::SourceLoader;
use crate::error::Result;
use crate::metrics::{Metric, MetricComponent};
use crate::models::config::{Settings, Weights};
use crate::models::metric::MetricKind;
use crate::models::project::ProjectStructureReport;
use crate::output::ProgressReporter;

/// Weight and mean grade of one sub-characteristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScore {
    pub weight: f64,
    /// `None` when none of its metrics produced a grade
    pub value: Option<f64>,
}

pub struct Maintainability {
    weights: Weights,
    metrics: BTreeMap<MetricKind, MetricComponent>,
    scores: BTreeMap<SubCharacteristic, SubScore>,
    overall: Option<f64>,
    issues: Vec<MergedIssue>,
}

impl Maintainability {
    pub fn from_settings(settings: &Settings) -> Self {
        let metrics = MetricKind::ALL
            .iter()
            .map(|kind| (*kind, MetricComponent::from_settings(*kind, settings)))
            .collect();
        Self {
            weights: settings.weights.clone(),
            metrics,
            scores: BTreeMap::new(),
            overall: None,
            issues: Vec::new(),
        }
    }

    pub fn metric(&self, kind: MetricKind) -> Option<&MetricComponent> {
        self.metrics.get(&kind)
    }

    pub fn sub_score(&self, sub: SubCharacteristic) -> Option<&SubScore> {
        self.scores.get(&sub)
    }

    /// Problem modules across all metrics
    pub fn merged_issues(&self) -> &[MergedIssue] {
        &self.issues
    }

    /// Mean grade of the available metric grades of `sub`
    fn sub_value(&self, sub: SubCharacteristic) -> Option<f64> {
        let grades: Vec<f64> = sub
            .inputs()
            .iter()
            .filter_map(|kind| self.metrics.get(kind))
            .filter_map(|metric| metric.outcome().grade)
            .map(|grade| f64::from(grade.value()))
            .collect();
        crate::models::metric::calculate_mean(&grades)
    }

    fn weighted_overall(&self) -> Option<f64> {
        let (sum, weights) = self
            .scores
            .values()
            .filter_map(|score| score.value.map(|value| (value * score.weight, score.weight)))
            .fold((0.0, 0.0), |(sum, weights), (value, weight)| (sum + value, weights + weight));
        if weights > 0.0 {
            Some(sum / weights)
        } else {
            None
        }
    }
}

impl QualityAttribute for Maintainability {
    fn name(&self) -> &str {
        "Maintainability"
    }

    fn analyze(
        &mut self,
        report: &ProjectStructureReport,
        loader: &mut SourceLoader,
        progress: &mut ProgressReporter,
    ) -> Result<()> {
        // each metric once, shared by every sub-characteristic naming it
        for metric in self.metrics.values_mut() {
            progress.start_step(metric.name());
            metric.calculate(report, loader)?;
            progress.finish_step(&format!(
                "{}: {}",
                metric.name(),
                metric
                    .outcome()
                    .grade
                    .map_or_else(|| "n/a".to_string(), |grade| grade.to_string())
            ));
        }

        self.scores = SubCharacteristic::ALL
            .iter()
            .map(|sub| {
                let score = SubScore {
                    weight: sub.weight(&self.weights),
                    value: self.sub_value(*sub),
                };
                debug!("{}: {:?}", sub, score);
                (*sub, score)
            })
            .collect();
        self.overall = self.weighted_overall();

        let records = SubCharacteristic::ALL
            .iter()
            .flat_map(|sub| sub.inputs().iter())
            .filter_map(|kind| self.metrics.get(kind))
            .flat_map(|metric| metric.outcome().issues.iter());
        self.issues = merge_issues(records);

        info!(
            "maintainability {:?}, {} problem module(s)",
            self.overall,
            self.issues.len()
        );
        Ok(())
    }

    fn overall_score(&self) -> Option<f64> {
        self.overall
    }
}
