//! Markdown reports
//!
//! Layout under the output directory:
//!
//! - `REPORT.md`: overall grade, sub-characteristic table, problem modules
//! - `detailed/<sub>.md`: metric table plus every metric's report fragment
//! - `detailed/modules/<sub>.md`: raw per-module scores, worst first

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

use super::writers::{FileWriter, OutputWriter};
use crate::error::Result;
use crate::metrics::Metric;
use crate::models::grade::Grade;
use crate::models::metric::format_score;
use crate::quality::{Maintainability, MergedIssue, QualityAnalyzer, QualityAttribute, SubCharacteristic};

pub const REPORT_FILE: &str = "REPORT.md";
pub const DETAILED_DIR: &str = "detailed";
pub const MODULES_DIR: &str = "modules";

/// Writes every Markdown report of an analysis
pub struct ReportWriter {
    output_dir: PathBuf,
    generated_at: DateTime<Local>,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_timestamp(output_dir, Local::now())
    }

    pub fn with_timestamp(output_dir: impl Into<PathBuf>, generated_at: DateTime<Local>) -> Self {
        Self {
            output_dir: output_dir.into(),
            generated_at,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn detailed_path(&self, sub: SubCharacteristic) -> PathBuf {
        self.output_dir.join(DETAILED_DIR).join(format!("{}.md", sub.key()))
    }

    pub fn modules_path(&self, sub: SubCharacteristic) -> PathBuf {
        self.output_dir
            .join(DETAILED_DIR)
            .join(MODULES_DIR)
            .join(format!("{}.md", sub.key()))
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }

    /// Write all reports, returning the written paths
    pub fn write_all(&self, analyzer: &QualityAnalyzer) -> Result<Vec<PathBuf>> {
        let maintainability = analyzer.maintainability();
        let mut written = Vec::new();

        for sub in SubCharacteristic::ALL {
            let path = self.detailed_path(sub);
            FileWriter::new(&path).write(&render_detailed(sub, maintainability))?;
            written.push(path);

            let path = self.modules_path(sub);
            FileWriter::new(&path).write(&render_module_scores(sub, maintainability))?;
            written.push(path);
        }

        let path = self.report_path();
        let timestamp = self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        FileWriter::new(&path).write(&render_report(analyzer, &timestamp))?;
        written.push(path);

        info!("{} report file(s) written to {}", written.len(), self.output_dir.display());
        Ok(written)
    }
}

/// `1.50 (Good (=2))`, or `n/a`
fn score_with_grade(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.2} ({})", score, Grade::from_value(score)),
        None => "n/a".to_string(),
    }
}

/// Markdown heading anchor of a metric name
fn anchor(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' => Some(c),
            _ => None,
        })
        .collect()
}

pub fn render_detailed(sub: SubCharacteristic, maintainability: &Maintainability) -> String {
    let value = maintainability.sub_score(sub).and_then(|score| score.value);
    let metrics: Vec<_> = sub
        .inputs()
        .iter()
        .filter_map(|kind| maintainability.metric(*kind))
        .collect();

    let mut lines = vec![
        format!("[back](../{})", REPORT_FILE),
        format!("# {}", sub.title()),
        format!("Score: {}", score_with_grade(value)),
        String::new(),
        "| Metric | Score | Grade |".to_string(),
        "| -------- | -------- | -------- |".to_string(),
    ];
    for metric in &metrics {
        let outcome = metric.outcome();
        lines.push(format!(
            "| [{}](#{}) | {} | {} |",
            metric.name(),
            anchor(metric.name()),
            format_score(outcome.score),
            outcome.grade.map_or_else(|| "n/a".to_string(), |grade| grade.to_string())
        ));
    }
    for metric in &metrics {
        lines.push("-----".to_string());
        lines.push(format!("## {}", metric.name()));
        lines.push(metric.write_result());
    }

    lines.join("\n")
}

pub fn render_module_scores(sub: SubCharacteristic, maintainability: &Maintainability) -> String {
    let mut sections = Vec::new();

    for metric in sub.inputs().iter().filter_map(|kind| maintainability.metric(*kind)) {
        let mut lines = vec![format!("## {}", metric.name())];
        for record in metric.outcome().details_worst_first() {
            let details = record
                .details
                .as_deref()
                .map(|text| format!(" {}", text))
                .unwrap_or_default();
            lines.push(format!(
                "Score: {:.2} (={}) [{}]{}",
                record.module_score,
                record.grade.value(),
                record.file_path.display(),
                details
            ));
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

fn issue_cell(issue: &MergedIssue) -> String {
    if issue.issues.len() == 1 {
        return issue.issues[0].clone();
    }
    issue
        .issues
        .iter()
        .enumerate()
        .map(|(index, text)| format!("{}. {}", index + 1, text))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn render_report(analyzer: &QualityAnalyzer, generated_at: &str) -> String {
    let maintainability = analyzer.maintainability();

    let mut lines = vec![
        "# Project Assessment".to_string(),
        format!("Generated: {}", generated_at),
        String::new(),
        format!("Result: {}", score_with_grade(analyzer.overall_score())),
        String::new(),
        format!("## {}", maintainability.name()),
        format!("Score: {}", score_with_grade(maintainability.overall_score())),
        String::new(),
        "| Sub-characteristic | Score | Weight | Details |".to_string(),
        "| -------- | -------- | -------- | -------- |".to_string(),
    ];
    for sub in SubCharacteristic::ALL {
        let score = maintainability.sub_score(sub);
        lines.push(format!(
            "| {} | {} | {} | [Report]({}/{}.md) |",
            sub.title(),
            score_with_grade(score.and_then(|s| s.value)),
            score.map_or(1.0, |s| s.weight),
            DETAILED_DIR,
            sub.key()
        ));
    }

    lines.push(String::new());
    lines.push("## Problem modules".to_string());
    lines.push("| Module | Issues |".to_string());
    lines.push("| -------- | -------- |".to_string());
    let issues = maintainability.merged_issues();
    if issues.is_empty() {
        lines.push("no problem modules found".to_string());
    }
    for issue in issues {
        lines.push(format!("| {} | {} |", issue.file_path.display(), issue_cell(issue)));
    }

    lines.join("\n")
}
