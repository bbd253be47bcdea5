//! Console summary of an analysis

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

use super::Formatter;
use crate::error::Result;
use crate::metrics::Metric;
use crate::models::grade::Grade;
use crate::models::metric::{format_score, MetricKind};
use crate::quality::{QualityAnalyzer, QualityAttribute, SubCharacteristic};

/// Human readable summary for the terminal
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool) -> Self {
        Self { use_colors, verbose }
    }

    fn grade_text(&self, score: Option<f64>) -> String {
        let Some(score) = score else {
            return "n/a".to_string();
        };
        let grade = Grade::from_value(score);
        let text = format!("{:.2} {}", score, grade);
        if !self.use_colors {
            return text;
        }
        match grade {
            Grade::Excellent | Grade::Good => Green.paint(text).to_string(),
            Grade::Okay => Yellow.paint(text).to_string(),
            Grade::NotGood | Grade::Horrible => Red.paint(text).to_string(),
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, analyzer: &QualityAnalyzer) -> Result<String> {
        let maintainability = analyzer.maintainability();
        let mut output = String::new();

        let title = format!("{} Summary", maintainability.name());
        if self.use_colors {
            output.push_str(&format!("{}\n\n", Blue.bold().paint(title)));
        } else {
            output.push_str(&format!("{}\n\n", title));
        }

        output.push_str(&format!("Overall: {}\n", self.grade_text(analyzer.overall_score())));
        for sub in SubCharacteristic::ALL {
            let value = maintainability.sub_score(sub).and_then(|score| score.value);
            output.push_str(&format!("  {:<14} {}\n", sub.title(), self.grade_text(value)));
        }

        if self.verbose {
            output.push_str("\nMetrics:\n");
            for kind in MetricKind::ALL {
                if let Some(metric) = maintainability.metric(kind) {
                    let outcome = metric.outcome();
                    output.push_str(&format!(
                        "  {:<22} {:>6}  {} module(s), {} issue(s)\n",
                        metric.name(),
                        format_score(outcome.score),
                        outcome.details.len(),
                        outcome.issues.len()
                    ));
                }
            }
        }

        let problems = maintainability.merged_issues().len();
        let line = format!("\nProblem modules: {}", problems);
        if self.use_colors && problems > 0 {
            output.push_str(&format!("{}\n", Yellow.bold().paint(line)));
        } else if self.use_colors {
            output.push_str(&format!("{}\n", Style::new().dimmed().paint(line)));
        } else {
            output.push_str(&format!("{}\n", line));
        }

        Ok(output)
    }
}
