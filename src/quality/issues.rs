//! Cross-metric problem-module table

use std::path::PathBuf;

use crate::models::metric::MetricRecord;

/// All distinct issue texts raised against one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedIssue {
    pub file_path: PathBuf,
    pub module_name: String,
    pub issues: Vec<String>,
}

/// Group issue records by file path
///
/// Identical texts are kept once per module. The result is sorted by the
/// number of issues, most first; modules with equal counts keep the order
/// in which they were first seen.
pub fn merge_issues<'a, I>(records: I) -> Vec<MergedIssue>
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    let mut merged: Vec<MergedIssue> = Vec::new();

    for record in records {
        let Some(text) = record.details.as_deref() else {
            continue;
        };
        let entry = match merged.iter().position(|entry| entry.file_path == record.file_path) {
            Some(index) => &mut merged[index],
            None => {
                merged.push(MergedIssue {
                    file_path: record.file_path.clone(),
                    module_name: record.module_name.clone(),
                    issues: Vec::new(),
                });
                let last = merged.len() - 1;
                &mut merged[last]
            }
        };
        if !entry.issues.iter().any(|known| known == text) {
            entry.issues.push(text.to_string());
        }
    }

    merged.sort_by(|a, b| b.issues.len().cmp(&a.issues.len()));
    merged
}
