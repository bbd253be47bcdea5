//! Module discovery
//!
//! Files directly under the root have no package. Every other file belongs
//! to the package of its directory, and is a module when it declares at
//! least one top-level function. An `index` file stands for its whole
//! directory: it becomes one module, named after the directory, in the
//! package of the directory's parent. That rule only applies when the
//! parent is itself a package, i.e. not the root.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::source_loader::SourceLoader;
use crate::error::{handle_error, ArchScoreError, Result};
use crate::models::project::{Package, ProjectStructure, ProjectStructureReport};
use crate::output::{FileWriter, OutputWriter};

/// File name of the structure dump inside the output directory
pub const STRUCTURE_FILE: &str = "project-structure.json";

/// Result of a discovery run
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryOutcome {
    Found(ProjectStructureReport),
    /// No module was found; the (empty) report is still written
    Empty(ProjectStructureReport),
}

impl DiscoveryOutcome {
    pub fn report(&self) -> &ProjectStructureReport {
        match self {
            DiscoveryOutcome::Found(report) | DiscoveryOutcome::Empty(report) => report,
        }
    }

    pub fn into_report(self) -> ProjectStructureReport {
        match self {
            DiscoveryOutcome::Found(report) | DiscoveryOutcome::Empty(report) => report,
        }
    }
}

/// Modules found so far, grouped by package directory
#[derive(Debug, Default)]
struct StructureAccumulator {
    structure: ProjectStructure,
}

impl StructureAccumulator {
    fn add_module(&mut self, package_dir: &Path, module_path: PathBuf, module_name: String) {
        debug!("module {} ({})", module_name, module_path.display());
        self.structure
            .entry(package_dir.to_path_buf())
            .or_insert_with(|| Package::new(base_name(package_dir)))
            .modules
            .insert(module_path, module_name);
    }

    fn finish(self) -> ProjectStructureReport {
        ProjectStructureReport::from_structure(self.structure)
    }
}

/// Scans a project root for modules
pub struct ModuleDiscovery {
    root: PathBuf,
    exclude_patterns: Vec<Pattern>,
    errors: Vec<(PathBuf, ArchScoreError)>,
}

impl ModuleDiscovery {
    /// Prepare a scan of `root`, which must be an existing directory
    pub fn new<S: AsRef<str>>(root: &Path, exclude_patterns: &[S]) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| ArchScoreError::invalid_path(root))?;
        if !root.is_dir() {
            return Err(ArchScoreError::invalid_path(root));
        }

        let exclude_patterns = exclude_patterns
            .iter()
            .map(|pattern| Pattern::new(pattern.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            root,
            exclude_patterns,
            errors: Vec::new(),
        })
    }

    /// Canonical project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Non-critical errors met during the last scan
    pub fn errors(&self) -> &[(PathBuf, ArchScoreError)] {
        &self.errors
    }

    /// Walk the project and build its structure
    pub fn discover(&mut self, loader: &mut SourceLoader) -> Result<DiscoveryOutcome> {
        let mut accumulator = StructureAccumulator::default();
        let mut errors = Vec::new();
        let patterns = &self.exclude_patterns;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, patterns));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let err = ArchScoreError::from(err);
                    if err.is_critical() {
                        return Err(err);
                    }
                    let path = err_path(&err);
                    errors.push((path, err));
                    continue;
                }
            };

            // Root-level files have no package
            if !entry.file_type().is_file() || entry.depth() < 2 {
                continue;
            }
            let path = entry.path();
            if !loader.resolver().has_source_extension(path) {
                continue;
            }
            let Some(dir) = path.parent() else {
                continue;
            };

            if is_index_file(path) {
                if entry.depth() < 3 {
                    continue;
                }
                let Some(package_dir) = dir.parent() else {
                    continue;
                };
                if loader.load_or_empty(path).is_module() {
                    accumulator.add_module(package_dir, path.to_path_buf(), base_name(dir));
                }
            } else if loader.load_or_empty(path).is_module() {
                accumulator.add_module(dir, path.to_path_buf(), module_name(path));
            }
        }

        for (_, err) in errors.iter() {
            debug!("discovery: {}", err);
        }
        self.errors = errors;

        let report = accumulator.finish();
        info!(
            "discovered {} module(s) in {} package(s)",
            report.module_count(),
            report.structure.len()
        );

        if report.is_empty() {
            Ok(DiscoveryOutcome::Empty(report))
        } else {
            Ok(DiscoveryOutcome::Found(report))
        }
    }
}

/// Serialise the structure to `<output_dir>/project-structure.json`
pub fn write_structure_report(report: &ProjectStructureReport, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(STRUCTURE_FILE);
    let json = serde_json::to_string_pretty(report)?;
    FileWriter::new(&path).write(&json)?;
    debug!("project structure written to {}", path.display());
    Ok(path)
}

/// Reload a structure dump
pub fn read_structure_report(path: &Path) -> Result<ProjectStructureReport> {
    let content = std::fs::read_to_string(path).map_err(ArchScoreError::io_error)?;
    serde_json::from_str(&content).map_err(|e| ArchScoreError::json_parse_error(path, e))
}

/// Discover modules and write the structure dump
///
/// The dump is written whether or not modules were found.
pub fn discover_project(
    root: &Path,
    exclude_patterns: &[String],
    output_dir: &Path,
    loader: &mut SourceLoader,
) -> Result<DiscoveryOutcome> {
    let mut discovery = ModuleDiscovery::new(root, exclude_patterns)?;
    let outcome = discovery.discover(loader)?;

    for (path, err) in discovery.errors.drain(..) {
        debug!("skipped {}", path.display());
        handle_error(err);
    }

    write_structure_report(outcome.report(), output_dir)?;
    Ok(outcome)
}

fn is_excluded(entry: &DirEntry, patterns: &[Pattern]) -> bool {
    let name = entry.file_name().to_string_lossy();
    patterns
        .iter()
        .any(|pattern| pattern.matches(&name) || pattern.matches_path(entry.path()))
}

fn is_index_file(path: &Path) -> bool {
    path.file_stem().and_then(|stem| stem.to_str()) == Some("index")
}

fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn err_path(err: &ArchScoreError) -> PathBuf {
    match err {
        ArchScoreError::PermissionDenied { path } | ArchScoreError::DirectoryTraversal { path, .. } => path.clone(),
        _ => PathBuf::new(),
    }
}
