//! Command implementations

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::Args;
use crate::config::architecture::load_architecture_config;
use crate::config::cli::CliConfig;
use crate::config::file::DEFAULT_CONFIG_FILE;
use crate::config::{load_config, parser::create_default_config};
use crate::core::{discover_project, DiscoveryOutcome, SourceLoader};
use crate::error::{handle_error, ArchScoreError, ErrorSeverity, Result};
use crate::logging::init_logging;
use crate::models::config::Settings;
use crate::output::{Formatter, OutputWriter, ProgressReporter, ReportWriter, StdoutWriter, TextFormatter};
use crate::quality::QualityAnalyzer;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Assess the project
    Analyze(Args),
    /// Write a default settings file
    Init,
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Initialized(PathBuf),
    AlreadyInitialized(PathBuf),
    /// Discovery found nothing; no report beyond the structure dump
    EmptyProject,
    Analyzed {
        modules: usize,
        overall: Option<f64>,
        reports: Vec<PathBuf>,
    },
}

impl Command {
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Analyze(args)
    }

    pub fn execute(&self) -> Result<RunOutcome> {
        match self {
            Command::Init => init_config(Path::new(DEFAULT_CONFIG_FILE)),
            Command::Analyze(args) => {
                let cli_config = CliConfig::from_args(args);
                let settings = load_config(cli_config.into_args())?;

                if let Err(err) = init_logging(&settings) {
                    eprintln!("Warning: {}", err.user_message());
                }
                debug!("effective settings: {:?}", settings);

                analyze(&settings)
            }
        }
    }
}

/// Write the default settings file unless one exists
pub fn init_config(path: &Path) -> Result<RunOutcome> {
    if path.exists() {
        println!("Settings file already exists at: {}", path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(RunOutcome::AlreadyInitialized(path.to_path_buf()));
    }

    create_default_config(path)?;
    println!("Created default settings file at: {}", path.display());
    println!("Edit it to change the scan path, exclusions, weights or grade thresholds.");
    Ok(RunOutcome::Initialized(path.to_path_buf()))
}

/// Discover, measure, aggregate and write every report
pub fn analyze(settings: &Settings) -> Result<RunOutcome> {
    let start = Instant::now();

    if !settings.quiet {
        println!("{} v{} - maintainability assessment", crate::NAME, crate::VERSION);
        println!("Scanning path: {}", settings.scan_path.display());
        if !settings.exclude_patterns.is_empty() {
            println!("Excluding: {}", settings.exclude_patterns.join(", "));
        }
    }

    if let Some(architecture) = load_architecture_config(&settings.architecture_config) {
        debug!("architecture description with {} layer(s) loaded", architecture.layer_count());
    }

    let mut loader = SourceLoader::from_settings(settings);
    let mut progress = ProgressReporter::from_settings(settings);

    progress.start_step("Discovering modules");
    let outcome = discover_project(
        &settings.scan_path,
        &settings.exclude_patterns,
        &settings.output_dir,
        &mut loader,
    )?;

    let report = match outcome {
        DiscoveryOutcome::Empty(_) => {
            progress.finish_step("No modules found");
            error!(
                "no modules found in {}, analysis skipped",
                settings.scan_path.display()
            );
            return Ok(RunOutcome::EmptyProject);
        }
        DiscoveryOutcome::Found(report) => report,
    };
    progress.finish_step(&format!(
        "Found {} module(s) in {} package(s)",
        report.module_count(),
        report.structure.len()
    ));

    let mut analyzer = QualityAnalyzer::new(settings);
    analyzer.analyze(&report, &mut loader, &mut progress)?;
    debug!("{} file parse(s) for {} module(s)", loader.parse_count(), report.module_count());

    let reports = ReportWriter::new(&settings.output_dir).write_all(&analyzer)?;
    if let Some(grade) = analyzer.overall_grade() {
        info!("overall grade: {}", grade);
    }

    if !settings.quiet {
        let summary = TextFormatter::new(settings.use_colors, settings.verbose).format(&analyzer)?;
        if let Err(err) = StdoutWriter.write(&format!("\n{}", summary)) {
            handle_error(err);
        }
        println!("Reports written to {}", settings.output_dir.display());
    }

    info!("analysis finished in {:.2?}", start.elapsed());
    Ok(RunOutcome::Analyzed {
        modules: report.module_count(),
        overall: analyzer.overall_score(),
        reports,
    })
}

/// Process exit code of a command result
///
/// Success and the empty-project condition exit with 0; failures map their
/// severity to 0, 1 or 2.
pub fn exit_code(result: &Result<RunOutcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => severity_exit_code(err.severity()),
    }
}

pub fn severity_exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Print an error for the user, with a hint where one helps
pub fn report_error(err: &ArchScoreError) {
    eprintln!("\nError: {}", err.user_message());
    match err {
        ArchScoreError::InvalidPath { .. } => {
            eprintln!("Suggestion: Check that the path exists and is a directory");
        }
        ArchScoreError::ConfigNotFound { .. } => {
            eprintln!(
                "Suggestion: Create a {} file with --init or pass an existing file with --config",
                DEFAULT_CONFIG_FILE
            );
        }
        ArchScoreError::OutputWrite { .. } => {
            eprintln!("Suggestion: Check that the output directory is writable or choose another with --output-dir");
        }
        _ => {}
    }

    let code = severity_exit_code(err.severity());
    if code > 0 {
        warn!("exiting with code {} due to {}", code, err.severity());
        eprintln!("\nExiting with code {} due to {}", code, err.severity());
    }
}
