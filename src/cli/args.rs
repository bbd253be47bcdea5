//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// archscore - maintainability assessment for TypeScript/JavaScript projects
#[derive(Parser, Debug)]
#[command(name = "archscore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grade the maintainability of a TypeScript/JavaScript project")]
#[command(long_about = "archscore discovers the modules of a TypeScript/JavaScript project, measures \
cyclomatic complexity, callable length, method-name cohesion, coupling and propagation cost, \
and aggregates them into maintainability grades (1 = excellent, 5 = horrible). \
Results are written as JSON and markdown reports into the output directory.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Assess the project in the current directory
    archscore

    # Assess a specific project
    archscore --path ./my-project

    # Write reports somewhere else than ./result
    archscore --path ./my-project --output-dir ./reports

    # Skip additional directories (can specify multiple patterns)
    archscore --exclude generated --exclude 'legacy*'

Metric Options:
    # Give half credit to names that follow a sub-domain
    archscore --cohesion-mode lenient

    # Label the coupling metric as efferent
    archscore --coupling efferent

Configuration:
    # Use a specific settings file
    archscore --config ./archscore.toml

    # Use a specific architecture description
    archscore --arch-config ./architecture.json

    # Create a default settings file
    archscore --init

Verbosity:
    # Quiet mode with minimal output
    archscore --quiet

    # Verbose mode with debug logging on stderr
    archscore --verbose
")]
pub struct Args {
    /// Project root to assess
    #[arg(short, long, value_name = "PATH", help = "Project root to assess (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", help = "Directory for project-structure.json and the markdown reports (default: result)")]
    pub output_dir: Option<PathBuf>,

    /// Exclude directories matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for directories to skip (can be specified multiple times, e.g., --exclude node_modules --exclude dist)")]
    pub exclude: Vec<String>,

    /// Cohesion scoring mode
    #[arg(long, value_enum, value_name = "MODE", help = "Method-name cohesion scoring: 'strict' counts sub-domain names as off-domain, 'lenient' gives them half credit")]
    pub cohesion_mode: Option<CohesionModeArg>,

    /// Coupling label
    #[arg(long, value_enum, value_name = "VARIANT", help = "Label of the coupling metric (both count outgoing relative imports)")]
    pub coupling: Option<CouplingArg>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to settings file (defaults to .archscore.toml in the current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Architecture description path
    #[arg(long, value_name = "FILE", help = "Path to the architecture description JSON (default: config.json)")]
    pub arch_config: Option<PathBuf>,

    /// Debug log file
    #[arg(long, value_name = "FILE", help = "File receiving the debug log (default: logs/debug.log)")]
    pub log_file: Option<PathBuf>,

    /// Share parsed files between metrics
    #[arg(long, help = "Parse every file once and share it between metrics through a bounded cache")]
    pub cache: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (no progress or summary information)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show debug logging on stderr and the effective settings")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress spinners
    #[arg(long, help = "Disable progress spinners (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default settings file (.archscore.toml) in the current directory")]
    pub init: bool,
}

/// Cohesion scoring modes
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CohesionModeArg {
    Strict,
    Lenient,
}

/// Coupling labels
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CouplingArg {
    Afferent,
    Efferent,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
