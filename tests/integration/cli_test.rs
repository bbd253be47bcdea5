//! Command-line parsing and exit codes

use clap::Parser;
use std::path::PathBuf;
use tempfile::tempdir;
use archscore::{
    cli::{analyze, exit_code, Args, Command, RunOutcome},
    cli::args::{CohesionModeArg, CouplingArg},
    config::CliConfig,
    error::{ArchScoreError, Result},
    models::config::{CohesionMode, CouplingVariant, Settings},
};

#[test]
fn test_args_parsing() {
    let args = Args::parse_from([
        "archscore",
        "--path",
        "./project",
        "--output-dir",
        "./reports",
        "--exclude",
        "generated",
        "--exclude",
        "legacy*",
        "--cohesion-mode",
        "lenient",
        "--coupling",
        "efferent",
        "--cache",
        "--quiet",
        "--no-colors",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("./project")));
    assert_eq!(args.output_dir, Some(PathBuf::from("./reports")));
    assert_eq!(args.exclude, vec!["generated".to_string(), "legacy*".to_string()]);
    assert_eq!(args.cohesion_mode, Some(CohesionModeArg::Lenient));
    assert_eq!(args.coupling, Some(CouplingArg::Efferent));
    assert!(args.cache);
    assert!(args.quiet);
    assert!(args.no_colors);
    assert!(!args.init);
}

#[test]
fn test_args_to_cli_config() {
    let args = Args::parse_from(["archscore", "--cohesion-mode", "strict", "--coupling", "afferent", "-c", "custom.toml"]);
    let config = CliConfig::from_args(&args);
    assert_eq!(config.config_path(), Some(&PathBuf::from("custom.toml")));

    let cli_args = config.into_args();
    assert_eq!(cli_args.cohesion_mode, Some(CohesionMode::Strict));
    assert_eq!(cli_args.coupling_variant, Some(CouplingVariant::Afferent));
    assert!(cli_args.exclude.is_none());
}

#[test]
fn test_init_flag_selects_init_command() {
    let args = Args::parse_from(["archscore", "--init"]);
    assert!(matches!(Command::from_args(args), Command::Init));

    let args = Args::parse_from(["archscore"]);
    assert!(matches!(Command::from_args(args), Command::Analyze(_)));
}

#[test]
fn test_invalid_cohesion_mode_is_rejected() {
    let result = Args::try_parse_from(["archscore", "--cohesion-mode", "loose"]);
    assert!(result.is_err());
}

#[test]
fn test_exit_codes() {
    assert_eq!(exit_code(&Ok(RunOutcome::EmptyProject)), 0);

    let critical: Result<RunOutcome> = Err(ArchScoreError::invalid_path("/does/not/exist"));
    assert_eq!(exit_code(&critical), 2);

    let error: Result<RunOutcome> = Err(ArchScoreError::metric_error("Coupling", "no imports table"));
    assert_eq!(exit_code(&error), 1);

    let warning: Result<RunOutcome> = Err(ArchScoreError::permission_denied("/locked"));
    assert_eq!(exit_code(&warning), 0);
}

#[test]
fn test_missing_project_is_critical() -> Result<()> {
    let temp = tempdir()?;
    let settings = Settings {
        scan_path: temp.path().join("missing"),
        output_dir: temp.path().join("result"),
        quiet: true,
        show_progress: false,
        log_file: None,
        ..Settings::default()
    };

    let result = analyze(&settings);
    assert!(result.is_err());
    assert_eq!(exit_code(&result), 2);
    Ok(())
}
