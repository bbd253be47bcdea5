//! Settings files, environment overrides and their effect on grading

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use archscore::{
    cli::{analyze, init_config, RunOutcome},
    config::{load_config_with_env_prefix, parse_config_file, CliArgs},
    error::Result,
    models::config::{CohesionMode, CouplingVariant},
    output::{DETAILED_DIR, MODULES_DIR},
};

fn quiet_args(config: PathBuf) -> CliArgs {
    CliArgs {
        config: Some(config),
        quiet: true,
        no_progress: true,
        no_colors: true,
        ..Default::default()
    }
}

#[test]
fn test_settings_file_is_loaded() -> Result<()> {
    let temp = tempdir()?;
    let config_path = temp.path().join("archscore.toml");
    fs::write(
        &config_path,
        format!(
            r#"
scan_path = "{}"
output_dir = "{}"
exclude_patterns = ["vendor"]
cohesion_mode = "lenient"
coupling_variant = "efferent"

[weights]
modifiability = 3.0

[thresholds]
coupling = [0, 0, 0, 1]
"#,
            temp.path().display(),
            temp.path().join("reports").display()
        ),
    )?;

    let settings = load_config_with_env_prefix(quiet_args(config_path), "ARCHSCORE_IT_FILE")?;

    assert_eq!(settings.scan_path, temp.path());
    assert_eq!(settings.output_dir, temp.path().join("reports"));
    assert_eq!(settings.exclude_patterns, vec!["vendor".to_string()]);
    assert_eq!(settings.cohesion_mode, CohesionMode::Lenient);
    assert_eq!(settings.coupling_variant, CouplingVariant::Efferent);
    assert_eq!(settings.weights.modifiability, 3.0);
    assert_eq!(settings.weights.analyzability, 1.0);
    assert_eq!(settings.thresholds.coupling, Some(vec![0.0, 0.0, 0.0, 1.0]));
    assert!(settings.quiet);
    assert!(!settings.show_progress);
    Ok(())
}

#[test]
fn test_environment_sits_between_file_and_flags() -> Result<()> {
    let temp = tempdir()?;
    let config_path = temp.path().join("archscore.toml");
    fs::write(
        &config_path,
        format!("scan_path = \"{}\"\ncohesion_mode = \"strict\"\n", temp.path().display()),
    )?;

    std::env::set_var("ARCHSCORE_IT_ENV_COHESION_MODE", "lenient");
    std::env::set_var("ARCHSCORE_IT_ENV_COUPLING", "efferent");

    let from_env = load_config_with_env_prefix(quiet_args(config_path.clone()), "ARCHSCORE_IT_ENV")?;
    assert_eq!(from_env.cohesion_mode, CohesionMode::Lenient);
    assert_eq!(from_env.coupling_variant, CouplingVariant::Efferent);

    let args = CliArgs {
        coupling_variant: Some(CouplingVariant::Afferent),
        ..quiet_args(config_path)
    };
    let from_flags = load_config_with_env_prefix(args, "ARCHSCORE_IT_ENV")?;
    assert_eq!(from_flags.coupling_variant, CouplingVariant::Afferent);

    std::env::remove_var("ARCHSCORE_IT_ENV_COHESION_MODE");
    std::env::remove_var("ARCHSCORE_IT_ENV_COUPLING");
    Ok(())
}

#[test]
fn test_invalid_thresholds_are_rejected() -> Result<()> {
    let temp = tempdir()?;
    let config_path = temp.path().join("archscore.toml");
    fs::write(
        &config_path,
        format!(
            "scan_path = \"{}\"\n[thresholds]\ncyclomatic_complexity = [40, 30, 20, 10]\n",
            temp.path().display()
        ),
    )?;

    let result = load_config_with_env_prefix(quiet_args(config_path), "ARCHSCORE_IT_BAD");
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_missing_settings_file_is_reported() -> Result<()> {
    let temp = tempdir()?;
    let result = load_config_with_env_prefix(quiet_args(temp.path().join("absent.toml")), "ARCHSCORE_IT_MISSING");
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_threshold_override_changes_grades() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("project");
    fs::create_dir_all(project.join("src"))?;
    fs::write(project.join("src/a.ts"), "export function alpha() {}")?;
    fs::write(project.join("src/b.ts"), "export function beta() {}")?;
    fs::write(
        project.join("src/main.ts"),
        "import { alpha } from './a';\nimport { beta } from './b';\nexport function run() { alpha(); beta(); }",
    )?;

    let config_path = temp.path().join("archscore.toml");
    fs::write(
        &config_path,
        format!(
            "scan_path = \"{}\"\noutput_dir = \"{}\"\narchitecture_config = \"{}\"\n[thresholds]\ncoupling = [0, 0, 0, 1]\n",
            project.display(),
            temp.path().join("result").display(),
            temp.path().join("none.json").display()
        ),
    )?;

    let mut args = quiet_args(config_path);
    args.log_file = None;
    let mut settings = load_config_with_env_prefix(args, "ARCHSCORE_IT_GRADES")?;
    settings.log_file = None;

    assert!(matches!(analyze(&settings)?, RunOutcome::Analyzed { .. }));

    let modularity = fs::read_to_string(settings.output_dir.join(DETAILED_DIR).join(MODULES_DIR).join("modularity.md"))?;
    let main_line = modularity
        .lines()
        .skip_while(|line| !line.starts_with("## Afferent Coupling"))
        .find(|line| line.contains("main.ts"))
        .unwrap();
    assert!(main_line.starts_with("Score: 2.00 (=5)"));
    Ok(())
}

#[test]
fn test_init_writes_parseable_defaults() -> Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join(".archscore.toml");

    assert_eq!(init_config(&path)?, RunOutcome::Initialized(path.clone()));
    assert!(path.is_file());
    assert_eq!(init_config(&path)?, RunOutcome::AlreadyInitialized(path.clone()));

    let partial = parse_config_file(&path)?;
    assert!(partial.scan_path.is_none());
    assert!(partial.thresholds.is_none());
    Ok(())
}
