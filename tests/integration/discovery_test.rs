//! Module discovery against on-disk projects

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use archscore::{
    core::{discover_project, read_structure_report, DiscoveryOutcome, SourceLoader, STRUCTURE_FILE},
    error::Result,
};

fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn create_layered_project(root: &Path) -> Result<()> {
    write(root, "package.json", r#"{ "name": "layered" }"#)?;
    write(root, "main.ts", "export function bootstrap() {}")?;
    write(root, "src/app.ts", "import { route } from './routes';\nexport function start() { route(); }")?;
    write(root, "src/routes/index.ts", "export function route() {}")?;
    write(root, "src/routes/users.ts", "export function listUsers() {}")?;
    write(root, "src/models/user.ts", "export interface User { id: string }")?;
    write(root, "src/models/index.ts", "export * from './user';")?;
    write(root, "src/node_modules/lib/index.js", "module.exports = function lib() {};")?;
    write(root, "dist/app.js", "function start() {}")?;
    Ok(())
}

#[test]
fn test_layered_project_structure() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("project");
    create_layered_project(&project)?;
    let output = temp.path().join("result");

    let exclude = vec!["node_modules".to_string(), "dist".to_string()];
    let mut loader = SourceLoader::new(&["ts", "js"]);
    let outcome = discover_project(&project, &exclude, &output, &mut loader)?;

    let root = project.canonicalize()?;
    let report = match outcome {
        DiscoveryOutcome::Found(report) => report,
        DiscoveryOutcome::Empty(_) => panic!("modules expected"),
    };

    let src = &report.structure[&root.join("src")];
    assert_eq!(src.name, "src");
    let names: Vec<&str> = src.modules.values().map(String::as_str).collect();
    assert_eq!(names, vec!["app", "routes"]);

    let routes = &report.structure[&root.join("src/routes")];
    assert_eq!(routes.modules.len(), 1);
    assert_eq!(routes.modules[&root.join("src/routes/users.ts")], "users");

    // type-only and re-export-only files are not modules
    assert!(!report.structure.contains_key(&root.join("src/models")));
    assert!(!report.contains(&root.join("main.ts")));
    assert_eq!(report.module_count(), 3);
    Ok(())
}

#[test]
fn test_structure_json_round_trip_keeps_order() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("project");
    for name in ["zeta", "alpha", "mid"] {
        write(&project, &format!("src/{}.ts", name), &format!("export function {}() {{}}", name))?;
    }
    write(&project, "lib/util/format.ts", "export function format() {}")?;
    let output = temp.path().join("result");

    let mut loader = SourceLoader::new(&["ts"]);
    let outcome = discover_project(&project, &[], &output, &mut loader)?;

    let json = fs::read_to_string(output.join(STRUCTURE_FILE))?;
    assert!(json.contains("\"flatModuleMap\""));
    assert!(json.contains("\"structure\""));

    let reloaded = read_structure_report(&output.join(STRUCTURE_FILE))?;
    assert_eq!(reloaded.flat_module_map, outcome.report().flat_module_map);

    let root = project.canonicalize()?;
    let expected: Vec<PathBuf> = vec![
        root.join("lib/util/format.ts"),
        root.join("src/alpha.ts"),
        root.join("src/mid.ts"),
        root.join("src/zeta.ts"),
    ];
    assert_eq!(reloaded.flat_module_map, expected);
    Ok(())
}

#[test]
fn test_empty_project_still_writes_structure() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("project");
    write(&project, "src/types.ts", "export type Id = string;")?;
    let output = temp.path().join("result");

    let mut loader = SourceLoader::new(&["ts"]);
    let outcome = discover_project(&project, &[], &output, &mut loader)?;

    assert!(matches!(outcome, DiscoveryOutcome::Empty(_)));
    let reloaded = read_structure_report(&output.join(STRUCTURE_FILE))?;
    assert!(reloaded.is_empty());
    assert!(reloaded.structure.is_empty());
    Ok(())
}

#[test]
fn test_missing_root_is_invalid_path() {
    let temp = tempdir().unwrap();
    let mut loader = SourceLoader::new(&["ts"]);
    let result = discover_project(&temp.path().join("absent"), &[], &temp.path().join("result"), &mut loader);
    let err = result.unwrap_err();
    assert!(err.is_critical());
}
