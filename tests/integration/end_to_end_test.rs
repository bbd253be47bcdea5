//! End-to-end runs of the whole assessment

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use archscore::{
    cli::{analyze, RunOutcome},
    core::STRUCTURE_FILE,
    error::Result,
    models::config::Settings,
    output::{DETAILED_DIR, MODULES_DIR, REPORT_FILE},
    SubCharacteristic,
};

fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn settings_for(temp: &TempDir, project: &Path) -> Settings {
    Settings {
        scan_path: project.to_path_buf(),
        output_dir: temp.path().join("result"),
        quiet: true,
        show_progress: false,
        use_colors: false,
        log_file: None,
        architecture_config: temp.path().join("no-architecture.json"),
        ..Settings::default()
    }
}

/// userService and cartService behind a services index
fn create_shop(project: &Path) -> Result<()> {
    write(
        project,
        "src/services/userService.ts",
        r#"
export function getUser(id: string) {
    return { id };
}

export function deleteUser(id: string) {
    if (!id) {
        throw new Error('missing id');
    }
}

export function updateUser(id: string, name: string) {
    return { id, name };
}
"#,
    )?;
    write(
        project,
        "src/services/cartService.ts",
        r#"
export function getCart(userId: string) {
    return [];
}

export function addToCart(userId: string, item: string) {
    return item.length > 0 && userId.length > 0;
}
"#,
    )?;
    write(
        project,
        "src/services/index.ts",
        r#"
import { getUser } from './userService';
import { getCart } from './cartService';
import express from 'express';

export function checkout(id: string) {
    return getCart(getUser(id).id);
}
"#,
    )?;
    Ok(())
}

fn module_line<'a>(text: &'a str, section: &str, file: &str) -> &'a str {
    let start = text.find(&format!("## {}", section)).unwrap();
    text[start..]
        .lines()
        .find(|line| line.contains(file))
        .unwrap()
}

#[test]
fn test_shop_project() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("shop");
    create_shop(&project)?;
    let settings = settings_for(&temp, &project);

    let outcome = analyze(&settings)?;
    let (modules, reports) = match outcome {
        RunOutcome::Analyzed { modules, reports, .. } => (modules, reports),
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(modules, 3);
    assert_eq!(reports.len(), 11);

    let output = &settings.output_dir;
    assert!(output.join(STRUCTURE_FILE).is_file());
    assert!(output.join(REPORT_FILE).is_file());
    for sub in SubCharacteristic::ALL {
        assert!(output.join(DETAILED_DIR).join(format!("{}.md", sub.key())).is_file());
        assert!(output
            .join(DETAILED_DIR)
            .join(MODULES_DIR)
            .join(format!("{}.md", sub.key()))
            .is_file());
    }

    let modularity = fs::read_to_string(output.join(DETAILED_DIR).join(MODULES_DIR).join("modularity.md"))?;
    // cohesive services
    assert!(module_line(&modularity, "Method Name Cohesion", "userService.ts").starts_with("Score: 1.00 (=1)"));
    assert!(module_line(&modularity, "Method Name Cohesion", "cartService.ts").starts_with("Score: 1.00 (=1)"));
    // index imports both services: coupling 2, the good band
    assert!(module_line(&modularity, "Afferent Coupling", "index.ts").starts_with("Score: 2.00 (=2)"));

    let modifiability = fs::read_to_string(output.join(DETAILED_DIR).join(MODULES_DIR).join("modifiability.md"))?;
    assert!(module_line(&modifiability, "Propagation Cost", "userService.ts").starts_with("Score: 0.00 (=1)"));
    assert!(module_line(&modifiability, "Propagation Cost", "cartService.ts").starts_with("Score: 0.00 (=1)"));
    assert!(module_line(&modifiability, "Propagation Cost", "index.ts").starts_with("Score: 0.67 (=5)"));

    let report = fs::read_to_string(output.join(REPORT_FILE))?;
    assert!(report.contains("| Modularity |"));
    assert!(report.contains("high propagation cost of 0.67"));
    Ok(())
}

#[test]
fn test_import_cycle_is_flagged_and_deduplicated() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("cyclic");
    write(&project, "src/a.ts", "import { b } from './b';\nexport function a() { b(); }")?;
    write(&project, "src/b.ts", "import { c } from './c';\nexport function b() { c(); }")?;
    write(&project, "src/c.ts", "import { a } from './a';\nexport function c() { a(); }")?;
    let settings = settings_for(&temp, &project);

    analyze(&settings)?;

    let report = fs::read_to_string(settings.output_dir.join(REPORT_FILE))?;
    let problem_rows: Vec<&str> = report
        .lines()
        .skip_while(|line| !line.starts_with("## Problem modules"))
        .filter(|line| line.starts_with("| /") || line.contains(".ts |"))
        .collect();
    assert_eq!(problem_rows.len(), 3);
    for row in problem_rows {
        assert_eq!(row.matches("import cycle").count(), 1);
        assert_eq!(row.matches("high propagation cost").count(), 1);
        assert!(row.contains("1. ") && row.contains("<br>2. "));
    }
    Ok(())
}

#[test]
fn test_issue_shared_by_sub_characteristics_appears_once() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("complex");
    let conditions: String = (0..45)
        .map(|i| format!("    if (x === {}) {{ return {}; }}\n", i, i))
        .collect();
    write(
        &project,
        "src/engine.ts",
        &format!("export function decide(x: number) {{\n{}    return -1;\n}}\n", conditions),
    )?;
    let settings = settings_for(&temp, &project);

    analyze(&settings)?;

    let report = fs::read_to_string(settings.output_dir.join(REPORT_FILE))?;
    // complexity feeds analyzability, testability and reusability
    assert_eq!(report.matches("Function decide has a cyclomatic complexity of 46").count(), 1);

    let testability = fs::read_to_string(settings.output_dir.join(DETAILED_DIR).join("testability.md"))?;
    assert!(testability.contains("| [Cyclomatic Complexity](#cyclomatic-complexity) | 46.00 | Horrible (=5) |"));
    Ok(())
}

#[test]
fn test_empty_project_stops_after_structure() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("types-only");
    write(&project, "src/types.ts", "export type Id = string;")?;
    let settings = settings_for(&temp, &project);

    let outcome = analyze(&settings)?;
    assert_eq!(outcome, RunOutcome::EmptyProject);
    assert!(settings.output_dir.join(STRUCTURE_FILE).is_file());
    assert!(!settings.output_dir.join(REPORT_FILE).exists());
    Ok(())
}

#[test]
fn test_cache_does_not_change_reports() -> Result<()> {
    let temp = tempdir()?;
    let project = temp.path().join("shop");
    create_shop(&project)?;

    let plain = settings_for(&temp, &project);
    let cached = Settings {
        cache_enabled: true,
        output_dir: temp.path().join("cached"),
        ..plain.clone()
    };
    analyze(&plain)?;
    analyze(&cached)?;

    let read = |dir: &PathBuf, rel: &str| fs::read_to_string(dir.join(rel)).unwrap();
    assert_eq!(read(&plain.output_dir, STRUCTURE_FILE), read(&cached.output_dir, STRUCTURE_FILE));
    for sub in SubCharacteristic::ALL {
        let detailed = format!("{}/{}.md", DETAILED_DIR, sub.key());
        let modules = format!("{}/{}/{}.md", DETAILED_DIR, MODULES_DIR, sub.key());
        assert_eq!(read(&plain.output_dir, &detailed), read(&cached.output_dir, &detailed));
        assert_eq!(read(&plain.output_dir, &modules), read(&cached.output_dir, &modules));
    }
    Ok(())
}
