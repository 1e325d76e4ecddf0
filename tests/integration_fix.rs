// tests/integration_fix.rs
//! `fix` over files on disk.

use gadgets_core::analysis::Engine;
use gadgets_core::cli::handlers::handle_fix;
use gadgets_core::config::Config;
use gadgets_core::exit::GadgetsExit;
use gadgets_core::fix::driver::fix_until_clean;
use std::fs;
use tempfile::TempDir;

const SOURCE: &str = r#"class Report {
    String render(StringBuffer head, StringBuffer body) {
        String s = "<h1>" + head.toString();
        return s + (body).toString() + "</p>";
    }
}
"#;

const FIXED: &str = r#"class Report {
    String render(StringBuffer head, StringBuffer body) {
        String s = "<h1>" + head;
        return s + (body) + "</p>";
    }
}
"#;

#[test]
fn fix_rewrites_files_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Report.java");
    fs::write(&path, SOURCE).unwrap();

    let exit = handle_fix(&Config::new(), &[dir.path().to_path_buf()], false);
    assert_eq!(exit, GadgetsExit::Success);
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXED);

    let report = Engine::new(&Config::new()).scan(&[path]);
    assert!(!report.has_problems());
}

#[test]
fn dry_run_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Report.java");
    fs::write(&path, SOURCE).unwrap();

    let exit = handle_fix(&Config::new(), &[path.clone()], true);
    assert_eq!(exit, GadgetsExit::Success);
    assert_eq!(fs::read_to_string(&path).unwrap(), SOURCE);
}

#[test]
fn driver_reports_edits() {
    let outcome = fix_until_clean(&Engine::new(&Config::new()), SOURCE).unwrap();
    assert_eq!(outcome.source, FIXED);
    assert_eq!(outcome.edits.len(), 2);
    assert_eq!(outcome.edits[0].original, "head.toString()");
    assert_eq!(outcome.edits[0].replacement, "head");
    assert_eq!(outcome.remaining, 0);
}

#[test]
fn disabled_rule_fixes_nothing() {
    let config = Config::parse_toml("[rules.string-buffer-to-string]\nenabled = false").unwrap();
    let outcome = fix_until_clean(&Engine::new(&config), SOURCE).unwrap();
    assert!(!outcome.changed());
}
