// src/cli/handlers/mod.rs
//! Command handlers.

use super::args::OutputFormat;
use crate::analysis::{self, rules, Engine};
use crate::config::Config;
use crate::discovery;
use crate::exit::GadgetsExit;
use crate::fix::driver::fix_until_clean;
use crate::reporting;
use crate::types::FixReport;
use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Handles `gadgets scan`.
///
/// # Errors
/// Returns error if the JSON report cannot be written.
pub fn handle_scan(config: &Config, paths: &[PathBuf], format: OutputFormat) -> Result<GadgetsExit> {
    let files = discovery::discover(paths, config);
    tracing::debug!(files = files.len(), "discovered");
    let report = Engine::new(config).scan(&files);

    match format {
        OutputFormat::Json => reporting::print_json(&report)?,
        OutputFormat::Text => reporting::print_report(&report),
    }

    Ok(if report.has_problems() {
        GadgetsExit::ProblemsFound
    } else if report.failed_files() > 0 {
        GadgetsExit::Error
    } else {
        GadgetsExit::Success
    })
}

/// Handles `gadgets fix`. Per-file failures are printed and turn the exit
/// code into [`GadgetsExit::FixFailure`].
#[must_use]
pub fn handle_fix(config: &Config, paths: &[PathBuf], dry_run: bool) -> GadgetsExit {
    let files = discovery::discover(paths, config);
    let engine = Engine::new(config);

    let results: Vec<Result<FixReport>> = files
        .par_iter()
        .map(|path| fix_file(&engine, path, dry_run))
        .collect();

    let mut reports = Vec::new();
    let mut failed = false;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed = true;
                eprintln!("{} {e:#}", "fix failed:".red().bold());
            }
        }
    }
    reporting::print_fixes(&reports, dry_run);

    if failed {
        GadgetsExit::FixFailure
    } else {
        GadgetsExit::Success
    }
}

fn fix_file(engine: &Engine, path: &Path, dry_run: bool) -> Result<FixReport> {
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut report = FixReport {
        path: path.to_path_buf(),
        applied: Vec::new(),
        remaining: 0,
        written: false,
    };
    if analysis::has_ignore_directive(&source) {
        return Ok(report);
    }

    let outcome = fix_until_clean(engine, &source).with_context(|| format!("fixing {}", path.display()))?;
    report.applied = outcome.edits.iter().map(|e| e.fix).collect();
    report.remaining = outcome.remaining;

    if outcome.changed() && !dry_run {
        fs::write(path, &outcome.source).with_context(|| format!("writing {}", path.display()))?;
        report.written = true;
    }
    Ok(report)
}

/// Handles `gadgets rules`.
#[must_use]
pub fn handle_rules(config: &Config) -> GadgetsExit {
    for (rule, enabled) in rules::catalog(&config.rules) {
        let state = if enabled {
            "on".green()
        } else {
            "off".dimmed()
        };
        println!("{} [{state}] {}", rule.id().bold(), rule.display_name());
        println!(
            "    category: {}  severity: {}  fix: {}",
            rule.category().label(),
            rule.severity(),
            rule.fix_name().unwrap_or("none")
        );
    }
    GadgetsExit::Success
}
