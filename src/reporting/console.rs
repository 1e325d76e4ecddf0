// src/reporting/console.rs
//! Console output for scan and fix results.

use crate::types::{FixReport, Problem, ScanReport, Severity};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Prints every problem grouped by file, then a summary line.
pub fn print_report(report: &ScanReport) {
    for file in report.files.iter().filter(|f| !f.is_clean()) {
        if let Some(error) = &file.error {
            println!("{} {}: {error}", "skipped:".yellow().bold(), file.path.display());
            println!();
            continue;
        }
        let lines: Vec<String> = fs::read_to_string(&file.path)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default();
        for p in &file.problems {
            print_problem(&file.path, p, lines.get(p.line.saturating_sub(1)).map(String::as_str));
        }
    }
    print_summary(report);
}

fn print_problem(path: &Path, p: &Problem, source_line: Option<&str>) {
    let header = format!("{}: {}", p.severity.prefix(), p.message);
    match p.severity {
        Severity::Error => println!("{}", header.red().bold()),
        Severity::Warning => println!("{}", header.yellow()),
        Severity::Info => println!("{}", header.dimmed()),
    }
    println!("  {} {}:{}:{}", "-->".blue(), path.display(), p.line, p.column);

    if let Some(line) = source_line {
        let gutter = format!("{:3} |", p.line);
        println!("   {}", "|".blue());
        println!("   {} {line}", gutter.blue());
        let width = p.anchor_text.lines().next().map_or(1, |l| l.chars().count());
        println!("   {} {}", "|".blue(), caret_line(p.column, width).red().bold());
    }

    let fix = p
        .fix
        .map(|name| format!(" (fix available: {name})"))
        .unwrap_or_default();
    println!("   {} {}{}", "=".blue(), format!("rule: {}", p.rule).yellow(), fix.green());
    println!();
}

/// Spaces up to 1-based `column`, then `width` carets.
#[must_use]
pub fn caret_line(column: usize, width: usize) -> String {
    format!(
        "{}{}",
        " ".repeat(column.saturating_sub(1)),
        "^".repeat(width.max(1))
    )
}

fn print_summary(report: &ScanReport) {
    #[allow(clippy::cast_possible_truncation)]
    let duration = Duration::from_millis(report.duration_ms as u64);
    let files = report.files.len();

    if !report.has_problems() && report.failed_files() == 0 {
        println!(
            "{} No problems found in {files} {} ({duration:?}).",
            "OK".green().bold(),
            pluralize("file", files)
        );
        return;
    }

    let mut parts = Vec::new();
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let n = report.count(severity);
        if n > 0 {
            parts.push(format!("{n} {}", pluralize(severity.prefix(), n)));
        }
    }
    let fixable = report.fixable_count();
    if fixable > 0 {
        parts.push(format!("{fixable} fixable"));
    }
    let failed = report.failed_files();
    if failed > 0 {
        parts.push(format!("{failed} skipped {}", pluralize("file", failed)));
    }

    let mark = if report.count(Severity::Error) > 0 {
        "X".red().bold()
    } else {
        "~".yellow().bold()
    };
    println!("{mark} Gadgets found {} in {files} {} ({duration:?}).", parts.join(", "), pluralize("file", files));
}

/// Prints what `fix` did per file.
pub fn print_fixes(fixes: &[FixReport], dry_run: bool) {
    let verb = if dry_run { "would fix" } else { "fixed" };
    let mut total = 0;
    for f in fixes.iter().filter(|f| !f.applied.is_empty()) {
        total += f.applied.len();
        println!(
            "{} {} ({} {})",
            verb.green().bold(),
            f.path.display(),
            f.applied.len(),
            pluralize("edit", f.applied.len())
        );
    }
    let remaining: usize = fixes.iter().map(|f| f.remaining).sum();
    println!(
        "{} {total} {} applied, {remaining} {} remaining.",
        if total > 0 { "OK".green().bold() } else { "~".yellow().bold() },
        pluralize("fix", total),
        pluralize("problem", remaining)
    );
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else if word.ends_with('x') {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_line_aligns_with_column() {
        assert_eq!(caret_line(1, 3), "^^^");
        assert_eq!(caret_line(5, 8), "    ^^^^^^^^");
        assert_eq!(caret_line(2, 0), " ^");
    }

    #[test]
    fn pluralize_words() {
        assert_eq!(pluralize("warning", 1), "warning");
        assert_eq!(pluralize("warning", 2), "warnings");
        assert_eq!(pluralize("fix", 2), "fixes");
    }
}
