// src/types.rs
//! Report data shared by the engine, the reporters and the CLI.

use crate::tree::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How loudly a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Prefix word for the report line.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Performance,
    Threading,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Threading => "Threading",
        }
    }
}

/// A reported diagnostic, detached from the tree it was found in.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub rule: &'static str,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub span: Span,
    pub anchor_text: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<&'static str>,
}

/// Inspection results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub problems: Vec<Problem>,
    /// Set when the file could not be read or parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            problems: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.error.is_none()
    }

    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.problems.iter().filter(|p| p.fix.is_some()).count()
    }
}

/// Aggregated results of one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileReport>,
    pub total_problems: usize,
    pub duration_ms: u128,
}

impl ScanReport {
    #[must_use]
    pub fn new(files: Vec<FileReport>, duration_ms: u128) -> Self {
        Self {
            total_problems: files.iter().map(|f| f.problems.len()).sum(),
            files,
            duration_ms,
        }
    }

    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.total_problems > 0
    }

    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.problems)
            .filter(|p| p.severity == severity)
            .count()
    }

    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.files.iter().map(FileReport::fixable_count).sum()
    }
}

/// Outcome of fixing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub path: PathBuf,
    pub applied: Vec<&'static str>,
    pub remaining: usize,
    pub written: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(severity: Severity, fix: Option<&'static str>) -> Problem {
        Problem {
            rule: "R",
            severity,
            line: 1,
            column: 1,
            span: Span::new(0, 1),
            anchor_text: "x".into(),
            message: "m".into(),
            fix,
        }
    }

    #[test]
    fn scan_report_counts() {
        let mut a = FileReport::new("A.java".into());
        a.problems.push(problem(Severity::Warning, Some("Remove .toString()")));
        a.problems.push(problem(Severity::Error, None));
        let b = FileReport::new("B.java".into());
        let report = ScanReport::new(vec![a, b], 3);
        assert_eq!(report.total_problems, 2);
        assert_eq!(report.count(Severity::Error), 1);
        assert_eq!(report.count(Severity::Info), 0);
        assert_eq!(report.fixable_count(), 1);
        assert!(report.has_problems());
        assert!(report.files[1].is_clean());
    }

    #[test]
    fn severity_parses_lowercase() {
        let s: Severity = serde_json::from_str("\"error\"").unwrap_or_default();
        assert_eq!(s, Severity::Error);
        assert_eq!(Severity::default(), Severity::Warning);
    }
}
