// src/analysis/mod.rs
//! Core analysis logic (the rule engine).

pub mod reporter;
pub mod rules;
pub mod visitor;

pub use reporter::{Diagnostic, DiagnosticSink};
pub use rules::{Match, Rule, RuleContext};
pub use visitor::{traverse, Flow, Visitor};

use crate::config::Config;
use crate::error::{GadgetError, Result};
use crate::java;
use crate::oracle::{DeclarationOracle, Oracle};
use crate::tree::{NodeId, NodeKind, SyntaxTree};
use crate::types::{FileReport, ScanReport};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Marker in the first lines of a file that skips it entirely.
pub const IGNORE_DIRECTIVE: &str = "gadgets:ignore";

pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
    by_kind: HashMap<NodeKind, Vec<usize>>,
}

impl Engine {
    /// Engine running the rules `config` enables.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_rules(rules::enabled(&config.rules))
    }

    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        let mut by_kind: HashMap<NodeKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for &kind in rule.kinds() {
                by_kind.entry(kind).or_default().push(index);
            }
        }
        Self { rules, by_kind }
    }

    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// One pass over `tree`. Diagnostics come out in traversal order.
    #[must_use]
    pub fn inspect(&self, tree: &SyntaxTree, oracle: &dyn Oracle) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.inspect_into(tree, oracle, &mut out);
        out
    }

    pub fn inspect_into(&self, tree: &SyntaxTree, oracle: &dyn Oracle, sink: &mut dyn DiagnosticSink) {
        if tree.is_empty() {
            return;
        }
        let mut pass = Pass {
            engine: self,
            ctx: RuleContext { tree, oracle },
            sink,
        };
        traverse(tree, tree.root(), &mut pass);
    }

    /// Parses `source` and inspects it against its own declarations.
    ///
    /// # Errors
    /// Returns error if the source cannot be parsed.
    pub fn inspect_source(&self, source: &str) -> Result<Vec<Diagnostic>> {
        let tree = java::parse(source)?;
        let oracle = DeclarationOracle::build(&tree);
        Ok(self.inspect(&tree, &oracle))
    }

    /// Inspects each file independently, in parallel.
    #[must_use]
    pub fn scan(&self, files: &[PathBuf]) -> ScanReport {
        let start = std::time::Instant::now();
        let results: Vec<FileReport> = files.par_iter().map(|path| self.scan_file(path)).collect();
        ScanReport::new(results, start.elapsed().as_millis())
    }

    fn scan_file(&self, path: &Path) -> FileReport {
        let mut report = FileReport::new(path.to_path_buf());
        match self.inspect_file(path) {
            Ok(diagnostics) => {
                tracing::debug!(path = %path.display(), problems = diagnostics.len(), "inspected");
                report.problems = diagnostics.iter().map(Diagnostic::to_problem).collect();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipped");
                report.error = Some(e.to_string());
            }
        }
        report
    }

    fn inspect_file(&self, path: &Path) -> Result<Vec<Diagnostic>> {
        let source = std::fs::read_to_string(path).map_err(|source| GadgetError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        if has_ignore_directive(&source) {
            tracing::debug!(path = %path.display(), "ignore directive");
            return Ok(Vec::new());
        }
        self.inspect_source(&source).map_err(|e| match e {
            GadgetError::Parse { .. } => GadgetError::Parse {
                path: path.to_path_buf(),
            },
            other => other,
        })
    }
}

/// `gadgets:ignore` within the first five lines.
#[must_use]
pub fn has_ignore_directive(source: &str) -> bool {
    source
        .lines()
        .take(5)
        .any(|line| line.contains(IGNORE_DIRECTIVE))
}

struct Pass<'a, 's> {
    engine: &'a Engine,
    ctx: RuleContext<'a>,
    sink: &'s mut dyn DiagnosticSink,
}

impl Visitor for Pass<'_, '_> {
    fn visit(&mut self, tree: &SyntaxTree, id: NodeId) -> Flow {
        let Some(indices) = self.engine.by_kind.get(&tree.kind(id)) else {
            return Flow::Continue;
        };
        for &index in indices {
            let Some(rule) = self.engine.rules.get(index) else {
                continue;
            };
            let Some(m) = rule.check(&self.ctx, id) else {
                continue;
            };
            if reporter::is_suppressed(tree, m.anchor, rule.id()) {
                tracing::trace!(rule = rule.id(), "suppressed");
                continue;
            }
            self.sink.accept(Diagnostic::new(tree, rule.as_ref(), &m));
        }
        Flow::Continue
    }
}
