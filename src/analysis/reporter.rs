// src/analysis/reporter.rs
//! Turns rule matches into located diagnostics.

use super::rules::{Match, Rule};
use crate::fix::FixDescriptor;
use crate::tree::{Field, NodeId, NodeKind, Span, SyntaxTree};
use crate::types::{Problem, Severity};

/// One finding. Immutable once built; taking the fix consumes it.
#[derive(Debug)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub severity: Severity,
    pub anchor: NodeId,
    pub span: Span,
    pub line: usize,
    pub column: usize,
    pub anchor_text: String,
    pub message: String,
    fix: Option<FixDescriptor>,
}

impl Diagnostic {
    /// Builds the diagnostic for `m`, rendering the rule's template.
    #[must_use]
    pub fn new(tree: &SyntaxTree, rule: &dyn Rule, m: &Match) -> Self {
        let span = tree.span(m.anchor);
        let (line, column) = tree.line_col(span.start);
        let anchor_text = tree.text(m.anchor).to_string();
        let message = render(rule.template(), &anchor_text, &location(tree, m.anchor));
        Self {
            rule: rule.id(),
            severity: rule.severity(),
            anchor: m.anchor,
            span,
            line,
            column,
            anchor_text,
            message,
            fix: rule.fix(tree, m),
        }
    }

    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    #[must_use]
    pub fn fix_name(&self) -> Option<&'static str> {
        self.fix.as_ref().map(FixDescriptor::name)
    }

    #[must_use]
    pub fn into_fix(self) -> Option<FixDescriptor> {
        self.fix
    }

    /// Detached copy for reports.
    #[must_use]
    pub fn to_problem(&self) -> Problem {
        Problem {
            rule: self.rule,
            severity: self.severity,
            line: self.line,
            column: self.column,
            span: self.span,
            anchor_text: self.anchor_text.clone(),
            message: self.message.clone(),
            fix: self.fix_name(),
        }
    }
}

/// Receives diagnostics as a pass produces them.
pub trait DiagnosticSink {
    fn accept(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn accept(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Substitutes `#ref` and `#loc`. An empty location leaves no trailing space.
#[must_use]
pub fn render(template: &str, reference: &str, loc: &str) -> String {
    template
        .replace("#ref", reference)
        .replace("#loc", loc)
        .trim_end()
        .to_string()
}

/// Innermost named context of `id`: `in method 'f'`, `in class 'A'`, or
/// nothing at the top level.
#[must_use]
pub fn location(tree: &SyntaxTree, id: NodeId) -> String {
    for ancestor in tree.ancestors(id) {
        let label = match tree.kind(ancestor) {
            NodeKind::MethodDecl => "method",
            NodeKind::ClassDecl => "class",
            _ => continue,
        };
        if let Some(name) = tree.field_child(ancestor, Field::Name) {
            return format!("in {label} '{}'", tree.text(name));
        }
    }
    String::new()
}

/// Whether a `//noinspection` comment names `rule` on the line above `id`,
/// or above the statement or declaration that contains it.
#[must_use]
pub fn is_suppressed(tree: &SyntaxTree, id: NodeId, rule: &str) -> bool {
    let line_of = |node: NodeId| tree.line_col(tree.span(node).start).0;
    let statement = tree
        .ancestors(id)
        .find(|&a| is_statement(tree, a))
        .map(line_of);
    [Some(line_of(id)), statement]
        .into_iter()
        .flatten()
        .any(|line| comment_above_names(tree, line, rule))
}

fn is_statement(tree: &SyntaxTree, id: NodeId) -> bool {
    matches!(
        tree.kind(id),
        NodeKind::LocalVar | NodeKind::FieldDecl | NodeKind::MethodDecl | NodeKind::ClassDecl
    ) || tree.raw(id).ends_with("_statement")
}

fn comment_above_names(tree: &SyntaxTree, line: usize, rule: &str) -> bool {
    if line < 2 {
        return false;
    }
    let Some(previous) = tree.source().lines().nth(line - 2) else {
        return false;
    };
    let Some(ids) = previous.trim().strip_prefix("//noinspection") else {
        return false;
    };
    ids.split(',')
        .map(str::trim)
        .any(|listed| listed == rule || listed == "ALL")
}
