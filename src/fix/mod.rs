// src/fix/mod.rs
//! Quick-fix application.
//!
//! A [`FixDescriptor`] names its target by [`NodeId`] in one snapshot and
//! computes the replacement text only when applied. Applying consumes the
//! descriptor. Stale or malformed targets fail without touching the source.

pub mod driver;

use crate::error::FixError;
use crate::java;
use crate::tree::{NodeId, NodeKind, Snapshot, Span, SyntaxTree};
use parking_lot::Mutex;
use std::fmt;

/// Computes replacement text for `target` from the tree as it is now.
pub type Producer = fn(&SyntaxTree, NodeId) -> Option<String>;

/// A pending rewrite of one node. Not `Clone`, so it is applied at most once.
pub struct FixDescriptor {
    name: &'static str,
    rule: &'static str,
    target: NodeId,
    expected_kind: NodeKind,
    snapshot: Snapshot,
    produce: Producer,
}

impl fmt::Debug for FixDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixDescriptor")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .field("target", &self.target)
            .field("expected_kind", &self.expected_kind)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl FixDescriptor {
    /// Describes a replacement of `target`, which must still be a node of
    /// its current kind when the fix is applied.
    #[must_use]
    pub fn new(
        name: &'static str,
        rule: &'static str,
        tree: &SyntaxTree,
        target: NodeId,
        produce: Producer,
    ) -> Self {
        Self {
            name,
            rule,
            target,
            expected_kind: tree.kind(target),
            snapshot: tree.snapshot(),
            produce,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// Validates the target against `tree` and computes the replacement.
    fn plan(self, tree: &SyntaxTree) -> Result<Planned, FixError> {
        if self.snapshot != tree.snapshot() {
            return Err(FixError::Stale {
                expected: self.snapshot,
                found: tree.snapshot(),
            });
        }
        let Some(node) = tree.get(self.target) else {
            return Err(FixError::invalid(format!("{:?} is not in the tree", self.target)));
        };
        if node.kind != self.expected_kind {
            return Err(FixError::invalid(format!(
                "expected {}, found {}",
                self.expected_kind.as_str(),
                node.kind.as_str()
            )));
        }
        let span = node.span;
        let replacement = (self.produce)(tree, self.target)
            .ok_or_else(|| FixError::invalid("replacement could not be computed"))?;
        Ok(Planned {
            name: self.name,
            span,
            replacement,
        })
    }
}

struct Planned {
    name: &'static str,
    span: Span,
    replacement: String,
}

impl Planned {
    fn splice(&self, source: &str) -> Result<(String, String), FixError> {
        let original = source
            .get(self.span.start..self.span.end)
            .ok_or_else(|| FixError::invalid("span is outside the source"))?;
        let mut out = String::with_capacity(source.len() + self.replacement.len());
        out.push_str(source.get(..self.span.start).unwrap_or(""));
        out.push_str(&self.replacement);
        out.push_str(source.get(self.span.end..).unwrap_or(""));
        Ok((out, original.to_string()))
    }
}

/// Applies `fix` to the tree's own source and returns the new text.
///
/// # Errors
/// Returns [`FixError`] if the descriptor belongs to another snapshot or its
/// target no longer fits.
pub fn apply_to_source(tree: &SyntaxTree, fix: FixDescriptor) -> Result<String, FixError> {
    let planned = fix.plan(tree)?;
    planned.splice(tree.source()).map(|(text, _)| text)
}

/// One applied replacement. Keeps enough to undo itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub fix: &'static str,
    pub span: Span,
    pub original: String,
    pub replacement: String,
    pub before: Snapshot,
    pub after: Snapshot,
}

#[derive(Debug)]
struct BufferState {
    text: String,
    snapshot: Snapshot,
}

/// Mutable source text. Edits are serialized through the lock and each one
/// moves the buffer to a new snapshot.
#[derive(Debug)]
pub struct SourceBuffer {
    state: Mutex<BufferState>,
}

impl SourceBuffer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(BufferState {
                text: text.into(),
                snapshot: Snapshot::fresh(),
            }),
        }
    }

    /// A buffer whose current snapshot is the tree's.
    #[must_use]
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        Self {
            state: Mutex::new(BufferState {
                text: tree.source().to_string(),
                snapshot: tree.snapshot(),
            }),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot
    }

    /// Parses the current text under the current snapshot.
    ///
    /// # Errors
    /// Returns error if parsing fails.
    pub fn tree(&self) -> crate::error::Result<SyntaxTree> {
        let state = self.state.lock();
        java::parse_snapshot(&state.text, state.snapshot)
    }

    /// Applies `fix`, which must have been computed from `tree`, and `tree`
    /// must be this buffer's current snapshot.
    ///
    /// # Errors
    /// Returns [`FixError::Stale`] if the buffer moved on, or
    /// [`FixError::InvalidTarget`] if the target does not fit.
    pub fn apply(&self, tree: &SyntaxTree, fix: FixDescriptor) -> Result<Edit, FixError> {
        let mut state = self.state.lock();
        if state.snapshot != tree.snapshot() {
            return Err(FixError::Stale {
                expected: tree.snapshot(),
                found: state.snapshot,
            });
        }
        let planned = fix.plan(tree)?;
        let (text, original) = planned.splice(&state.text)?;
        let edit = Edit {
            fix: planned.name,
            span: planned.span,
            original,
            replacement: planned.replacement,
            before: state.snapshot,
            after: Snapshot::fresh(),
        };
        tracing::debug!(fix = edit.fix, start = edit.span.start, end = edit.span.end, "applied fix");
        state.text = text;
        state.snapshot = edit.after;
        Ok(edit)
    }

    /// Undoes `edit`. Only the most recent edit can be reverted, since any
    /// later change moves the buffer past `edit.after`.
    ///
    /// # Errors
    /// Returns [`FixError::Stale`] if the buffer changed after `edit`.
    pub fn revert(&self, edit: &Edit) -> Result<(), FixError> {
        let mut state = self.state.lock();
        if state.snapshot != edit.after {
            return Err(FixError::Stale {
                expected: edit.after,
                found: state.snapshot,
            });
        }
        let end = edit.span.start + edit.replacement.len();
        if state.text.get(edit.span.start..end) != Some(edit.replacement.as_str()) {
            return Err(FixError::invalid("edited text is not where the edit left it"));
        }
        state.text.replace_range(edit.span.start..end, &edit.original);
        state.snapshot = edit.before;
        tracing::debug!(fix = edit.fix, "reverted fix");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SOURCE: &str = "class A { String f(StringBuffer sb) { return \"a\" + sb.toString(); } }";

    fn qualifier_text(tree: &SyntaxTree, call: NodeId) -> Option<String> {
        let q = tree.field_child(call, crate::tree::Field::Qualifier)?;
        Some(tree.text(q).to_string())
    }

    fn call(tree: &SyntaxTree) -> NodeId {
        tree.preorder()
            .into_iter()
            .find(|&id| tree.kind(id) == NodeKind::Call)
            .unwrap()
    }

    fn descriptor(tree: &SyntaxTree) -> FixDescriptor {
        FixDescriptor::new("Remove .toString()", "R", tree, call(tree), qualifier_text)
    }

    #[test]
    fn applies_to_source_without_mutating_tree() {
        let tree = java::parse(SOURCE).unwrap();
        let out = apply_to_source(&tree, descriptor(&tree)).unwrap();
        assert!(out.contains("return \"a\" + sb;"));
        assert_eq!(tree.source(), SOURCE);
    }

    #[test]
    fn stale_descriptor_is_rejected() {
        let old = java::parse(SOURCE).unwrap();
        let new = java::parse(SOURCE).unwrap();
        let err = apply_to_source(&new, descriptor(&old)).unwrap_err();
        assert!(matches!(err, FixError::Stale { .. }));
    }

    #[test]
    fn wrong_kind_is_invalid() {
        let tree = java::parse(SOURCE).unwrap();
        let fix = FixDescriptor {
            expected_kind: NodeKind::New,
            ..descriptor(&tree)
        };
        let err = apply_to_source(&tree, fix).unwrap_err();
        assert!(matches!(err, FixError::InvalidTarget { .. }));
    }

    #[test]
    fn producer_failure_is_invalid() {
        let tree = java::parse(SOURCE).unwrap();
        let fix = FixDescriptor::new("none", "R", &tree, tree.root(), |_, _| None);
        let err = apply_to_source(&tree, fix).unwrap_err();
        assert!(matches!(err, FixError::InvalidTarget { .. }));
    }

    #[test]
    fn buffer_apply_then_revert_restores_text() {
        let tree = java::parse(SOURCE).unwrap();
        let buffer = SourceBuffer::from_tree(&tree);
        let edit = buffer.apply(&tree, descriptor(&tree)).unwrap();
        assert_eq!(edit.original, "sb.toString()");
        assert_eq!(edit.replacement, "sb");
        assert_ne!(buffer.snapshot(), tree.snapshot());

        buffer.revert(&edit).unwrap();
        assert_eq!(buffer.text(), SOURCE);
        assert_eq!(buffer.snapshot(), tree.snapshot());
    }

    #[test]
    fn second_apply_on_old_tree_is_stale_and_leaves_text() {
        let tree = java::parse(SOURCE).unwrap();
        let buffer = SourceBuffer::from_tree(&tree);
        buffer.apply(&tree, descriptor(&tree)).unwrap();
        let after_first = buffer.text();

        let err = buffer.apply(&tree, descriptor(&tree)).unwrap_err();
        assert!(matches!(err, FixError::Stale { .. }));
        assert_eq!(buffer.text(), after_first);
    }

    #[test]
    fn buffer_tree_uses_current_snapshot() {
        let buffer = SourceBuffer::new(SOURCE);
        let tree = buffer.tree().unwrap();
        assert_eq!(tree.snapshot(), buffer.snapshot());
        assert_eq!(tree.source(), SOURCE);
    }
}
