// src/analysis/rules/buffer_to_string.rs
//! `"a" + buffer.toString()`: concatenation already calls `toString()` on its
//! right operand.

use super::{Match, Rule, RuleContext};
use crate::config::BufferToStringConfig;
use crate::fix::FixDescriptor;
use crate::tree::{Field, NodeId, NodeKind, SyntaxTree};
use crate::types::{Category, Severity};

pub const ID: &str = "StringBufferToStringInConcatenation";
pub const FIX_NAME: &str = "Remove .toString()";

pub struct BufferToString {
    buffer_types: Vec<String>,
    severity: Severity,
}

impl BufferToString {
    #[must_use]
    pub fn new(config: &BufferToStringConfig) -> Self {
        Self {
            buffer_types: config.buffer_types.clone(),
            severity: config.severity,
        }
    }

    /// Whether `call` is the right operand of a `+` expression.
    fn is_concat_right_operand(tree: &SyntaxTree, call: NodeId) -> bool {
        let Some(parent) = tree.parent(call) else {
            return false;
        };
        tree.binary_operator(parent) == Some("+")
            && tree.field_child(parent, Field::Right) == Some(call)
    }
}

impl Rule for BufferToString {
    fn id(&self) -> &'static str {
        ID
    }

    fn display_name(&self) -> &'static str {
        "StringBuffer.toString() in concatenation"
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn template(&self) -> &'static str {
        "Calls to StringBuffer.#ref() in concatenation #loc"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Call]
    }

    fn check(&self, ctx: &RuleContext<'_>, node: NodeId) -> Option<Match> {
        let tree = ctx.tree;
        if !Self::is_concat_right_operand(tree, node) {
            return None;
        }
        let name = tree.field_child(node, Field::Name)?;
        tree.field_child(node, Field::Qualifier)?;

        let Some(sig) = ctx.oracle.resolve_call(tree, node) else {
            tracing::trace!(rule = ID, call = tree.text(node), "call did not resolve");
            return None;
        };
        if !sig.is_nullary("toString") {
            return None;
        }
        if !self.buffer_types.iter().any(|t| *t == sig.declaring_type) {
            return None;
        }
        Some(Match {
            anchor: name,
            target: node,
        })
    }

    fn fix_name(&self) -> Option<&'static str> {
        Some(FIX_NAME)
    }

    fn fix(&self, tree: &SyntaxTree, m: &Match) -> Option<FixDescriptor> {
        Some(FixDescriptor::new(FIX_NAME, ID, tree, m.target, qualifier_text))
    }
}

/// Replacement for `q.toString()`: the qualifier's current text.
fn qualifier_text(tree: &SyntaxTree, call: NodeId) -> Option<String> {
    let qualifier = tree.field_child(call, Field::Qualifier)?;
    Some(tree.text(qualifier).to_string())
}

#[cfg(test)]
#[path = "buffer_to_string_test.rs"]
mod tests;
