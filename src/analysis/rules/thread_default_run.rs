// src/analysis/rules/thread_default_run.rs
//! `new Thread()` with nothing to run: no runnable argument and no `run()`
//! override.

use super::{Match, Rule, RuleContext};
use crate::config::ThreadDefaultRunConfig;
use crate::tree::{Field, NodeId, NodeKind, SyntaxTree};
use crate::types::{Category, Severity};

pub const ID: &str = "InstantiatingAThreadWithDefaultRunMethod";

pub struct ThreadDefaultRun {
    thread_type: String,
    runnable_type: String,
    severity: Severity,
}

impl ThreadDefaultRun {
    #[must_use]
    pub fn new(config: &ThreadDefaultRunConfig) -> Self {
        Self {
            thread_type: config.thread_type.clone(),
            runnable_type: config.runnable_type.clone(),
            severity: config.severity,
        }
    }

    /// True if some argument is runnable, or if any argument's type is
    /// unknown.
    fn may_receive_runnable(&self, ctx: &RuleContext<'_>, args: NodeId) -> bool {
        ctx.tree.children(args).iter().any(|&arg| {
            match ctx.oracle.resolve_type(ctx.tree, arg) {
                Some(ty) => ctx.oracle.is_subtype_or_equal(&ty, &self.runnable_type),
                None => {
                    tracing::trace!(rule = ID, arg = ctx.tree.text(arg), "argument type unresolved");
                    true
                }
            }
        })
    }
}

/// Whether a class body declares `run()` with no parameters.
fn declares_run(tree: &SyntaxTree, body: NodeId) -> bool {
    tree.children_of_kind(body, NodeKind::MethodDecl).any(|m| {
        let named_run = tree
            .field_child(m, Field::Name)
            .is_some_and(|n| tree.text(n) == "run");
        let nullary = tree
            .field_child(m, Field::Parameters)
            .map_or(true, |p| tree.children_of_kind(p, NodeKind::Parameter).next().is_none());
        named_run && nullary
    })
}

impl Rule for ThreadDefaultRun {
    fn id(&self) -> &'static str {
        ID
    }

    fn display_name(&self) -> &'static str {
        "Instantiating a Thread with default 'run()' method"
    }

    fn category(&self) -> Category {
        Category::Threading
    }

    fn template(&self) -> &'static str {
        "Instantiating a #ref with default 'run()' method #loc"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::New]
    }

    fn check(&self, ctx: &RuleContext<'_>, node: NodeId) -> Option<Match> {
        let tree = ctx.tree;
        let type_ref = tree.field_child(node, Field::Type)?;
        let Some(created) = ctx.oracle.resolve_type(tree, type_ref) else {
            tracing::trace!(rule = ID, ty = tree.text(type_ref), "type did not resolve");
            return None;
        };
        if created != self.thread_type {
            return None;
        }

        let args = tree.field_child(node, Field::Arguments)?;
        if self.may_receive_runnable(ctx, args) {
            return None;
        }
        if let Some(body) = tree.field_child(node, Field::Body) {
            if declares_run(tree, body) {
                return None;
            }
        }

        Some(Match {
            anchor: type_ref,
            target: node,
        })
    }
}

#[cfg(test)]
#[path = "thread_default_run_test.rs"]
mod tests;
