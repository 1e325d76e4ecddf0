// src/analysis/rules/mod.rs
//! Inspection rules and their registry.

pub mod buffer_to_string;
pub mod thread_default_run;

pub use buffer_to_string::BufferToString;
pub use thread_default_run::ThreadDefaultRun;

use crate::config::RuleConfig;
use crate::fix::FixDescriptor;
use crate::oracle::Oracle;
use crate::tree::{NodeId, NodeKind, SyntaxTree};
use crate::types::{Category, Severity};

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub tree: &'a SyntaxTree,
    pub oracle: &'a dyn Oracle,
}

/// A rule hit: `anchor` is where the diagnostic points, `target` is the node
/// the rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub anchor: NodeId,
    pub target: NodeId,
}

/// An inspection. Rules keep no state between calls; the node, the tree and
/// the oracle are their only inputs.
pub trait Rule: Send + Sync {
    /// Stable identifier, used for suppression and configuration output.
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Message with `#ref` and `#loc` placeholders.
    fn template(&self) -> &'static str;

    fn severity(&self) -> Severity;

    /// Node kinds the engine should offer to [`Rule::check`].
    fn kinds(&self) -> &'static [NodeKind];

    fn check(&self, ctx: &RuleContext<'_>, node: NodeId) -> Option<Match>;

    /// Name of the quick-fix, if the rule offers one.
    fn fix_name(&self) -> Option<&'static str> {
        None
    }

    fn fix(&self, _tree: &SyntaxTree, _m: &Match) -> Option<FixDescriptor> {
        None
    }
}

/// Every known rule with its enabled state.
#[must_use]
pub fn catalog(config: &RuleConfig) -> Vec<(Box<dyn Rule>, bool)> {
    vec![
        (
            Box::new(BufferToString::new(&config.buffer_to_string)),
            config.buffer_to_string.enabled,
        ),
        (
            Box::new(ThreadDefaultRun::new(&config.thread_default_run)),
            config.thread_default_run.enabled,
        ),
    ]
}

/// The rules a pass should run.
#[must_use]
pub fn enabled(config: &RuleConfig) -> Vec<Box<dyn Rule>> {
    catalog(config)
        .into_iter()
        .filter_map(|(rule, on)| on.then_some(rule))
        .collect()
}
