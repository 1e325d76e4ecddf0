// src/fix/driver.rs
//! Applies fixes until none are left.

use super::{Edit, SourceBuffer};
use crate::analysis::Engine;
use crate::error::Result;
use crate::oracle::DeclarationOracle;

/// Upper bound on fix rounds for one source text.
pub const MAX_ROUNDS: usize = 64;

#[derive(Debug)]
pub struct FixOutcome {
    pub source: String,
    pub edits: Vec<Edit>,
    /// Diagnostics still reported after the last round.
    pub remaining: usize,
}

impl FixOutcome {
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Repeatedly parses, inspects and applies the first available fix. Every
/// round works on a fresh snapshot, so no descriptor outlives its tree.
///
/// # Errors
/// Returns error if the text cannot be parsed or a fix fails to apply.
pub fn fix_until_clean(engine: &Engine, source: &str) -> Result<FixOutcome> {
    let buffer = SourceBuffer::new(source);
    let mut edits = Vec::new();

    for _ in 0..MAX_ROUNDS {
        let tree = buffer.tree()?;
        let oracle = DeclarationOracle::build(&tree);
        let diagnostics = engine.inspect(&tree, &oracle);
        let total = diagnostics.len();
        let Some(fix) = diagnostics.into_iter().find_map(|d| d.into_fix()) else {
            return Ok(FixOutcome {
                source: buffer.text(),
                edits,
                remaining: total,
            });
        };
        edits.push(buffer.apply(&tree, fix)?);
    }

    tracing::warn!(rounds = MAX_ROUNDS, "fix rounds exhausted");
    let tree = buffer.tree()?;
    let oracle = DeclarationOracle::build(&tree);
    Ok(FixOutcome {
        source: buffer.text(),
        edits,
        remaining: engine.inspect(&tree, &oracle).len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn fixes_every_occurrence_and_leaves_unfixable_ones() {
        let src = "class A {\n  String f(StringBuffer a, StringBuffer b) {\n    new Thread().start();\n    return \"x\" + a.toString() + b.toString();\n  }\n}\n";
        let engine = Engine::new(&Config::new());
        let outcome = fix_until_clean(&engine, src).unwrap();
        assert!(outcome.source.contains("return \"x\" + a + b;"));
        assert_eq!(outcome.edits.len(), 2);
        assert!(outcome.edits.iter().all(|e| e.fix == "Remove .toString()"));
        assert_eq!(outcome.remaining, 1);
    }

    #[test]
    fn clean_source_is_unchanged() {
        let src = "class A { String f(StringBuffer a) { return a.toString() + \"x\"; } }";
        let engine = Engine::new(&Config::new());
        let outcome = fix_until_clean(&engine, src).unwrap();
        assert!(!outcome.changed());
        assert_eq!(outcome.source, src);
        assert_eq!(outcome.remaining, 0);
    }

    #[test]
    fn fixing_is_idempotent() {
        let src = "class A { String f(StringBuffer a) { return \"x\" + a.toString(); } }";
        let engine = Engine::new(&Config::new());
        let once = fix_until_clean(&engine, src).unwrap();
        let twice = fix_until_clean(&engine, &once.source).unwrap();
        assert!(!twice.changed());
        assert_eq!(twice.source, once.source);
    }
}
