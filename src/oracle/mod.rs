//! Name and type resolution boundary.
//!
//! Rules never resolve names themselves; they ask an [`Oracle`]. Every query
//! can come back empty, and callers treat that as "not enough information".

mod jdk;
pub mod table;

pub use table::DeclarationOracle;

use crate::tree::{NodeId, SyntaxTree};

/// A resolved method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub parameter_types: Vec<String>,
    /// Qualified name of the class that declares the method.
    pub declaring_type: String,
    pub return_type: Option<String>,
}

impl MethodSig {
    #[must_use]
    pub fn is_nullary(&self, name: &str) -> bool {
        self.name == name && self.parameter_types.is_empty()
    }
}

/// Read-only resolution service shared by concurrent traversals.
pub trait Oracle: Send + Sync {
    /// Declaration a call expression binds to.
    fn resolve_call(&self, tree: &SyntaxTree, call: NodeId) -> Option<MethodSig>;

    /// Qualified name of the class a type reference names, or the static type
    /// of an expression.
    fn resolve_type(&self, tree: &SyntaxTree, node: NodeId) -> Option<String>;

    /// Whether `sub` is `sup` or one of its subtypes.
    fn is_subtype_or_equal(&self, sub: &str, sup: &str) -> bool;
}

/// An oracle that cannot resolve anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolved;

impl Oracle for Unresolved {
    fn resolve_call(&self, _tree: &SyntaxTree, _call: NodeId) -> Option<MethodSig> {
        None
    }

    fn resolve_type(&self, _tree: &SyntaxTree, _node: NodeId) -> Option<String> {
        None
    }

    fn is_subtype_or_equal(&self, sub: &str, sup: &str) -> bool {
        sub == sup
    }
}
