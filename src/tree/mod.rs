//! Arena-backed syntax tree snapshots.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Parent
//! links are plain indices, so a tree can be shared read-only across threads
//! without reference cycles. A tree never changes after it is built; an edit
//! produces new source text that must be parsed into a new snapshot.

mod builder;

pub use builder::TreeBuilder;

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a node inside one [`SyntaxTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Identity of one immutable version of a source text and its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot(u64);

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

impl Snapshot {
    /// Allocates a process-unique snapshot id.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Half-open byte range into the tree's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    String,
    Char,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Null,
}

/// What a node is. The set is closed; anything the rules and the oracle do
/// not care about lowers to [`NodeKind::Other`] and keeps its grammar name in
/// [`Node::raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    CompilationUnit,
    Package,
    Import,
    ClassDecl,
    ClassBody,
    MethodDecl,
    Parameters,
    Parameter,
    FieldDecl,
    LocalVar,
    Declarator,
    Block,
    Call,
    Arguments,
    Binary,
    New,
    Lambda,
    Paren,
    Cast,
    FieldAccess,
    This,
    Name,
    TypeRef,
    Literal(LiteralKind),
    Token,
    Other,
}

impl NodeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompilationUnit => "compilation_unit",
            Self::Package => "package",
            Self::Import => "import",
            Self::ClassDecl => "class_decl",
            Self::ClassBody => "class_body",
            Self::MethodDecl => "method_decl",
            Self::Parameters => "parameters",
            Self::Parameter => "parameter",
            Self::FieldDecl => "field_decl",
            Self::LocalVar => "local_var",
            Self::Declarator => "declarator",
            Self::Block => "block",
            Self::Call => "call",
            Self::Arguments => "arguments",
            Self::Binary => "binary",
            Self::New => "new",
            Self::Lambda => "lambda",
            Self::Paren => "paren",
            Self::Cast => "cast",
            Self::FieldAccess => "field_access",
            Self::This => "this",
            Self::Name => "name",
            Self::TypeRef => "type_ref",
            Self::Literal(_) => "literal",
            Self::Token => "token",
            Self::Other => "other",
        }
    }
}

/// Role a child plays inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Name,
    Qualifier,
    Arguments,
    Left,
    Operator,
    Right,
    Type,
    Body,
    Parameters,
    Superclass,
    Interfaces,
    Declarator,
    Value,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub raw: &'static str,
    pub field: Option<Field>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub span: Span,
}

/// One immutable snapshot: the source text plus every node parsed from it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<Node>,
    snapshot: Snapshot,
}

impl SyntaxTree {
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checked lookup, for ids that may come from another snapshot.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Ids are only handed out by this tree, so indexing stays in bounds
    /// unless an id from a different tree is passed in.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Grammar name the node was lowered from.
    #[must_use]
    pub fn raw(&self, id: NodeId) -> &'static str {
        self.node(id).raw
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Source text covered by the node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        let span = self.span(id);
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// First child filling `field`.
    #[must_use]
    pub fn field_child(&self, id: NodeId, field: Field) -> Option<NodeId> {
        self.field_children(id, field).next()
    }

    pub fn field_children(&self, id: NodeId, field: Field) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.node(c).field == Some(field))
    }

    /// Children of a given kind, in source order.
    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.kind(c) == kind)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    /// Operator text of a binary expression.
    #[must_use]
    pub fn binary_operator(&self, id: NodeId) -> Option<&str> {
        if self.kind(id) != NodeKind::Binary {
            return None;
        }
        self.field_child(id, Field::Operator).map(|op| self.text(op))
    }

    /// 1-based line and column (in characters) of a byte offset.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let prefix = self.source.get(..offset).unwrap_or(&self.source);
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix.get(line_start..).map_or(0, |s| s.chars().count()) + 1;
        (line, column)
    }

    /// All node ids in pre-order.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        self.subtree(self.root())
    }

    /// `id` and all of its descendants, in pre-order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> SyntaxTree {
        // a + b
        let mut b = TreeBuilder::new("a + b");
        b.start(NodeKind::Binary, "binary_expression", None, 0);
        b.leaf(NodeKind::Name, "identifier", Some(Field::Left), Span::new(0, 1));
        b.leaf(NodeKind::Token, "+", Some(Field::Operator), Span::new(2, 3));
        b.leaf(NodeKind::Name, "identifier", Some(Field::Right), Span::new(4, 5));
        b.finish(5);
        b.build(Snapshot::fresh()).unwrap()
    }

    #[test]
    fn parents_and_fields() {
        let tree = sample();
        let root = tree.root();
        let right = tree.field_child(root, Field::Right).unwrap();
        assert_eq!(tree.text(right), "b");
        assert_eq!(tree.parent(right), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.binary_operator(root), Some("+"));
    }

    #[test]
    fn preorder_is_source_order() {
        let tree = sample();
        let texts: Vec<&str> = tree.preorder().into_iter().map(|id| tree.text(id)).collect();
        assert_eq!(texts, vec!["a + b", "a", "+", "b"]);
    }

    #[test]
    fn line_col_counts_from_one() {
        let mut b = TreeBuilder::new("x\n  yz");
        b.leaf(NodeKind::Other, "program", None, Span::new(0, 6));
        let tree = b.build(Snapshot::fresh()).unwrap();
        assert_eq!(tree.line_col(0), (1, 1));
        assert_eq!(tree.line_col(4), (2, 3));
    }

    #[test]
    fn snapshots_are_unique() {
        assert_ne!(Snapshot::fresh(), Snapshot::fresh());
    }
}
