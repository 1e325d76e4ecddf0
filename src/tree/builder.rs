use super::{Field, Node, NodeId, NodeKind, Snapshot, Span, SyntaxTree};

/// Incremental construction of a [`SyntaxTree`] in pre-order.
///
/// `start`/`finish` bracket an interior node; `leaf` adds a childless one.
/// The first node added becomes the root.
pub struct TreeBuilder {
    source: String,
    nodes: Vec<Node>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            open: Vec::new(),
        }
    }

    pub fn start(
        &mut self,
        kind: NodeKind,
        raw: &'static str,
        field: Option<Field>,
        start: usize,
    ) -> NodeId {
        let id = self.push(kind, raw, field, Span::new(start, start));
        self.open.push(id);
        id
    }

    /// Closes the most recently started node.
    pub fn finish(&mut self, end: usize) {
        if let Some(id) = self.open.pop() {
            if let Some(node) = self.nodes.get_mut(id.index()) {
                node.span.end = end;
            }
        }
    }

    pub fn leaf(&mut self, kind: NodeKind, raw: &'static str, field: Option<Field>, span: Span) -> NodeId {
        self.push(kind, raw, field, span)
    }

    /// Returns `None` for an empty builder, one with unclosed nodes, or one
    /// with more than a single root.
    #[must_use]
    pub fn build(self, snapshot: Snapshot) -> Option<SyntaxTree> {
        if self.nodes.is_empty() || !self.open.is_empty() {
            return None;
        }
        if self.nodes.iter().skip(1).any(|n| n.parent.is_none()) {
            return None;
        }
        Some(SyntaxTree {
            source: self.source,
            nodes: self.nodes,
            snapshot,
        })
    }

    fn push(&mut self, kind: NodeKind, raw: &'static str, field: Option<Field>, span: Span) -> NodeId {
        #[allow(clippy::cast_possible_truncation)]
        let id = NodeId::from_raw(self.nodes.len() as u32);
        let parent = self.open.last().copied();
        if let Some(p) = parent {
            if let Some(node) = self.nodes.get_mut(p.index()) {
                node.children.push(id);
            }
        }
        self.nodes.push(Node {
            kind,
            raw,
            field,
            parent,
            children: Vec::new(),
            span,
        });
        id
    }
}
