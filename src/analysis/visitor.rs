// src/analysis/visitor.rs
//! Pre-order traversal with kind-specific callbacks.

use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// What the traversal does after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    SkipChildren,
}

/// Callbacks for [`traverse`]. Every hook defaults to [`Flow::Continue`].
pub trait Visitor {
    fn visit(&mut self, tree: &SyntaxTree, id: NodeId) -> Flow {
        match tree.kind(id) {
            NodeKind::ClassDecl => self.visit_class(tree, id),
            NodeKind::MethodDecl => self.visit_method(tree, id),
            NodeKind::Call => self.visit_call(tree, id),
            NodeKind::Binary => self.visit_binary(tree, id),
            NodeKind::New => self.visit_new(tree, id),
            NodeKind::Lambda => self.visit_lambda(tree, id),
            NodeKind::CompilationUnit
            | NodeKind::Package
            | NodeKind::Import
            | NodeKind::ClassBody
            | NodeKind::Parameters
            | NodeKind::Parameter
            | NodeKind::FieldDecl
            | NodeKind::LocalVar
            | NodeKind::Declarator
            | NodeKind::Block
            | NodeKind::Arguments
            | NodeKind::Paren
            | NodeKind::Cast
            | NodeKind::FieldAccess
            | NodeKind::This
            | NodeKind::Name
            | NodeKind::TypeRef
            | NodeKind::Literal(_)
            | NodeKind::Token
            | NodeKind::Other => self.visit_other(tree, id),
        }
    }

    fn visit_class(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_method(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_call(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_binary(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_new(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_lambda(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }

    fn visit_other(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
        Flow::Continue
    }
}

/// Walks the subtree at `root` depth-first, parents before children and
/// siblings in source order. Uses an explicit stack, so deeply nested
/// expressions cannot overflow the call stack.
pub fn traverse<V: Visitor + ?Sized>(tree: &SyntaxTree, root: NodeId, visitor: &mut V) {
    if tree.get(root).is_none() {
        return;
    }
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if visitor.visit(tree, id) == Flow::Continue {
            stack.extend(tree.children(id).iter().rev());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::java;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<NodeId>,
        calls: Vec<String>,
        skip_lambdas: bool,
    }

    impl Visitor for Recorder {
        fn visit(&mut self, tree: &SyntaxTree, id: NodeId) -> Flow {
            self.seen.push(id);
            match tree.kind(id) {
                NodeKind::Call => self.visit_call(tree, id),
                NodeKind::Lambda => self.visit_lambda(tree, id),
                _ => Flow::Continue,
            }
        }

        fn visit_call(&mut self, tree: &SyntaxTree, id: NodeId) -> Flow {
            self.calls.push(tree.text(id).to_string());
            Flow::Continue
        }

        fn visit_lambda(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
            if self.skip_lambdas {
                Flow::SkipChildren
            } else {
                Flow::Continue
            }
        }
    }

    const SOURCE: &str = "class A { void f() { a(); Runnable r = () -> b(); c(); } }";

    #[test]
    fn visits_every_node_once_in_preorder() {
        let tree = java::parse(SOURCE).unwrap();
        let mut rec = Recorder::default();
        traverse(&tree, tree.root(), &mut rec);
        assert_eq!(rec.seen, tree.preorder());
        assert_eq!(rec.calls, vec!["a()", "b()", "c()"]);
    }

    #[test]
    fn skip_children_prunes_only_that_subtree() {
        let tree = java::parse(SOURCE).unwrap();
        let mut rec = Recorder {
            skip_lambdas: true,
            ..Recorder::default()
        };
        traverse(&tree, tree.root(), &mut rec);
        assert_eq!(rec.calls, vec!["a()", "c()"]);
    }

    #[test]
    fn default_dispatch_reaches_kind_hooks() {
        struct News(usize);
        impl Visitor for News {
            fn visit_new(&mut self, _tree: &SyntaxTree, _id: NodeId) -> Flow {
                self.0 += 1;
                Flow::Continue
            }
        }
        let tree = java::parse("class A { Object o = new Object(); Thread t = new Thread(); }").unwrap();
        let mut news = News(0);
        traverse(&tree, tree.root(), &mut news);
        assert_eq!(news.0, 2);
    }
}
