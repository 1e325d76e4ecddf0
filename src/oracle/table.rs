// src/oracle/table.rs
//! Best-effort resolution from the declarations visible in one file.
//!
//! The table knows the classes the file declares, its package and single-type
//! imports, and a small model of the JDK. Anything outside of that stays
//! unresolved, which the inspections treat as "do not report".

use super::{jdk, MethodSig, Oracle};
use crate::analysis::visitor::{traverse, Flow, Visitor};
use crate::tree::{Field, LiteralKind, NodeId, NodeKind, SyntaxTree};
use std::collections::{HashMap, HashSet, VecDeque};

/// Nesting limit for expression typing; `var` initializers can refer back to
/// themselves.
const MAX_DEPTH: u8 = 32;

const OBJECT: &str = "java.lang.Object";
const STRING: &str = "java.lang.String";

#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub name: String,
    pub supertypes: Vec<String>,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<String>,
    pub returns: Option<String>,
}

/// What a scope says about a name it declares.
#[derive(Debug)]
enum Binding {
    Typed(String),
    /// Declared, but in a form whose type is unknown.
    Opaque,
}

impl Binding {
    fn from_type(ty: Option<String>) -> Self {
        ty.map_or(Self::Opaque, Self::Typed)
    }

    fn into_type(self) -> Option<String> {
        match self {
            Self::Typed(ty) => Some(ty),
            Self::Opaque => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DeclarationOracle {
    package: Option<String>,
    imports: HashMap<String, String>,
    file_classes: HashMap<String, String>,
    classes: HashMap<String, ClassInfo>,
}

#[derive(Default)]
struct Collector {
    package: Option<String>,
    imports: Vec<String>,
    classes: Vec<NodeId>,
}

impl Visitor for Collector {
    fn visit_class(&mut self, _tree: &SyntaxTree, id: NodeId) -> Flow {
        self.classes.push(id);
        Flow::Continue
    }

    fn visit_other(&mut self, tree: &SyntaxTree, id: NodeId) -> Flow {
        match tree.kind(id) {
            NodeKind::Package => {
                self.package = declared_name(tree, id);
                Flow::SkipChildren
            }
            NodeKind::Import => {
                let is_static = tree.text(id).split_whitespace().nth(1) == Some("static");
                let is_wildcard = tree.children(id).iter().any(|&c| tree.raw(c) == "asterisk");
                if !is_static && !is_wildcard {
                    if let Some(name) = declared_name(tree, id) {
                        self.imports.push(name);
                    }
                }
                Flow::SkipChildren
            }
            _ => Flow::Continue,
        }
    }
}

/// Dotted name inside a package or import declaration.
fn declared_name(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    tree.children(id)
        .iter()
        .find(|&&c| matches!(tree.raw(c), "identifier" | "scoped_identifier"))
        .map(|&c| tree.text(c).split_whitespace().collect())
}

impl DeclarationOracle {
    /// Collects the declarations of `tree`.
    #[must_use]
    pub fn build(tree: &SyntaxTree) -> Self {
        let mut collector = Collector::default();
        if !tree.is_empty() {
            traverse(tree, tree.root(), &mut collector);
        }

        let mut oracle = Self {
            package: collector.package,
            ..Self::default()
        };
        for import in collector.imports {
            if let Some(simple) = import.rsplit('.').next() {
                oracle.imports.insert(simple.to_string(), import.clone());
            }
        }
        for &class in &collector.classes {
            if let Some(name) = tree.field_child(class, Field::Name) {
                let simple = tree.text(name).to_string();
                let qualified = oracle.qualify_declared(&simple);
                oracle.file_classes.insert(simple, qualified);
            }
        }
        for class in jdk::classes() {
            oracle.classes.insert(class.name.clone(), class);
        }
        for &class in &collector.classes {
            if let Some(info) = oracle.class_info(tree, class) {
                oracle.classes.insert(info.name.clone(), info);
            }
        }
        oracle
    }

    fn qualify_declared(&self, simple: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{simple}"),
            None => simple.to_string(),
        }
    }

    fn class_info(&self, tree: &SyntaxTree, class: NodeId) -> Option<ClassInfo> {
        let name = self.class_name(tree, class)?;
        let mut supertypes = Vec::new();
        let mut has_superclass = false;
        for &child in tree.children(class) {
            let heritage = match tree.node(child).field {
                Some(Field::Superclass) => {
                    has_superclass = true;
                    true
                }
                Some(Field::Interfaces) => true,
                _ => tree.raw(child) == "extends_interfaces",
            };
            if !heritage {
                continue;
            }
            supertypes.extend(
                tree.subtree(child)
                    .into_iter()
                    .filter(|&n| tree.kind(n) == NodeKind::TypeRef)
                    .filter_map(|n| self.qualify(tree.text(n))),
            );
        }
        if !has_superclass && tree.raw(class) != "interface_declaration" && name != OBJECT {
            supertypes.push(OBJECT.to_string());
        }

        let methods = tree
            .field_child(class, Field::Body)
            .map(|body| {
                tree.children_of_kind(body, NodeKind::MethodDecl)
                    .filter(|&m| tree.raw(m) == "method_declaration")
                    .filter_map(|m| self.method_info(tree, m))
                    .collect()
            })
            .unwrap_or_default();

        Some(ClassInfo {
            name,
            supertypes,
            methods,
        })
    }

    fn method_info(&self, tree: &SyntaxTree, method: NodeId) -> Option<MethodInfo> {
        let name = tree.text(tree.field_child(method, Field::Name)?).to_string();
        let params = parameter_types(tree, method)
            .into_iter()
            .map(|raw| self.qualify(&raw).unwrap_or(raw))
            .collect();
        let returns = tree
            .field_child(method, Field::Type)
            .and_then(|t| self.qualify(tree.text(t)));
        Some(MethodInfo {
            name,
            params,
            returns,
        })
    }

    fn class_name(&self, tree: &SyntaxTree, class: NodeId) -> Option<String> {
        let name = tree.field_child(class, Field::Name)?;
        self.file_classes.get(tree.text(name)).cloned()
    }

    /// Qualified form of a type as written in source.
    #[must_use]
    pub fn qualify(&self, written: &str) -> Option<String> {
        let base = written.split('<').next().unwrap_or(written).trim();
        if let Some(element) = base.strip_suffix("[]") {
            return self.qualify(element).map(|q| format!("{q}[]"));
        }
        if base.is_empty() {
            return None;
        }
        if jdk::is_primitive(base) || base.contains('.') {
            return Some(base.to_string());
        }
        if let Some(q) = self.file_classes.get(base) {
            return Some(q.clone());
        }
        if let Some(q) = self.imports.get(base) {
            return Some(q.clone());
        }
        jdk::java_lang(base)
    }

    fn expression_type(&self, tree: &SyntaxTree, id: NodeId, depth: u8) -> Option<String> {
        if depth > MAX_DEPTH {
            return None;
        }
        match tree.kind(id) {
            NodeKind::Literal(kind) => Some(literal_type(kind).to_string()),
            NodeKind::TypeRef => self.qualify(tree.text(id)),
            NodeKind::Name => self.variable_type(tree, id, depth),
            NodeKind::New | NodeKind::Cast => tree
                .field_child(id, Field::Type)
                .and_then(|t| self.qualify(tree.text(t))),
            NodeKind::Paren => tree
                .children(id)
                .first()
                .and_then(|&inner| self.expression_type(tree, inner, depth + 1)),
            NodeKind::This => self.enclosing_class(tree, id),
            NodeKind::Call => self.resolve_call_at(tree, id, depth)?.return_type,
            NodeKind::FieldAccess => self.field_access_type(tree, id, depth),
            NodeKind::Binary => self.binary_type(tree, id, depth),
            NodeKind::CompilationUnit
            | NodeKind::Package
            | NodeKind::Import
            | NodeKind::ClassDecl
            | NodeKind::ClassBody
            | NodeKind::MethodDecl
            | NodeKind::Parameters
            | NodeKind::Parameter
            | NodeKind::FieldDecl
            | NodeKind::LocalVar
            | NodeKind::Declarator
            | NodeKind::Block
            | NodeKind::Arguments
            | NodeKind::Lambda
            | NodeKind::Token
            | NodeKind::Other => None,
        }
    }

    fn binary_type(&self, tree: &SyntaxTree, id: NodeId, depth: u8) -> Option<String> {
        match tree.binary_operator(id)? {
            "+" => {
                let side_is_string = [Field::Left, Field::Right].into_iter().any(|f| {
                    tree.field_child(id, f)
                        .and_then(|side| self.expression_type(tree, side, depth + 1))
                        .is_some_and(|t| t == STRING)
                });
                side_is_string.then(|| STRING.to_string())
            }
            "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" => Some("boolean".to_string()),
            _ => None,
        }
    }

    fn field_access_type(&self, tree: &SyntaxTree, id: NodeId, depth: u8) -> Option<String> {
        let qualifier = tree.field_child(id, Field::Qualifier)?;
        if tree.kind(qualifier) != NodeKind::This {
            return None;
        }
        let name = tree.text(tree.field_child(id, Field::Name)?);
        let body = tree
            .ancestors(id)
            .find(|&a| tree.kind(a) == NodeKind::ClassBody)?;
        tree.children_of_kind(body, NodeKind::FieldDecl)
            .find_map(|decl| self.declarator_type(tree, decl, name, depth))
            .and_then(Binding::into_type)
    }

    /// Type of the nearest declaration of a variable, searching outward
    /// through the enclosing scopes. A declaration whose type cannot be
    /// worked out still hides every outer one.
    fn variable_type(&self, tree: &SyntaxTree, name: NodeId, depth: u8) -> Option<String> {
        let ident = tree.text(name);
        let used_at = tree.span(name).start;
        let binding = tree
            .ancestors(name)
            .find_map(|scope| self.declared_in(tree, scope, ident, used_at, depth))?;
        if matches!(binding, Binding::Opaque) {
            tracing::trace!(name = ident, "declaration type not modelled");
        }
        binding.into_type()
    }

    fn declared_in(
        &self,
        tree: &SyntaxTree,
        scope: NodeId,
        ident: &str,
        used_at: usize,
        depth: u8,
    ) -> Option<Binding> {
        if let Some(binding) = self.header_binding(tree, scope, ident, depth) {
            return Some(binding);
        }
        for &child in tree.children(scope) {
            let found = match tree.kind(child) {
                NodeKind::LocalVar if tree.span(child).start < used_at => {
                    self.declarator_type(tree, child, ident, depth)
                }
                NodeKind::FieldDecl => self.declarator_type(tree, child, ident, depth),
                NodeKind::Parameters => self.parameter_binding(tree, child, ident),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
        }
        if is_member(tree, scope) && binds_pattern(tree, scope, ident) {
            return Some(Binding::Opaque);
        }
        None
    }

    /// Variables a statement or lambda introduces ahead of its body.
    fn header_binding(&self, tree: &SyntaxTree, scope: NodeId, ident: &str, depth: u8) -> Option<Binding> {
        if tree.kind(scope) == NodeKind::Lambda {
            let params = tree.field_child(scope, Field::Parameters)?;
            let inferred = match tree.kind(params) {
                NodeKind::Name => tree.text(params) == ident,
                NodeKind::Parameters => false,
                _ => tree
                    .children_of_kind(params, NodeKind::Name)
                    .any(|n| tree.text(n) == ident),
            };
            return inferred.then_some(Binding::Opaque);
        }
        match tree.raw(scope) {
            "enhanced_for_statement" if names(tree, scope, ident) => Some(Binding::from_type(
                tree.field_child(scope, Field::Type)
                    .and_then(|t| self.qualify(tree.text(t))),
            )),
            "catch_clause" => {
                let param = tree
                    .children(scope)
                    .iter()
                    .copied()
                    .find(|&c| tree.raw(c) == "catch_formal_parameter" && names(tree, c, ident))?;
                Some(Binding::from_type(self.catch_type(tree, param)))
            }
            "try_with_resources_statement" => tree
                .children(scope)
                .iter()
                .filter(|&&c| tree.raw(c) == "resource_specification")
                .flat_map(|&spec| tree.children(spec).iter().copied())
                .find(|&r| tree.raw(r) == "resource" && names(tree, r, ident))
                .map(|r| {
                    Binding::from_type(self.declared_type(
                        tree,
                        tree.field_child(r, Field::Type),
                        tree.field_child(r, Field::Value),
                        depth,
                    ))
                }),
            _ => None,
        }
    }

    /// `catch (IOException e)` types `e`; a multi-catch does not.
    fn catch_type(&self, tree: &SyntaxTree, param: NodeId) -> Option<String> {
        let catch_type = tree
            .children(param)
            .iter()
            .copied()
            .find(|&c| tree.raw(c) == "catch_type")?;
        let mut types = tree.children_of_kind(catch_type, NodeKind::TypeRef);
        let only = types.next()?;
        if types.next().is_some() {
            return None;
        }
        self.qualify(tree.text(only))
    }

    fn parameter_binding(&self, tree: &SyntaxTree, params: NodeId, ident: &str) -> Option<Binding> {
        tree.children_of_kind(params, NodeKind::Parameter).find_map(|p| {
            if let Some(name) = tree.field_child(p, Field::Name) {
                return (tree.text(name) == ident).then(|| {
                    Binding::from_type(
                        tree.field_child(p, Field::Type)
                            .and_then(|t| self.qualify(tree.text(t))),
                    )
                });
            }
            // `T... xs` keeps its name in a declarator.
            tree.children_of_kind(p, NodeKind::Declarator)
                .any(|d| names(tree, d, ident))
                .then_some(Binding::Opaque)
        })
    }

    fn declarator_type(&self, tree: &SyntaxTree, decl: NodeId, ident: &str, depth: u8) -> Option<Binding> {
        let declarator = tree
            .field_children(decl, Field::Declarator)
            .find(|&d| names(tree, d, ident))?;
        let ty = self.declared_type(
            tree,
            tree.field_child(decl, Field::Type),
            tree.field_child(declarator, Field::Value),
            depth,
        );
        Some(Binding::from_type(ty))
    }

    /// Written type of a declaration; `var` takes the initializer's type.
    fn declared_type(
        &self,
        tree: &SyntaxTree,
        ty: Option<NodeId>,
        value: Option<NodeId>,
        depth: u8,
    ) -> Option<String> {
        match tree.text(ty?) {
            "var" => self.expression_type(tree, value?, depth + 1),
            written => self.qualify(written),
        }
    }

    /// Class that `this` refers to at `id`. Inside an anonymous class body
    /// that is the instantiated base type.
    fn enclosing_class(&self, tree: &SyntaxTree, id: NodeId) -> Option<String> {
        for ancestor in tree.ancestors(id) {
            match tree.kind(ancestor) {
                NodeKind::New if tree.field_child(ancestor, Field::Body).is_some() => {
                    return tree
                        .field_child(ancestor, Field::Type)
                        .and_then(|t| self.qualify(tree.text(t)));
                }
                NodeKind::ClassDecl => return self.class_name(tree, ancestor),
                _ => {}
            }
        }
        None
    }

    fn resolve_call_at(&self, tree: &SyntaxTree, call: NodeId, depth: u8) -> Option<MethodSig> {
        let name = tree.text(tree.field_child(call, Field::Name)?);
        let arity = tree.children(tree.field_child(call, Field::Arguments)?).len();
        let receiver = match tree.field_child(call, Field::Qualifier) {
            Some(q) => self
                .expression_type(tree, q, depth + 1)
                .or_else(|| self.static_receiver(tree, q))?,
            None => self.enclosing_class(tree, call)?,
        };
        self.find_method(&receiver, name, arity)
    }

    /// `String.valueOf(x)`: a bare name that is not a variable may be a type.
    fn static_receiver(&self, tree: &SyntaxTree, qualifier: NodeId) -> Option<String> {
        if tree.kind(qualifier) != NodeKind::Name {
            return None;
        }
        self.qualify(tree.text(qualifier))
            .filter(|q| self.classes.contains_key(q))
    }

    /// Breadth-first search for a method by name and arity, nearest
    /// declaration first.
    fn find_method(&self, receiver: &str, name: &str, arity: usize) -> Option<MethodSig> {
        let mut queue = VecDeque::from([receiver.to_string()]);
        let mut seen = HashSet::new();
        let mut reached_object = false;
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            reached_object |= current == OBJECT;
            let Some(class) = self.classes.get(&current) else {
                continue;
            };
            if let Some(m) = class
                .methods
                .iter()
                .find(|m| m.name == name && m.params.len() == arity)
            {
                return Some(MethodSig {
                    name: m.name.clone(),
                    parameter_types: m.params.clone(),
                    declaring_type: class.name.clone(),
                    return_type: m.returns.clone(),
                });
            }
            queue.extend(class.supertypes.iter().cloned());
        }
        // Interfaces still inherit Object's members.
        if !reached_object && self.classes.contains_key(receiver) {
            return self.find_method(OBJECT, name, arity);
        }
        None
    }
}

impl DeclarationOracle {
    /// Whether every supertype of `ty` is in the table, so that a negative
    /// subtype answer about it is final.
    fn knows_hierarchy(&self, ty: &str) -> bool {
        if ty == "null" || ty.ends_with("[]") || jdk::is_primitive(ty) {
            return true;
        }
        let mut queue = VecDeque::from([ty.to_string()]);
        let mut seen = HashSet::new();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(class) = self.classes.get(&current) else {
                return false;
            };
            queue.extend(class.supertypes.iter().cloned());
        }
        true
    }
}

impl Oracle for DeclarationOracle {
    fn resolve_call(&self, tree: &SyntaxTree, call: NodeId) -> Option<MethodSig> {
        if tree.kind(call) != NodeKind::Call {
            return None;
        }
        self.resolve_call_at(tree, call, 0)
    }

    fn resolve_type(&self, tree: &SyntaxTree, node: NodeId) -> Option<String> {
        self.expression_type(tree, node, 0)
            .filter(|ty| self.knows_hierarchy(ty))
    }

    fn is_subtype_or_equal(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }
        if sup == OBJECT {
            return !jdk::is_primitive(sub) && sub != "null";
        }
        let mut queue = VecDeque::from([sub.to_string()]);
        let mut seen = HashSet::new();
        while let Some(current) = queue.pop_front() {
            if current == sup {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(class) = self.classes.get(&current) {
                queue.extend(class.supertypes.iter().cloned());
            }
        }
        false
    }
}

/// Whether `id` has a `name` child spelled `ident`.
fn names(tree: &SyntaxTree, id: NodeId, ident: &str) -> bool {
    tree.field_child(id, Field::Name)
        .is_some_and(|n| tree.text(n) == ident)
}

/// A method, field or initializer directly inside a class body.
fn is_member(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.kind(id) != NodeKind::ClassDecl
        && tree
            .parent(id)
            .is_some_and(|p| tree.kind(p) == NodeKind::ClassBody)
}

/// Whether a pattern anywhere under `id` binds `ident`, as in
/// `o instanceof Runnable r`. Pattern scope follows flow, so the whole
/// member counts.
fn binds_pattern(tree: &SyntaxTree, id: NodeId, ident: &str) -> bool {
    tree.subtree(id).into_iter().any(|n| match tree.raw(n) {
        "instanceof_expression" => names(tree, n, ident),
        "type_pattern" => tree
            .children_of_kind(n, NodeKind::Name)
            .any(|name| tree.text(name) == ident),
        _ => false,
    })
}

fn literal_type(kind: LiteralKind) -> &'static str {
    match kind {
        LiteralKind::String => STRING,
        LiteralKind::Char => "char",
        LiteralKind::Int => "int",
        LiteralKind::Long => "long",
        LiteralKind::Float => "float",
        LiteralKind::Double => "double",
        LiteralKind::Boolean => "boolean",
        LiteralKind::Null => "null",
    }
}

fn parameter_types(tree: &SyntaxTree, method: NodeId) -> Vec<String> {
    let Some(params) = tree.field_child(method, Field::Parameters) else {
        return Vec::new();
    };
    tree.children_of_kind(params, NodeKind::Parameter)
        .filter_map(|p| tree.field_child(p, Field::Type))
        .map(|t| tree.text(t).to_string())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::java;

    fn first(tree: &SyntaxTree, kind: NodeKind, text: &str) -> NodeId {
        tree.preorder()
            .into_iter()
            .find(|&id| tree.kind(id) == kind && tree.text(id) == text)
            .unwrap()
    }

    #[test]
    fn resolves_local_and_parameter_types() {
        let src = "class A { void f(Runnable task) { StringBuffer sb = new StringBuffer(); g(sb, task); } }";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        let args = tree
            .preorder()
            .into_iter()
            .find(|&id| tree.kind(id) == NodeKind::Arguments && tree.text(id) == "(sb, task)")
            .unwrap();
        let types: Vec<Option<String>> = tree
            .children(args)
            .iter()
            .map(|&a| oracle.resolve_type(&tree, a))
            .collect();
        assert_eq!(
            types,
            vec![
                Some("java.lang.StringBuffer".to_string()),
                Some("java.lang.Runnable".to_string())
            ]
        );
    }

    #[test]
    fn resolves_to_string_on_declaring_class() {
        let src = "class A { String f(StringBuffer sb, Object o) { return sb.toString() + o.toString(); } }";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);

        let on_buffer = first(&tree, NodeKind::Call, "sb.toString()");
        let sig = oracle.resolve_call(&tree, on_buffer).unwrap();
        assert_eq!(sig.declaring_type, "java.lang.StringBuffer");
        assert!(sig.is_nullary("toString"));

        let on_object = first(&tree, NodeKind::Call, "o.toString()");
        let sig = oracle.resolve_call(&tree, on_object).unwrap();
        assert_eq!(sig.declaring_type, "java.lang.Object");
    }

    #[test]
    fn file_classes_join_the_hierarchy() {
        let src = "package app; class Job implements Runnable { public void run() {} }";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        assert!(oracle.is_subtype_or_equal("app.Job", "java.lang.Runnable"));
        assert!(oracle.is_subtype_or_equal("app.Job", "java.lang.Object"));
        assert!(!oracle.is_subtype_or_equal("java.lang.String", "java.lang.Runnable"));
        assert!(oracle.is_subtype_or_equal("java.lang.Thread", "java.lang.Runnable"));
        assert!(oracle.is_subtype_or_equal("java.util.concurrent.FutureTask", "java.lang.Runnable"));
    }

    #[test]
    fn imports_and_shadowing_classes_qualify() {
        let src = "package p; import java.util.TimerTask; class Thread {}";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        assert_eq!(oracle.qualify("TimerTask"), Some("java.util.TimerTask".to_string()));
        assert_eq!(oracle.qualify("Thread"), Some("p.Thread".to_string()));
        assert_eq!(oracle.qualify("List<String>"), None);
        assert_eq!(oracle.qualify("int[]"), Some("int[]".to_string()));
    }

    #[test]
    fn var_uses_initializer_type() {
        let src = "class A { void f() { var b = new StringBuilder(); String s = \"\" + b.toString(); } }";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        let call = first(&tree, NodeKind::Call, "b.toString()");
        let sig = oracle.resolve_call(&tree, call).unwrap();
        assert_eq!(sig.declaring_type, "java.lang.StringBuilder");
    }

    fn name_type(src: &str, ident: &str) -> Option<String> {
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        let arg = tree
            .preorder()
            .into_iter()
            .find(|&id| {
                tree.kind(id) == NodeKind::Name
                    && tree.text(id) == ident
                    && tree.parent(id).is_some_and(|p| tree.kind(p) == NodeKind::Arguments)
            })
            .unwrap();
        oracle.resolve_type(&tree, arg)
    }

    #[test]
    fn binding_forms_hide_fields() {
        let lambda = "class A { StringBuffer r; void f(java.util.List<Object> l) { l.forEach(r -> g(r)); } }";
        assert_eq!(name_type(lambda, "r"), None);
        let inferred = "class A { StringBuffer r; void f() { h((r, s) -> g(r)); } }";
        assert_eq!(name_type(inferred, "r"), None);
        let typed = "class A { String r; void f() { h((StringBuffer r) -> g(r)); } }";
        assert_eq!(name_type(typed, "r").as_deref(), Some("java.lang.StringBuffer"));
        let catch = "class A { StringBuffer e; void f() { try { } catch (RuntimeException e) { g(e); } } }";
        assert_eq!(name_type(catch, "e"), None);
        let pattern = "class A { StringBuffer r; void f(Object o) { if (o instanceof Runnable r) { g(r); } } }";
        assert_eq!(name_type(pattern, "r"), None);
    }

    #[test]
    fn resources_are_typed() {
        let src = "class A { Runnable r; void f() { try (StringBuffer r = open()) { g(r); } } }";
        assert_eq!(name_type(src, "r").as_deref(), Some("java.lang.StringBuffer"));
    }

    #[test]
    fn later_locals_do_not_hide_fields() {
        let before = "class A { Runnable r; void f() { g(r); String r = \"x\"; } }";
        assert_eq!(name_type(before, "r").as_deref(), Some("java.lang.Runnable"));
        let after = "class A { Runnable r; void f() { String r = \"x\"; g(r); } }";
        assert_eq!(name_type(after, "r").as_deref(), Some("java.lang.String"));
    }

    #[test]
    fn unknown_local_type_still_hides_field() {
        let src = "class A { Runnable r; void f() { Widget r = make(); g(r); } }";
        assert_eq!(name_type(src, "r"), None);
    }

    #[test]
    fn types_with_unseen_supertypes_are_unresolved() {
        let src = "import com.acme.Task; class Job extends com.acme.Base {}\n\
                   class A { void f(Task t, Job j, StringBuffer[] a) { g(t, j, a); } }";
        assert_eq!(name_type(src, "t"), None);
        assert_eq!(name_type(src, "j"), None);
        assert_eq!(name_type(src, "a").as_deref(), Some("java.lang.StringBuffer[]"));
    }

    #[test]
    fn unknown_receiver_is_unresolved() {
        let src = "class A { void f() { String s = \"\" + mystery.toString(); } }";
        let tree = java::parse(src).unwrap();
        let oracle = DeclarationOracle::build(&tree);
        let call = first(&tree, NodeKind::Call, "mystery.toString()");
        assert_eq!(oracle.resolve_call(&tree, call), None);
    }
}
