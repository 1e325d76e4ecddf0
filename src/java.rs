// src/java.rs
//! Tree supplier: lowers a tree-sitter-java CST into a [`SyntaxTree`].
//!
//! Extras (comments) are dropped. Anonymous tokens survive only when they fill
//! a field, which keeps binary operators and nothing else. Type references,
//! identifiers and literals become leaves.

use crate::error::{GadgetError, Result};
use crate::tree::{Field, LiteralKind, NodeKind, Snapshot, Span, SyntaxTree, TreeBuilder};
use std::path::PathBuf;
use tree_sitter::{Node, Parser};

/// Parses `source` into a tree stamped with a fresh snapshot.
///
/// # Errors
/// Returns error if the grammar cannot be loaded or parsing aborts.
pub fn parse(source: &str) -> Result<SyntaxTree> {
    parse_snapshot(source, Snapshot::fresh())
}

/// Parses `source` into a tree stamped with `snapshot`.
///
/// # Errors
/// Returns error if the grammar cannot be loaded or parsing aborts.
pub fn parse_snapshot(source: &str, snapshot: Snapshot) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser.set_language(tree_sitter_java::language())?;

    let Some(cst) = parser.parse(source, None) else {
        return Err(GadgetError::Parse {
            path: PathBuf::from("<source>"),
        });
    };

    let mut builder = TreeBuilder::new(source);
    lower(cst.root_node(), None, source.as_bytes(), &mut builder);
    builder.build(snapshot).ok_or_else(|| GadgetError::Parse {
        path: PathBuf::from("<source>"),
    })
}

fn lower(node: Node, field: Option<Field>, source: &[u8], b: &mut TreeBuilder) {
    let kind = classify(node, source);
    let raw = node.kind();
    let span = Span::new(node.start_byte(), node.end_byte());

    if is_leaf(kind) || node.child_count() == 0 {
        b.leaf(kind, raw, field, span);
        return;
    }

    b.start(kind, raw, field, span.start);
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let child_field = cursor.field_name().and_then(field_from_name);
            if keep(child, child_field) {
                let role = child_field.or_else(|| implicit_field(kind, child));
                lower(child, role, source, b);
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    b.finish(span.end);
}

fn keep(node: Node, field: Option<Field>) -> bool {
    if node.is_extra() {
        return false;
    }
    node.is_named() || field == Some(Field::Operator)
}

fn is_leaf(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Name | NodeKind::TypeRef | NodeKind::Literal(_) | NodeKind::Token | NodeKind::This
    )
}

/// The anonymous class body of `new T() { ... }` carries no grammar field.
fn implicit_field(parent: NodeKind, child: Node) -> Option<Field> {
    if parent == NodeKind::New && child.kind() == "class_body" {
        return Some(Field::Body);
    }
    None
}

fn field_from_name(name: &str) -> Option<Field> {
    let field = match name {
        "name" | "field" => Field::Name,
        "object" | "scope" => Field::Qualifier,
        "arguments" => Field::Arguments,
        "left" => Field::Left,
        "operator" => Field::Operator,
        "right" => Field::Right,
        "type" => Field::Type,
        "body" => Field::Body,
        "parameters" => Field::Parameters,
        "superclass" => Field::Superclass,
        "interfaces" => Field::Interfaces,
        "declarator" => Field::Declarator,
        "value" => Field::Value,
        _ => return None,
    };
    Some(field)
}

fn classify(node: Node, source: &[u8]) -> NodeKind {
    if !node.is_named() {
        return NodeKind::Token;
    }
    match node.kind() {
        "program" => NodeKind::CompilationUnit,
        "package_declaration" => NodeKind::Package,
        "import_declaration" => NodeKind::Import,
        "class_declaration" | "interface_declaration" | "enum_declaration"
        | "record_declaration" => NodeKind::ClassDecl,
        "class_body" | "interface_body" | "enum_body" => NodeKind::ClassBody,
        "method_declaration" | "constructor_declaration" => NodeKind::MethodDecl,
        "formal_parameters" => NodeKind::Parameters,
        "formal_parameter" | "spread_parameter" => NodeKind::Parameter,
        "field_declaration" => NodeKind::FieldDecl,
        "local_variable_declaration" => NodeKind::LocalVar,
        "variable_declarator" => NodeKind::Declarator,
        "block" | "constructor_body" => NodeKind::Block,
        "method_invocation" => NodeKind::Call,
        "argument_list" => NodeKind::Arguments,
        "binary_expression" => NodeKind::Binary,
        "object_creation_expression" => NodeKind::New,
        "lambda_expression" => NodeKind::Lambda,
        "parenthesized_expression" => NodeKind::Paren,
        "cast_expression" => NodeKind::Cast,
        "field_access" => NodeKind::FieldAccess,
        "this" => NodeKind::This,
        "identifier" => NodeKind::Name,
        "type_identifier" | "scoped_type_identifier" | "generic_type" | "array_type"
        | "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
            NodeKind::TypeRef
        }
        "string_literal" | "text_block" => NodeKind::Literal(LiteralKind::String),
        "character_literal" => NodeKind::Literal(LiteralKind::Char),
        "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
        | "binary_integer_literal" => NodeKind::Literal(integer_kind(node.utf8_text(source).unwrap_or(""))),
        "decimal_floating_point_literal" | "hex_floating_point_literal" => {
            NodeKind::Literal(float_kind(node.utf8_text(source).unwrap_or("")))
        }
        "true" | "false" => NodeKind::Literal(LiteralKind::Boolean),
        "null_literal" => NodeKind::Literal(LiteralKind::Null),
        _ => NodeKind::Other,
    }
}

fn integer_kind(text: &str) -> LiteralKind {
    if text.ends_with(['l', 'L']) {
        LiteralKind::Long
    } else {
        LiteralKind::Int
    }
}

fn float_kind(text: &str) -> LiteralKind {
    if text.ends_with(['f', 'F']) {
        LiteralKind::Float
    } else {
        LiteralKind::Double
    }
}
