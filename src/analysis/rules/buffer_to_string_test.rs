// src/analysis/rules/buffer_to_string_test.rs

use super::*;
use crate::config::BufferToStringConfig;
use crate::fix::apply_to_source;
use crate::java;
use crate::oracle::{DeclarationOracle, MethodSig, Oracle, Unresolved};

/// Resolves every call to the same signature.
struct Always(MethodSig);

impl Oracle for Always {
    fn resolve_call(&self, _tree: &SyntaxTree, _call: NodeId) -> Option<MethodSig> {
        Some(self.0.clone())
    }

    fn resolve_type(&self, _tree: &SyntaxTree, _node: NodeId) -> Option<String> {
        None
    }

    fn is_subtype_or_equal(&self, sub: &str, sup: &str) -> bool {
        sub == sup
    }
}

fn to_string_on(declaring: &str) -> MethodSig {
    MethodSig {
        name: "toString".into(),
        parameter_types: Vec::new(),
        declaring_type: declaring.into(),
        return_type: Some("java.lang.String".into()),
    }
}

fn rule() -> BufferToString {
    BufferToString::new(&BufferToStringConfig::default())
}

fn wrap(body: &str) -> String {
    format!("class A {{ String f(StringBuffer sb, StringBuilder b, Object x) {{ {body} }} }}")
}

fn hits(tree: &SyntaxTree, oracle: &dyn Oracle, rule: &BufferToString) -> Vec<Match> {
    let ctx = RuleContext { tree, oracle };
    tree.preorder()
        .into_iter()
        .filter(|&id| tree.kind(id) == NodeKind::Call)
        .filter_map(|id| rule.check(&ctx, id))
        .collect()
}

fn matches_with(src: &str, oracle: &dyn Oracle) -> (SyntaxTree, Vec<Match>) {
    let tree = java::parse(src).unwrap();
    let found = hits(&tree, oracle, &rule());
    (tree, found)
}

fn matches(src: &str) -> (SyntaxTree, Vec<Match>) {
    let tree = java::parse(src).unwrap();
    let oracle = DeclarationOracle::build(&tree);
    let found = hits(&tree, &oracle, &rule());
    (tree, found)
}

#[test]
fn right_operand_buffer_to_string_matches_and_fixes() {
    let src = wrap("return new StringBuilder().append(x) + sb.toString();");
    let (tree, found) = matches(&src);
    let rule = rule();

    assert_eq!(found.len(), 1);
    let m = found[0];
    assert_eq!(tree.text(m.anchor), "toString");
    assert_eq!(tree.text(m.target), "sb.toString()");

    let fix = rule.fix(&tree, &m).unwrap();
    assert_eq!(fix.name(), "Remove .toString()");
    let fixed = apply_to_source(&tree, fix).unwrap();
    assert!(fixed.contains("return new StringBuilder().append(x) + sb;"));

    let (_, again) = matches(&fixed);
    assert!(again.is_empty());
}

#[test]
fn left_operand_is_never_flagged() {
    let (_, found) = matches(&wrap("return sb.toString() + x;"));
    assert!(found.is_empty());
}

#[test]
fn left_operand_ignored_even_when_oracle_always_resolves() {
    let oracle = Always(to_string_on("java.lang.StringBuffer"));
    let (tree, found) = matches_with(&wrap("return sb.toString() + \"!\";"), &oracle);
    assert!(found.is_empty(), "{:?}", found.iter().map(|m| tree.text(m.target)).collect::<Vec<_>>());
}

#[test]
fn other_operators_do_not_match() {
    let oracle = Always(to_string_on("java.lang.StringBuffer"));
    let (_, found) = matches_with(&wrap("boolean e = x == sb.toString(); return null;"), &oracle);
    assert!(found.is_empty());
}

#[test]
fn call_nested_in_argument_is_not_an_operand() {
    let oracle = Always(to_string_on("java.lang.StringBuffer"));
    let (tree, found) = matches_with(&wrap("return \"a\" + String.valueOf(sb.toString());"), &oracle);
    // Only the outer `String.valueOf(..)` call is a direct operand.
    assert_eq!(found.len(), 1);
    assert_eq!(tree.text(found[0].target), "String.valueOf(sb.toString())");
}

#[test]
fn string_builder_is_not_a_buffer() {
    let (_, found) = matches(&wrap("return \"a\" + b.toString();"));
    assert!(found.is_empty());
}

#[test]
fn subtypes_of_configured_buffer_do_not_count() {
    let oracle = Always(to_string_on("com.acme.FancyBuffer"));
    let (_, found) = matches_with(&wrap("return \"a\" + sb.toString();"), &oracle);
    assert!(found.is_empty());
}

#[test]
fn configured_buffer_types_are_honoured() {
    let config = BufferToStringConfig {
        buffer_types: vec!["java.lang.StringBuilder".into()],
        ..BufferToStringConfig::default()
    };
    let tree = java::parse(&wrap("return \"a\" + b.toString();")).unwrap();
    let oracle = DeclarationOracle::build(&tree);
    assert_eq!(hits(&tree, &oracle, &BufferToString::new(&config)).len(), 1);
}

#[test]
fn unresolved_call_is_silently_skipped() {
    let (_, found) = matches_with(&wrap("return x.toString() + y.toString();"), &Unresolved);
    assert!(found.is_empty());
}

#[test]
fn unqualified_to_string_does_not_match() {
    let oracle = Always(to_string_on("java.lang.StringBuffer"));
    let (_, found) = matches_with(&wrap("return \"a\" + toString();"), &oracle);
    assert!(found.is_empty());
}

#[test]
fn overload_with_arguments_does_not_match() {
    let oracle = Always(MethodSig {
        parameter_types: vec!["int".into()],
        ..to_string_on("java.lang.StringBuffer")
    });
    let (_, found) = matches_with(&wrap("return \"a\" + sb.toString(2);"), &oracle);
    assert!(found.is_empty());
}

#[test]
fn parenthesized_qualifier_is_kept_verbatim() {
    let src = wrap("return \"a\" + (sb).toString();");
    let tree = java::parse(&src).unwrap();
    let oracle = Always(to_string_on("java.lang.StringBuffer"));
    let rule = rule();
    let m = hits(&tree, &oracle, &rule)[0];
    let fixed = apply_to_source(&tree, rule.fix(&tree, &m).unwrap()).unwrap();
    assert!(fixed.contains("return \"a\" + (sb);"));
}

#[test]
fn catch_parameter_shadows_buffer_field() {
    let src = "class A { StringBuffer e; String f() {\n\
               try { g(); } catch (RuntimeException e) { return \"x\" + e.toString(); }\n\
               return \"\"; } }";
    let (_, found) = matches(src);
    assert!(found.is_empty());
}

#[test]
fn lambda_parameter_shadows_buffer_field() {
    let src = "class A { StringBuffer r; void f() { h(r -> \"x\" + r.toString()); } }";
    let (_, found) = matches(src);
    assert!(found.is_empty());
}

#[test]
fn resource_buffer_matches() {
    let src = "class A { Object r; String f() { try (StringBuffer r = open()) { return \"x\" + r.toString(); } } }";
    let (_, found) = matches(src);
    assert_eq!(found.len(), 1);
}
