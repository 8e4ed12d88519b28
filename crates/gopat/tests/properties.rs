//! Property tests for matching and rewriting.

use gopat::{Engine, Matcher, Pattern};
use gopat_syntax::{ListKind, Node, NodeList, parse_file};
use proptest::prelude::*;

fn compile(text: &str) -> Pattern {
    Pattern::compile(text).unwrap_or_else(|err| panic!("pattern {text}: {err}"))
}

fn ident() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "b", "c"])
}

fn call() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["f", "g", "h"]),
        prop::collection::vec(ident(), 0..4),
    )
        .prop_map(|(name, args)| format!("{name}({})", args.join(", ")))
}

fn body(calls: &[String]) -> Node {
    let source = format!("package p\n\nfunc f() {{\n{}\n}}\n", calls.join("\n"));
    parse_file(&source)
        .unwrap_or_else(|err| panic!("parse: {err}"))
        .0
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn repeated_names_bind_equal_nodes(x in ident(), y in ident()) {
        let tree = body(&[format!("_ = {x} + {y}")]);
        let pattern = compile("$v + $v");
        let found = Engine::default().find(&tree, &pattern).count();
        prop_assert_eq!(found, usize::from(x == y));
    }

    #[test]
    fn bracketed_sequences_need_matching_ends(names in prop::collection::vec(ident(), 0..6)) {
        let pattern = compile("a, $*_, b");
        let list = NodeList::new(
            ListKind::Expr,
            names.iter().map(|name| Node::ident(*name)).collect(),
        );
        let expected = names.len() >= 2
            && names.first() == Some(&"a")
            && names.last() == Some(&"b");
        let matched = Matcher::new(&pattern).match_list(&list, false).is_some();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn lone_sequence_wildcard_matches_any_list(names in prop::collection::vec(ident(), 0..6)) {
        let pattern = compile("$*_");
        let list = NodeList::new(
            ListKind::Expr,
            names.iter().map(|name| Node::ident(*name)).collect(),
        );
        prop_assert!(Matcher::new(&pattern).match_list(&list, false).is_some());
    }

    #[test]
    fn rewriting_calls_to_themselves_changes_nothing(calls in prop::collection::vec(call(), 1..6)) {
        let engine = Engine::default();
        let mut tree = body(&calls);
        let original = tree.clone();
        let pattern = engine.compile("$f($*args)").unwrap_or_else(|err| panic!("{err}"));
        let matches: Vec<_> = engine.find(&tree, &pattern).collect();
        let summary = engine
            .substitute(&mut tree, &matches, &pattern)
            .unwrap_or_else(|err| panic!("rewrite: {err}"));
        prop_assert_eq!(summary.applied, calls.len());
        prop_assert_eq!(&tree, &original);
    }

    #[test]
    fn match_order_is_deterministic(calls in prop::collection::vec(call(), 1..6)) {
        let engine = Engine::default();
        let tree = body(&calls);
        let pattern = engine.compile("$f($*_)").unwrap_or_else(|err| panic!("{err}"));
        let first: Vec<_> = engine.find(&tree, &pattern).map(|m| m.target()).collect();
        let second: Vec<_> = engine.find(&tree, &pattern).map(|m| m.target()).collect();
        prop_assert_eq!(first, second);
        let printed: Vec<_> = engine
            .find(&tree, &pattern)
            .map(|m| engine.print(m.matched()))
            .collect();
        prop_assert_eq!(printed, calls);
    }
}

#[test]
fn single_node_patterns_never_match_lists() {
    let pattern = compile("$x");
    let list = NodeList::new(ListKind::Expr, vec![Node::ident("a"), Node::ident("b")]);
    assert!(Matcher::new(&pattern).match_list(&list, false).is_none());
}
