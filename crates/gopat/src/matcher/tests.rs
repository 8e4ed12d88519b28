//! Unit tests for the structural and list matchers.

use gopat_syntax::{Fragment, ListKind, Node, NodeKind, NodeList, parse_file, print_fragment};
use rstest::rstest;

use super::*;

fn compile(text: &str) -> Pattern {
    Pattern::compile(text).unwrap_or_else(|err| panic!("compile {text:?}: {err}"))
}

fn file(body: &str) -> Node {
    let source = format!("package p\n\nfunc f() {{\n{body}\n}}\n");
    let (tree, errors) = parse_file(&source).unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(errors.is_empty(), "errors in {source:?}: {errors:?}");
    tree
}

fn find(pattern: &str, body: &str) -> Vec<MatchResult> {
    let pattern = compile(pattern);
    let tree = file(body);
    Matcher::new(&pattern).find(&tree).collect()
}

fn capture_text(result: &MatchResult, name: &str) -> String {
    result
        .capture(name)
        .map(print_fragment)
        .unwrap_or_else(|| panic!("no capture {name}"))
}

fn idents(names: &[&str]) -> NodeList {
    NodeList::new(ListKind::Expr, names.iter().map(|name| Node::ident(*name)).collect())
}

#[rstest]
#[case("$x.$_ = $x", "a.b = a", 1)]
#[case("$x.$_ = $x", "a.b = c", 0)]
#[case("$x == $x", "_ = a == a", 1)]
#[case("$x == $x", "_ = a == b", 0)]
#[case("fmt.Println($*_)", "fmt.Println()\nfmt.Println(1, 2)\nfmt.Printf(\"\")", 2)]
#[case("$*x + 1", "_ = a + 1", 0)]
#[case("f($*a, $*a)", "f(1, 2, 1, 2)\nf(1, 2, 3)", 1)]
#[case("x := $v", "x := 1\nx = 2", 1)]
fn counts_matches(#[case] pattern: &str, #[case] body: &str, #[case] expected: usize) {
    assert_eq!(find(pattern, body).len(), expected);
}

#[test]
fn repeated_sequence_binds_the_common_run() {
    let results = find("f($*a, $*a)", "f(1, 2, 1, 2)");
    let result = results.first().expect("one match");
    assert_eq!(capture_text(result, "a"), "1, 2");
}

#[test]
fn statement_wildcard_binds_whole_statements() {
    let results = find("if $c { $s }", "if ok {\n\treturn\n}\nif done {\n\tg()\n}");
    let texts: Vec<_> = results.iter().map(|r| capture_text(r, "s")).collect();
    assert_eq!(texts, ["return", "g()"]);
}

#[test]
fn field_wildcard_binds_whole_fields() {
    let pattern = compile("func $name($param) {}");
    let source = "package p\n\nfunc g(a int) {}\n";
    let (tree, _) = parse_file(source).expect("parse");
    let results: Vec<_> = Matcher::new(&pattern).find(&tree).collect();
    let result = results.first().expect("one match");
    assert_eq!(capture_text(result, "param"), "a int");
    assert_eq!(capture_text(result, "name"), "g");
}

#[test]
fn header_wildcard_binds_init_and_condition() {
    let results = find(
        "if $*x { $*y }",
        "if err := g(); err != nil {\n\treturn\n}\nif ok {\n}",
    );
    let headers: Vec<_> = results
        .iter()
        .map(|r| r.capture("x").and_then(Fragment::as_list).map(NodeList::len))
        .collect();
    assert_eq!(headers, [Some(2), Some(1)]);
}

#[test]
fn clause_wildcards_match_any_clauses() {
    let body = "switch v {\ncase 1:\n\tg()\ndefault:\n}";
    assert_eq!(find("switch $x { $*_ }", body).len(), 1);
    assert_eq!(find("switch $x { $_ }", body).len(), 0);
}

#[rstest]
#[case("$x = 1", "x := 1", 0)]
#[case("~ $x = 1", "x := 1", 1)]
#[case("~ $x = 1", "var y = 1", 1)]
#[case("for $k, $v := range $x { $*_ }", "for k, v = range m {\n}", 0)]
#[case("~ for $k, $v := range $x { $*_ }", "for k, v = range m {\n}", 1)]
#[case("for _ = range $x { $*_ }", "for range m {\n}", 0)]
#[case("~ for _ = range $x { $*_ }", "for range m {\n}", 0)]
#[case("for range $x { $*_ }", "for _ = range m {\n}", 0)]
#[case("~ for range $x { $*_ }", "for _ = range m {\n}", 1)]
#[case("var $x = $y", "var a, b = 1, 2", 0)]
#[case("~ var $x = 2", "var a, b = 1, 2", 1)]
fn aggressive_mode_relaxes_comparisons(
    #[case] pattern: &str,
    #[case] body: &str,
    #[case] expected: usize,
) {
    assert_eq!(find(pattern, body).len(), expected);
}

#[test]
fn aggressive_blocks_match_contained_statements() {
    let body = "if ok {\n\ta()\n\tb()\n\tc()\n}";
    assert_eq!(find("if ok { b() }", body).len(), 0);
    assert_eq!(find("~ if ok { b() }", body).len(), 1);
}

#[rstest]
#[case(&[], true)]
#[case(&["a"], true)]
#[case(&["a", "b", "c"], true)]
fn lone_sequence_wildcard_matches_any_list(#[case] names: &[&str], #[case] expected: bool) {
    let pattern = compile("$*_");
    let list = idents(names);
    let found = Matcher::new(&pattern).match_list(&list, false);
    assert_eq!(found.is_some(), expected);
    if let Some(found) = found {
        assert_eq!(found.span, 0..names.len());
    }
}

#[rstest]
#[case(&["a", "b"], true)]
#[case(&["a", "x", "y", "b"], true)]
#[case(&["a"], false)]
#[case(&["b", "a"], false)]
#[case(&["a", "b", "c"], false)]
fn bracketed_wildcard_requires_matching_ends(#[case] names: &[&str], #[case] expected: bool) {
    let pattern = compile("a, $*_, b");
    let list = idents(names);
    assert_eq!(
        Matcher::new(&pattern).match_list(&list, false).is_some(),
        expected
    );
}

#[test]
fn partial_lists_match_inner_spans() {
    let pattern = compile("b, c");
    let list = idents(&["a", "b", "c", "d"]);
    let mut matcher = Matcher::new(&pattern);
    assert_eq!(matcher.match_list(&list, false), None);
    let found = matcher.match_list(&list, true).expect("partial match");
    assert_eq!(found.span, 1..3);
}

#[test]
fn trailing_sequence_extends_to_the_end_in_partial_mode() {
    let pattern = compile("b, $*rest");
    let list = idents(&["a", "b", "c", "d"]);
    let found = Matcher::new(&pattern)
        .match_list(&list, true)
        .expect("partial match");
    assert_eq!(found.span, 1..4);
    let rest = found.captures.get("rest").map(print_fragment);
    assert_eq!(rest.as_deref(), Some("c, d"));
}

#[test]
fn failed_list_match_leaves_bindings_untouched() {
    let pattern = compile("$x, $x");
    let list = idents(&["a", "b"]);
    assert!(Matcher::new(&pattern).match_list(&list, false).is_none());
}

fn call_with_args(count: usize) -> Node {
    Node::new(NodeKind::Call {
        fun: Node::ident("f").boxed(),
        args: idents(&vec!["x"; count]),
        ellipsis: false,
    })
}

#[test]
fn unconstrained_wildcards_stay_linear() {
    let count = 200;
    let pattern = compile("f($*_, x, $*_, y, $*_)");
    let candidate = call_with_args(count);
    let mut matcher = Matcher::new(&pattern);
    assert!(matcher.match_node(&candidate).is_none());
    let stats = matcher.stats();
    assert!(
        stats.node_comparisons <= 2 * count + 4,
        "{} comparisons for {count} arguments",
        stats.node_comparisons
    );
    assert!(stats.restarts <= count);
}

#[test]
fn restart_budget_abandons_pathological_searches() {
    let pattern = compile("f($*a, $*b, $*a, y)");
    let candidate = call_with_args(60);
    let mut matcher = Matcher::new(&pattern).with_restart_budget(10);
    assert!(matcher.match_node(&candidate).is_none());
    assert!(matcher.stats().restarts <= 11);
    assert_eq!(matcher.stats().exhausted, 1);
}

#[test]
fn repeated_names_across_wildcards_reach_a_tail_match() {
    let mut names: Vec<String> = (0..498).map(|n| format!("a{n}")).collect();
    names.extend(["q".to_owned(), "q".to_owned()]);
    let args: Vec<&str> = names.iter().map(String::as_str).collect();
    let candidate = Node::new(NodeKind::Call {
        fun: Node::ident("g").boxed(),
        args: idents(&args),
        ellipsis: false,
    });
    let pattern = compile("g($*_, $x, $*_, $x)");
    let mut matcher = Matcher::new(&pattern);
    let captures = matcher.match_node(&candidate).expect("match at the tail");
    assert_eq!(captures.get("x").map(print_fragment).as_deref(), Some("q"));
    let stats = matcher.stats();
    assert_eq!(stats.exhausted, 0);
    assert!(
        stats.restarts <= args.len(),
        "{} restarts for {} arguments",
        stats.restarts,
        args.len()
    );
}

#[rstest]
#[case("f($*a, y, $*a)", &["x", "y", "x"], true)]
#[case("f($*a, y, $*a)", &["x", "y", "z"], false)]
#[case("f($*_, y, z)", &["x", "x", "y", "z"], true)]
#[case("f($*_, y, z)", &["z"], false)]
fn wildcards_before_fixed_tails(
    #[case] pattern: &str,
    #[case] args: &[&str],
    #[case] expected: bool,
) {
    let pattern = compile(pattern);
    let candidate = Node::new(NodeKind::Call {
        fun: Node::ident("f").boxed(),
        args: idents(args),
        ellipsis: false,
    });
    assert_eq!(Matcher::new(&pattern).match_node(&candidate).is_some(), expected);
}

#[test]
fn repeated_searches_are_deterministic() {
    let body = "a := 1\nb := a\nif a > b {\n\tc := 2\n\t_ = c\n}";
    let first: Vec<_> = find("$x := $_", body).into_iter().map(|r| r.target()).collect();
    let second: Vec<_> = find("$x := $_", body).into_iter().map(|r| r.target()).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn list_patterns_report_spans_of_blocks() {
    let results = find("a(); b()", "a()\nb()\nc()\na()\nb()");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.target().len() == 2));
}

#[test]
fn limit_truncates_results() {
    let pattern = compile("$x()");
    let tree = file("a()\nb()\nc()");
    let results: Vec<_> = Matcher::new(&pattern).find(&tree).with_limit(2).collect();
    assert_eq!(results.len(), 2);
}

#[test]
fn find_with_starts_from_existing_bindings() {
    let pattern = compile("$x()");
    let tree = file("a()\nb()");
    let mut captures = std::collections::BTreeMap::new();
    captures.insert("x".to_owned(), Fragment::Node(Node::ident("b")));
    let results: Vec<_> = Matcher::new(&pattern).find_with(&tree, &captures).collect();
    assert_eq!(results.len(), 1);
}
