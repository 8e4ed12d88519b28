//! Behaviour-driven development (BDD) step definitions for gopat scenarios.

mod scenarios;

use std::cell::RefCell;

use gopat_syntax::{Fragment, Node, parse_file};
use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{Engine, MatchResult, Pattern, Predicate, RewriteSummary, TypeTable};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    engine: Engine,
    /// Parsed target, rewritten in place.
    tree: Option<Node>,
    /// Copy of the target taken before any rewrite.
    original: Option<Node>,
    pattern: Option<Pattern>,
    matches: Vec<MatchResult>,
    summary: Option<RewriteSummary>,
}

impl TestWorld {
    fn tree(&self) -> &Node {
        self.tree.as_ref().expect("function body should be set")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("a function body {body}")]
fn given_body(world: &RefCell<TestWorld>, body: String) {
    let mut w = world.borrow_mut();
    let source = format!("package p\n\nfunc f() {{\n{}\n}}\n", strip_quotes(&body));
    let (tree, errors) = parse_file(&source).expect("parse");
    assert!(errors.is_empty(), "unexpected syntax errors: {errors:?}");
    w.original = Some(tree.clone());
    w.tree = Some(tree);
}

#[given("the pattern {pattern}")]
fn given_pattern(world: &RefCell<TestWorld>, pattern: String) {
    let mut w = world.borrow_mut();
    let compiled = w
        .engine
        .compile(strip_quotes(&pattern))
        .expect("pattern compile");
    w.pattern = Some(compiled);
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the pattern is matched")]
fn when_matched(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let pattern = w.pattern.as_ref().expect("pattern should be set");
    let matches: Vec<_> = w.engine.find(w.tree(), pattern).collect();
    w.matches = matches;
}

#[when("the matches are filtered by {predicate}")]
fn when_filtered(world: &RefCell<TestWorld>, predicate: String) {
    let mut w = world.borrow_mut();
    let set = w
        .engine
        .compile_predicate(strip_quotes(&predicate))
        .expect("predicate compile");
    let matches = std::mem::take(&mut w.matches);
    let kept = w
        .engine
        .filter(matches, &Predicate::from(set), true, &TypeTable::new());
    w.matches = kept;
}

#[when("the matches are filtered to those containing {pattern}")]
fn when_filtered_by_content(world: &RefCell<TestWorld>, pattern: String) {
    let mut w = world.borrow_mut();
    let inner = w
        .engine
        .compile(strip_quotes(&pattern))
        .expect("pattern compile");
    let matches = std::mem::take(&mut w.matches);
    let kept = w
        .engine
        .filter(matches, &Predicate::Contains(inner), true, &TypeTable::new());
    w.matches = kept;
}

#[when("the matches move up {levels} levels")]
fn when_navigated(world: &RefCell<TestWorld>, levels: usize) {
    let mut w = world.borrow_mut();
    let matches = std::mem::take(&mut w.matches);
    let moved = w.engine.navigate_parents(w.tree(), matches, levels);
    w.matches = moved;
}

#[when("the matches are rewritten to {template}")]
fn when_rewritten(world: &RefCell<TestWorld>, template: String) {
    let mut w = world.borrow_mut();
    let compiled = w
        .engine
        .compile(strip_quotes(&template))
        .expect("template compile");
    let mut tree = w.tree.take().expect("function body should be set");
    let summary = w
        .engine
        .substitute(&mut tree, &w.matches, &compiled)
        .expect("rewrite should apply");
    w.tree = Some(tree);
    w.summary = Some(summary);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("{count} matches are found")]
fn then_match_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    assert_eq!(
        w.matches.len(),
        count,
        "unexpected matches: {:?}",
        w.matches
    );
}

#[then("the capture {name} prints as {text}")]
fn then_capture_prints(world: &RefCell<TestWorld>, name: String, text: String) {
    let w = world.borrow();
    let capture_name = strip_quotes(&name);
    let printed: Vec<_> = w
        .matches
        .iter()
        .filter_map(|result| result.capture(capture_name))
        .map(|capture| w.engine.print(capture))
        .collect();
    assert!(
        printed.iter().any(|capture| capture == strip_quotes(&text)),
        "captures of {capture_name}: {printed:?}"
    );
}

#[then("the first match covers {count} statements")]
fn then_first_match_len(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let first = w.matches.first().expect("a match");
    assert_eq!(first.target().len(), count);
    let Fragment::List(list) = first.matched() else {
        panic!("expected a list match, got {:?}", first.matched());
    };
    assert!(list.items.iter().all(Node::is_stmt));
}

#[then("the first match is a {kind}")]
fn then_first_match_kind(world: &RefCell<TestWorld>, kind: String) {
    let w = world.borrow();
    let node = w
        .matches
        .first()
        .and_then(|result| result.matched().as_node())
        .expect("a node match");
    assert_eq!(node.kind.name(), strip_quotes(&kind));
}

#[then("{count} rewrites are applied")]
fn then_rewrites_applied(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let summary = w.summary.as_ref().expect("rewrite summary");
    assert_eq!(summary.applied, count);
}

#[then("the tree is unchanged")]
fn then_tree_unchanged(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert_eq!(w.tree.as_ref(), w.original.as_ref());
}
