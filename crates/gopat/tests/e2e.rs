//! End-to-end tests for gopat using insta for snapshot testing.
//!
//! These tests drive the public API from source text to rewritten source.

use std::fs;

use camino::Utf8PathBuf;
use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use gopat::{Engine, load_targets};
use gopat_syntax::{Fragment, Node, parse_file};

#[fixture]
fn engine() -> Engine {
    Engine::default()
}

fn rewrite(engine: &Engine, source: &str, pattern: &str, template: &str) -> String {
    let (mut tree, errors) = parse_file(source).unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(errors.is_empty(), "errors: {errors:?}");
    let compiled = engine
        .compile(pattern)
        .unwrap_or_else(|err| panic!("pattern: {err}"));
    let filled = engine
        .compile(template)
        .unwrap_or_else(|err| panic!("template: {err}"));
    let matches: Vec<_> = engine.find(&tree, &compiled).collect();
    engine
        .substitute(&mut tree, &matches, &filled)
        .unwrap_or_else(|err| panic!("rewrite: {err}"));
    engine.print(&Fragment::Node(tree))
}

// =============================================================================
// Happy Path: Rewriting
// =============================================================================

#[rstest]
fn snapshot_call_rewrite_carries_arguments(engine: Engine) {
    let source = "package demo

func main() {
\tfmt.Println(\"a\", 1)
\tif ok {
\t\tfmt.Println(x)
\t}
}
";
    assert_snapshot!(rewrite(&engine, source, "fmt.Println($*args)", "log.Print($*args)"), @r#"
    package demo

    func main() {
    	log.Print("a", 1)
    	if ok {
    		log.Print(x)
    	}
    }
    "#);
}

#[rstest]
fn snapshot_statement_lists_shrink(engine: Engine) {
    let source = "package demo

func main() {
\tlock()
\twork()
\tunlock()
}
";
    assert_snapshot!(rewrite(&engine, source, "lock(); $*body; unlock()", "$*body"), @r"
    package demo

    func main() {
    	work()
    }
    ");
}

#[rstest]
fn snapshot_error_returns_are_wrapped(engine: Engine) {
    let source = "package demo

func load() error {
\tif err := open(); err != nil {
\t\treturn err
\t}
\treturn nil
}
";
    assert_snapshot!(
        rewrite(&engine, source, "return $e", "return wrap($e)"),
        @r"
    package demo

    func load() error {
    	if err := open(); err != nil {
    		return wrap(err)
    	}
    	return wrap(nil)
    }
    "
    );
}

// =============================================================================
// Happy Path: Loading
// =============================================================================

fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
        .unwrap_or_else(|path| panic!("non UTF-8 path {}", path.display()));
    fs::write(&path, contents).unwrap_or_else(|err| panic!("write: {err}"));
    path
}

#[rstest]
fn loaded_targets_are_searched_in_order(engine: Engine) {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let first = write(&dir, "a.go", "package a\n\nfunc f() { x.Close() }\n");
    let second = write(&dir, "b.go", "package b\n\nfunc g() { y.Close(); z.Close() }\n");
    let targets = load_targets(&[first, second]).unwrap_or_else(|err| panic!("load: {err}"));
    let pattern = engine
        .compile("$r.Close()")
        .unwrap_or_else(|err| panic!("pattern: {err}"));
    let receivers: Vec<Vec<String>> = targets
        .iter()
        .map(|target| {
            engine
                .find(target.tree(), &pattern)
                .filter_map(|result| result.capture("r").map(|r| engine.print(r)))
                .collect()
        })
        .collect();
    assert_eq!(receivers, [vec!["x"], vec!["y", "z"]]);
}

// =============================================================================
// Unhappy Paths
// =============================================================================

#[rstest]
#[case("f(")]
#[case("$")]
#[case("if {")]
fn invalid_patterns_fail_to_compile(engine: Engine, #[case] text: &str) {
    assert!(engine.compile(text).is_err(), "{text} should not compile");
}

#[rstest]
fn unbound_template_names_fail_the_rewrite(engine: Engine) {
    let (mut tree, _) =
        parse_file("package p\n\nfunc f() { a() }\n").unwrap_or_else(|err| panic!("parse: {err}"));
    let original: Node = tree.clone();
    let pattern = engine.compile("a()").unwrap_or_else(|err| panic!("pattern: {err}"));
    let template = engine.compile("b($x)").unwrap_or_else(|err| panic!("template: {err}"));
    let matches: Vec<_> = engine.find(&tree, &pattern).collect();
    let error = engine
        .substitute(&mut tree, &matches, &template)
        .expect_err("unbound metavariable");
    assert_snapshot!(error.to_string(), @"template references unbound metavariable $x");
    assert_eq!(tree, original);
}
