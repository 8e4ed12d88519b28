//! Unit tests for lowering and the node model.

use rstest::rstest;

use crate::{AssignOp, ListKind, Node, NodeKind, Parser, Slot, print_node};

fn lower(source: &str) -> Node {
    let mut parser = Parser::new().expect("parser init");
    let result = parser.parse(source).expect("parse");
    assert!(!result.has_errors(), "unexpected errors: {:?}", result.errors());
    result.file()
}

fn body_stmts(file: &Node) -> Vec<Node> {
    file.descendants()
        .find_map(|node| match &node.kind {
            NodeKind::FuncDecl { body: Some(body), .. } => match &body.kind {
                NodeKind::BlockStmt { stmts } => Some(stmts.items.clone()),
                _ => None,
            },
            _ => None,
        })
        .expect("function body")
}

fn first_stmt(body: &str) -> Node {
    let file = lower(&format!("package p\n\nfunc f() {{\n{body}\n}}\n"));
    body_stmts(&file).into_iter().next().expect("statement")
}

// =============================================================================
// Lowering
// =============================================================================

#[rstest]
#[case("x := 1", "AssignStmt")]
#[case("x += 2", "AssignStmt")]
#[case("x++", "IncDecStmt")]
#[case("ch <- v", "SendStmt")]
#[case("f(x)", "ExprStmt")]
#[case("return", "ReturnStmt")]
#[case("go f()", "GoStmt")]
#[case("defer f()", "DeferStmt")]
#[case("if x { }", "IfStmt")]
#[case("for { }", "ForStmt")]
#[case("for i := 0; i < n; i++ { }", "ForStmt")]
#[case("for k, v := range m { }", "RangeStmt")]
#[case("switch x { case 1: }", "SwitchStmt")]
#[case("switch y := x.(type) { case int: }", "TypeSwitchStmt")]
#[case("select { default: }", "SelectStmt")]
#[case("var x int", "DeclStmt")]
#[case("{ }", "BlockStmt")]
fn statements_lower_to_expected_variant(#[case] body: &str, #[case] expected: &str) {
    assert_eq!(first_stmt(body).kind.name(), expected);
}

#[test]
fn short_variable_declaration_keeps_sides() {
    let stmt = first_stmt("a, b := f(), 2");
    let NodeKind::AssignStmt { lhs, tok, rhs } = &stmt.kind else {
        panic!("expected assignment");
    };
    assert_eq!(*tok, AssignOp::Define);
    assert_eq!(lhs.len(), 2);
    assert_eq!(rhs.len(), 2);
    assert_eq!(lhs.kind, ListKind::Expr);
}

#[test]
fn type_switch_alias_lowers_to_definition_of_assertion() {
    let stmt = first_stmt("switch y := x.(type) {\ncase int:\n}");
    let NodeKind::TypeSwitchStmt { assign, .. } = &stmt.kind else {
        panic!("expected type switch");
    };
    let NodeKind::AssignStmt { rhs, .. } = &assign.kind else {
        panic!("expected assignment");
    };
    let assertion = rhs.items.first().expect("rhs");
    assert!(matches!(assertion.kind, NodeKind::TypeAssert { ty: None, .. }));
}

#[test]
fn default_case_has_empty_list() {
    let stmt = first_stmt("switch {\ndefault:\n\tf()\n}");
    let clause = stmt
        .descendants()
        .find(|node| matches!(node.kind, NodeKind::CaseClause { .. }))
        .expect("clause");
    let NodeKind::CaseClause { list, body } = &clause.kind else {
        panic!("expected case clause");
    };
    assert!(list.is_empty());
    assert_eq!(body.len(), 1);
}

#[test]
fn if_header_keeps_init_and_else() {
    let stmt = first_stmt("if err := f(); err != nil {\n} else {\n}");
    let NodeKind::IfStmt { init, els, .. } = &stmt.kind else {
        panic!("expected if");
    };
    assert!(init.is_some());
    assert!(els.is_some());
}

#[test]
fn conversions_lower_as_calls() {
    let stmt = first_stmt("x = []byte(s)");
    assert!(
        stmt.descendants()
            .any(|node| matches!(node.kind, NodeKind::Call { .. }))
    );
}

#[test]
fn variadic_call_sets_ellipsis() {
    let stmt = first_stmt("f(xs...)");
    let call = stmt
        .descendants()
        .find(|node| matches!(node.kind, NodeKind::Call { .. }))
        .expect("call");
    assert!(matches!(call.kind, NodeKind::Call { ellipsis: true, .. }));
}

#[test]
fn grouped_var_declaration_is_flagged() {
    let file = lower("package p\n\nvar (\n\ta = 1\n\tb = 2\n)\n");
    let decl = file
        .descendants()
        .find(|node| matches!(node.kind, NodeKind::GenDecl { .. }))
        .expect("declaration");
    let NodeKind::GenDecl { specs, grouped, .. } = &decl.kind else {
        panic!("expected gen decl");
    };
    assert!(*grouped);
    assert_eq!(specs.len(), 2);
}

#[test]
fn method_declaration_keeps_receiver() {
    let file = lower("package p\n\nfunc (t *T) M(a, b int) error { return nil }\n");
    let decl = file
        .descendants()
        .find(|node| matches!(node.kind, NodeKind::FuncDecl { .. }))
        .expect("method");
    let NodeKind::FuncDecl { recv, ty, .. } = &decl.kind else {
        panic!("expected func decl");
    };
    assert_eq!(recv.len(), 1);
    let NodeKind::FuncType {
        params, results, ..
    } = &ty.kind
    else {
        panic!("expected func type");
    };
    assert_eq!(params.len(), 1);
    assert_eq!(results.len(), 1);
}

#[test]
fn spans_cover_source_text() {
    let source = "package p\n\nfunc f() {\n\tfoo(bar)\n}\n";
    let file = lower(source);
    let call = file
        .descendants()
        .find(|node| matches!(node.kind, NodeKind::Call { .. }))
        .expect("call");
    let span = call.span().expect("span");
    let start = usize::try_from(span.start_byte).expect("start");
    let end = usize::try_from(span.end_byte).expect("end");
    assert_eq!(source.get(start..end), Some("foo(bar)"));
    assert_eq!(span.start.line, 3);
    assert_eq!(span.start.column, 1);
}

// =============================================================================
// Node model
// =============================================================================

#[test]
fn equality_ignores_identity_and_position() {
    let first = first_stmt("x = y + 1");
    let second = first_stmt("x = y + 1");
    assert_ne!(first.id(), second.id());
    assert_eq!(first, second);
    assert_ne!(first, first_stmt("x = y + 2"));
}

#[test]
fn renumbered_copy_has_fresh_ids_throughout() {
    let stmt = first_stmt("x = f(y)");
    let copy = stmt.renumbered();
    assert_eq!(stmt, copy);
    for node in copy.descendants() {
        assert!(stmt.find(node.id()).is_none());
    }
}

#[test]
fn find_mut_reaches_nested_nodes() {
    let mut stmt = first_stmt("x = f(y)");
    let target = stmt
        .descendants()
        .find(|node| node.as_ident() == Some("y"))
        .map(Node::id)
        .expect("ident");
    let found = stmt.find_mut(target).expect("found");
    found.kind = NodeKind::Ident("z".to_owned());
    assert_eq!(print_node(&stmt), "x = f(z)");
}

#[test]
fn clear_spans_invalidates_every_position() {
    let mut stmt = first_stmt("x = f(y)");
    stmt.clear_spans();
    assert!(stmt.descendants().all(|node| node.span().is_none()));
}

#[test]
fn slots_follow_fixed_order() {
    let stmt = first_stmt("if a := 1; a > 0 {\n}");
    let slots = stmt.slots();
    assert_eq!(slots.len(), 4);
    assert!(matches!(slots.first(), Some(Slot::Opt(Some(_)))));
    assert!(matches!(slots.get(1), Some(Slot::One(_))));
    assert!(matches!(slots.get(3), Some(Slot::Opt(None))));
}

#[test]
fn descendants_visit_in_pre_order() {
    let stmt = first_stmt("a = b");
    let names: Vec<&str> = stmt.descendants().filter_map(Node::as_ident).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn lowered_spans_serialise_with_zero_based_positions() {
    let stmt = first_stmt("x = 1");
    let span = stmt.span().expect("span");
    let json = serde_json::to_value(span).expect("serialise");
    assert_eq!(json["start"], serde_json::json!({ "line": 3, "column": 0 }));
    assert_eq!(json["end_byte"], serde_json::json!(span.end_byte));
}
