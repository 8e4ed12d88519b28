//! Rebuilding `if`, `switch` and `for` headers from captured header lists.
//!
//! A header wildcard captures the init statement and condition (and, for
//! `for`, the post statement) as one statement list. Filling reverses that:
//! the list is split back into the header fields by count and shape.

use gopat_syntax::{AssignOp, Fragment, Node, NodeKind};

use super::fill::{Filler, to_expression, to_statement};
use crate::error::RewriteError;

type Header = Option<Box<Node>>;

impl Filler<'_> {
    /// Returns the rebuilt statement when `kind` has a header wildcard.
    pub(super) fn rebuild_header(&self, kind: &NodeKind) -> Result<Option<NodeKind>, RewriteError> {
        let rebuilt = match kind {
            NodeKind::IfStmt {
                init: None,
                cond,
                body,
                els,
            } => {
                let Some(items) = self.header_items(cond)? else {
                    return Ok(None);
                };
                let (head_init, head_cond) = if_header(items)?;
                NodeKind::IfStmt {
                    init: head_init,
                    cond: head_cond,
                    body: self.filled(body)?,
                    els: self.filled_opt(els)?,
                }
            }
            NodeKind::SwitchStmt {
                init: None,
                tag: Some(tag),
                body,
            } => {
                let Some(items) = self.header_items(tag)? else {
                    return Ok(None);
                };
                switch_header(items, self.filled(body)?)?
            }
            NodeKind::ForStmt {
                init: None,
                cond: Some(cond),
                post: None,
                body,
            } => {
                let Some(items) = self.header_items(cond)? else {
                    return Ok(None);
                };
                let (head_init, head_cond, head_post) = for_header(items)?;
                NodeKind::ForStmt {
                    init: head_init,
                    cond: head_cond,
                    post: head_post,
                    body: self.filled(body)?,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(rebuilt))
    }

    fn header_items(&self, head: &Node) -> Result<Option<Vec<Node>>, RewriteError> {
        let Some(mv) = self.template.sequence_wildcard(head) else {
            return Ok(None);
        };
        let items = match self.capture(&mv.name)? {
            Fragment::Node(node) => vec![node.clone()],
            Fragment::List(list) => list.items.clone(),
        };
        Ok(Some(items))
    }

    fn filled(&self, child: &Node) -> Result<Box<Node>, RewriteError> {
        let mut copy = Box::new(child.clone());
        self.fill_one(&mut copy)?;
        Ok(copy)
    }

    fn filled_opt(&self, child: &Header) -> Result<Header, RewriteError> {
        let mut copy = child.clone();
        self.fill_opt(&mut copy)?;
        Ok(copy)
    }
}

fn header_count_error(statement: &'static str) -> RewriteError {
    RewriteError::incompatible(statement, "header list of another length")
}

fn statement(node: Option<Node>) -> Result<Header, RewriteError> {
    Ok(node.map(to_statement).transpose()?.map(Node::boxed))
}

fn expression(node: Option<Node>) -> Result<Header, RewriteError> {
    Ok(node.map(to_expression).transpose()?.map(Node::boxed))
}

fn is_expr_stmt(node: &Node) -> bool {
    matches!(node.kind, NodeKind::ExprStmt(_))
}

/// `x.(type)` or `v := x.(type)`.
fn is_type_switch_guard(node: &Node) -> bool {
    let is_guard = |expr: &Node| matches!(expr.kind, NodeKind::TypeAssert { ty: None, .. });
    match &node.kind {
        NodeKind::ExprStmt(inner) => is_guard(inner),
        NodeKind::AssignStmt {
            tok: AssignOp::Define,
            rhs,
            ..
        } => matches!(rhs.items.as_slice(), [only] if is_guard(only)),
        _ => false,
    }
}

fn if_header(items: Vec<Node>) -> Result<(Header, Box<Node>), RewriteError> {
    let mut items = items.into_iter();
    let (head_init, head_cond) = match (items.next(), items.next(), items.next()) {
        (Some(only), None, None) => (None, only),
        (Some(first), Some(second), None) => (Some(first), second),
        _ => return Err(header_count_error("if header")),
    };
    Ok((statement(head_init)?, to_expression(head_cond)?.boxed()))
}

fn switch_header(items: Vec<Node>, body: Box<Node>) -> Result<NodeKind, RewriteError> {
    let mut items = items.into_iter();
    let (head_init, guard) = match (items.next(), items.next(), items.next()) {
        (None, _, _) => (None, None),
        (Some(only), None, _) if is_expr_stmt(&only) || is_type_switch_guard(&only) => {
            (None, Some(only))
        }
        (Some(only), None, _) => (Some(only), None),
        (Some(first), Some(second), None) => (Some(first), Some(second)),
        _ => return Err(header_count_error("switch header")),
    };
    let init = statement(head_init)?;
    match guard {
        Some(assign) if is_type_switch_guard(&assign) => Ok(NodeKind::TypeSwitchStmt {
            init,
            assign: to_statement(assign)?.boxed(),
            body,
        }),
        tag => Ok(NodeKind::SwitchStmt {
            init,
            tag: expression(tag)?,
            body,
        }),
    }
}

/// Splits a `for` header list.
///
/// Two items are read as condition and post when the first is an
/// expression statement, as init and condition when only the second is,
/// and as init and post otherwise. A lone item is the condition when it is
/// an expression statement, the post statement for `++`/`--`, and the init
/// statement otherwise.
fn for_header(items: Vec<Node>) -> Result<(Header, Header, Header), RewriteError> {
    let count = items.len();
    let mut items = items.into_iter();
    let (head_init, head_cond, head_post) = match count {
        0 => (None, None, None),
        1 => match items.next() {
            Some(only) if is_expr_stmt(&only) => (None, Some(only), None),
            Some(only) if matches!(only.kind, NodeKind::IncDecStmt { .. }) => {
                (None, None, Some(only))
            }
            only => (only, None, None),
        },
        2 => {
            let (first, second) = (items.next(), items.next());
            if first.as_ref().is_some_and(is_expr_stmt) {
                (None, first, second)
            } else if second.as_ref().is_some_and(is_expr_stmt) {
                (first, second, None)
            } else {
                (first, None, second)
            }
        }
        3 => (items.next(), items.next(), items.next()),
        _ => return Err(header_count_error("for header")),
    };
    Ok((
        statement(head_init)?,
        expression(head_cond)?,
        statement(head_post)?,
    ))
}

#[cfg(test)]
mod tests {
    use gopat_syntax::{BinaryOp, ListKind, NodeList};
    use rstest::rstest;

    use super::*;

    fn expr_stmt(name: &str) -> Node {
        Node::new(NodeKind::ExprStmt(Node::ident(name).boxed()))
    }

    fn inc(name: &str) -> Node {
        Node::new(NodeKind::IncDecStmt {
            x: Node::ident(name).boxed(),
            inc: true,
        })
    }

    fn define(name: &str, value: Node) -> Node {
        Node::new(NodeKind::AssignStmt {
            lhs: NodeList::new(ListKind::Expr, vec![Node::ident(name)]),
            tok: AssignOp::Define,
            rhs: NodeList::new(ListKind::Expr, vec![value]),
        })
    }

    fn present(header: &Header) -> bool {
        header.is_some()
    }

    #[rstest]
    #[case(vec![expr_stmt("ok")], (false, true, false))]
    #[case(vec![inc("i")], (false, false, true))]
    #[case(vec![define("i", Node::ident("zero"))], (true, false, false))]
    #[case(vec![expr_stmt("ok"), inc("i")], (false, true, true))]
    #[case(vec![define("i", Node::ident("zero")), expr_stmt("ok")], (true, true, false))]
    #[case(vec![define("i", Node::ident("zero")), inc("i")], (true, false, true))]
    #[case(vec![define("i", Node::ident("zero")), expr_stmt("ok"), inc("i")], (true, true, true))]
    fn for_headers_split_by_shape(#[case] items: Vec<Node>, #[case] expected: (bool, bool, bool)) {
        let (init, cond, post) = for_header(items).expect("header");
        assert_eq!((present(&init), present(&cond), present(&post)), expected);
    }

    #[test]
    fn for_header_rejects_long_lists() {
        let items = vec![expr_stmt("a"), expr_stmt("b"), expr_stmt("c"), expr_stmt("d")];
        assert!(for_header(items).is_err());
    }

    #[test]
    fn if_header_unwraps_the_condition() {
        let cond = Node::new(NodeKind::Binary {
            op: BinaryOp::Neq,
            x: Node::ident("err").boxed(),
            y: Node::ident("nil").boxed(),
        });
        let wrapped = Node::new(NodeKind::ExprStmt(cond.clone().boxed()));
        let (init, head) = if_header(vec![define("err", Node::ident("e")), wrapped]).expect("header");
        assert!(init.is_some());
        assert_eq!(*head, cond);
    }

    #[test]
    fn if_header_rejects_statements_as_conditions() {
        assert!(if_header(vec![inc("i")]).is_err());
    }

    #[test]
    fn type_switch_guards_rebuild_type_switches() {
        let guard = Node::new(NodeKind::TypeAssert {
            x: Node::ident("v").boxed(),
            ty: None,
        });
        let body = Node::new(NodeKind::BlockStmt {
            stmts: NodeList::empty(ListKind::Stmt),
        })
        .boxed();
        let rebuilt = switch_header(vec![define("t", guard)], body.clone()).expect("header");
        assert!(matches!(rebuilt, NodeKind::TypeSwitchStmt { init: None, .. }));
        let plain = switch_header(vec![expr_stmt("x")], body).expect("header");
        assert!(matches!(plain, NodeKind::SwitchStmt { tag: Some(_), .. }));
    }
}
