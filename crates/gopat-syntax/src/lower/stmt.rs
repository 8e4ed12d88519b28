//! Statement lowering.

use std::collections::HashSet;
use std::str::FromStr;

use super::{Lowerer, TsNode};
use crate::node::{AssignOp, BranchKind, ListKind, Node, NodeKind, NodeList};

impl Lowerer<'_> {
    /// Lowers the statements of a `statement_list`, `block` or clause.
    pub(super) fn stmts(&self, ts: TsNode<'_>) -> Vec<Node> {
        self.named(ts)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "statement_list" {
                    self.stmts(child)
                } else {
                    vec![self.stmt(child)]
                }
            })
            .collect()
    }

    /// Lowers one statement.
    pub(super) fn stmt(&self, ts: TsNode<'_>) -> Node {
        match ts.kind() {
            "block" => self.block(ts),
            "expression_statement" => match self.named(ts).first() {
                Some(expr) => self.node(ts, NodeKind::ExprStmt(self.boxed(*expr))),
                None => self.bad(ts),
            },
            "send_statement" => match (self.field(ts, "channel"), self.field(ts, "value")) {
                (Some(chan), Some(value)) => self.node(
                    ts,
                    NodeKind::SendStmt {
                        chan: self.boxed(chan),
                        value: self.boxed(value),
                    },
                ),
                _ => self.bad(ts),
            },
            "inc_statement" | "dec_statement" => match self.named(ts).first() {
                Some(x) => self.node(
                    ts,
                    NodeKind::IncDecStmt {
                        x: self.boxed(*x),
                        inc: ts.kind() == "inc_statement",
                    },
                ),
                None => self.bad(ts),
            },
            "assignment_statement" => self.assignment(ts),
            "short_var_declaration" => self.node(
                ts,
                NodeKind::AssignStmt {
                    lhs: self.exprs_of(self.field(ts, "left")),
                    tok: AssignOp::Define,
                    rhs: self.exprs_of(self.field(ts, "right")),
                },
            ),
            "receive_statement" => self.receive(ts),
            "labeled_statement" => self.labeled(ts),
            "empty_statement" => self.node(ts, NodeKind::EmptyStmt),
            "go_statement" | "defer_statement" => match self.named(ts).first() {
                Some(call) => {
                    let call = self.boxed(*call);
                    let kind = if ts.kind() == "go_statement" {
                        NodeKind::GoStmt(call)
                    } else {
                        NodeKind::DeferStmt(call)
                    };
                    self.node(ts, kind)
                }
                None => self.bad(ts),
            },
            "return_statement" => self.node(
                ts,
                NodeKind::ReturnStmt {
                    results: self.exprs_of(self.named(ts).first().copied()),
                },
            ),
            "break_statement" | "continue_statement" | "goto_statement"
            | "fallthrough_statement" => self.branch(ts),
            "if_statement" => self.if_stmt(ts),
            "for_statement" => self.for_stmt(ts),
            "expression_switch_statement" => self.switch(ts),
            "type_switch_statement" => self.type_switch(ts),
            "select_statement" => {
                let clauses = self.clauses(ts);
                self.node(
                    ts,
                    NodeKind::SelectStmt {
                        body: self.clause_block(ts, clauses).boxed(),
                    },
                )
            }
            "const_declaration" | "var_declaration" | "type_declaration" => {
                self.node(ts, NodeKind::DeclStmt(self.gen_decl(ts).boxed()))
            }
            _ => self.bad(ts),
        }
    }

    fn block(&self, ts: TsNode<'_>) -> Node {
        self.node(
            ts,
            NodeKind::BlockStmt {
                stmts: NodeList::new(ListKind::Stmt, self.stmts(ts)),
            },
        )
    }

    fn assignment(&self, ts: TsNode<'_>) -> Node {
        let tok = self
            .field(ts, "operator")
            .and_then(|op| AssignOp::from_str(op.kind()).ok());
        match tok {
            Some(tok) => self.node(
                ts,
                NodeKind::AssignStmt {
                    lhs: self.exprs_of(self.field(ts, "left")),
                    tok,
                    rhs: self.exprs_of(self.field(ts, "right")),
                },
            ),
            None => self.bad(ts),
        }
    }

    fn receive(&self, ts: TsNode<'_>) -> Node {
        let Some(right) = self.field(ts, "right") else {
            return self.bad(ts);
        };
        match self.field(ts, "left") {
            Some(left) => {
                let tok = if self.has_token(ts, ":=") {
                    AssignOp::Define
                } else {
                    AssignOp::Assign
                };
                self.node(
                    ts,
                    NodeKind::AssignStmt {
                        lhs: self.exprs_of(Some(left)),
                        tok,
                        rhs: self.exprs_of(Some(right)),
                    },
                )
            }
            None => self.node(ts, NodeKind::ExprStmt(self.boxed(right))),
        }
    }

    fn labeled(&self, ts: TsNode<'_>) -> Node {
        let Some(label) = self.field(ts, "label") else {
            return self.bad(ts);
        };
        let stmt = self
            .named(ts)
            .into_iter()
            .find(|child| child.id() != label.id())
            .map_or_else(|| Node::new(NodeKind::EmptyStmt), |child| self.stmt(child));
        self.node(
            ts,
            NodeKind::LabeledStmt {
                label: self.ident(label).boxed(),
                stmt: stmt.boxed(),
            },
        )
    }

    fn branch(&self, ts: TsNode<'_>) -> Node {
        let keyword = ts.kind().trim_end_matches("_statement");
        match BranchKind::from_str(keyword) {
            Ok(kind) => self.node(
                ts,
                NodeKind::BranchStmt {
                    kind,
                    label: self.named(ts).first().map(|label| self.ident(*label).boxed()),
                },
            ),
            Err(_) => self.bad(ts),
        }
    }

    fn if_stmt(&self, ts: TsNode<'_>) -> Node {
        let (Some(cond), Some(body)) = (self.field(ts, "condition"), self.field(ts, "consequence"))
        else {
            return self.bad(ts);
        };
        self.node(
            ts,
            NodeKind::IfStmt {
                init: self.opt_stmt(self.field(ts, "initializer")),
                cond: self.boxed(cond),
                body: self.stmt(body).boxed(),
                els: self.opt_stmt(self.field(ts, "alternative")),
            },
        )
    }

    fn for_stmt(&self, ts: TsNode<'_>) -> Node {
        let Some(body) = self.field(ts, "body") else {
            return self.bad(ts);
        };
        let body = self.stmt(body).boxed();
        let header = self
            .named(ts)
            .into_iter()
            .find(|child| child.kind() != "block");
        match header {
            Some(clause) if clause.kind() == "range_clause" => self.range(ts, clause, body),
            Some(clause) if clause.kind() == "for_clause" => self.node(
                ts,
                NodeKind::ForStmt {
                    init: self.opt_stmt(self.field(clause, "initializer")),
                    cond: self.opt(self.field(clause, "condition")),
                    post: self.opt_stmt(self.field(clause, "update")),
                    body,
                },
            ),
            cond => self.node(
                ts,
                NodeKind::ForStmt {
                    init: None,
                    cond: self.opt(cond),
                    post: None,
                    body,
                },
            ),
        }
    }

    fn range(&self, ts: TsNode<'_>, clause: TsNode<'_>, body: Box<Node>) -> Node {
        let Some(right) = self.field(clause, "right") else {
            return self.bad(ts);
        };
        let mut left = self.exprs_of(self.field(clause, "left")).items.into_iter();
        let key = left.next().map(Node::boxed);
        let value = left.next().map(Node::boxed);
        let tok = key.as_ref().map(|_| {
            if self.has_token(clause, ":=") {
                AssignOp::Define
            } else {
                AssignOp::Assign
            }
        });
        self.node(
            ts,
            NodeKind::RangeStmt {
                key,
                value,
                tok,
                x: self.boxed(right),
                body,
            },
        )
    }

    fn switch(&self, ts: TsNode<'_>) -> Node {
        let clauses = self.clauses(ts);
        self.node(
            ts,
            NodeKind::SwitchStmt {
                init: self.opt_stmt(self.field(ts, "initializer")),
                tag: self.opt(self.field(ts, "value")),
                body: self.clause_block(ts, clauses).boxed(),
            },
        )
    }

    fn type_switch(&self, ts: TsNode<'_>) -> Node {
        let Some(value) = self.field(ts, "value") else {
            return self.bad(ts);
        };
        let assert = Node::new(NodeKind::TypeAssert {
            x: self.boxed(value),
            ty: None,
        });
        let assign = match self.field(ts, "alias") {
            Some(alias) => Node::new(NodeKind::AssignStmt {
                lhs: self.exprs_of(Some(alias)),
                tok: AssignOp::Define,
                rhs: NodeList::new(ListKind::Expr, vec![assert]),
            }),
            None => Node::new(NodeKind::ExprStmt(assert.boxed())),
        };
        let clauses = self.clauses(ts);
        self.node(
            ts,
            NodeKind::TypeSwitchStmt {
                init: self.opt_stmt(self.field(ts, "initializer")),
                assign: assign.boxed(),
                body: self.clause_block(ts, clauses).boxed(),
            },
        )
    }

    fn clause_block(&self, ts: TsNode<'_>, clauses: Vec<Node>) -> Node {
        self.node(
            ts,
            NodeKind::BlockStmt {
                stmts: NodeList::new(ListKind::Stmt, clauses),
            },
        )
    }

    fn clauses(&self, ts: TsNode<'_>) -> Vec<Node> {
        self.named(ts)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "expression_case" => Some(self.case(child, "value")),
                "type_case" => Some(self.case(child, "type")),
                "default_case" => Some(self.case(child, "value")),
                "communication_case" => Some(self.comm(child)),
                _ => None,
            })
            .collect()
    }

    fn case(&self, ts: TsNode<'_>, field: &str) -> Node {
        let heads = self.fields(ts, field);
        let list = match heads.as_slice() {
            [single] => self.exprs_of(Some(*single)),
            _ => self.expr_list(&heads),
        };
        self.node(
            ts,
            NodeKind::CaseClause {
                list,
                body: NodeList::new(ListKind::Stmt, self.clause_body(ts, &heads)),
            },
        )
    }

    fn comm(&self, ts: TsNode<'_>) -> Node {
        let comm = self.field(ts, "communication");
        let heads: Vec<TsNode<'_>> = comm.into_iter().collect();
        self.node(
            ts,
            NodeKind::CommClause {
                comm: self.opt_stmt(comm),
                body: NodeList::new(ListKind::Stmt, self.clause_body(ts, &heads)),
            },
        )
    }

    fn clause_body(&self, ts: TsNode<'_>, heads: &[TsNode<'_>]) -> Vec<Node> {
        let skip: HashSet<usize> = heads.iter().map(TsNode::id).collect();
        self.named(ts)
            .into_iter()
            .filter(|child| !skip.contains(&child.id()))
            .flat_map(|child| {
                if child.kind() == "statement_list" {
                    self.stmts(child)
                } else {
                    vec![self.stmt(child)]
                }
            })
            .collect()
    }
}
