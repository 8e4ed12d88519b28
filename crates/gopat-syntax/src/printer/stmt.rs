//! Statement and declaration printing.

use super::Printer;
use crate::node::{Node, NodeKind, NodeList};

impl Printer {
    pub(super) fn stmt(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::DeclStmt(decl) => self.decl(decl),
            NodeKind::EmptyStmt => {}
            NodeKind::LabeledStmt { label, stmt } => {
                self.expr(label);
                self.text(":");
                self.newline();
                self.stmt(stmt);
            }
            NodeKind::ExprStmt(x) => self.expr(x),
            NodeKind::SendStmt { chan, value } => {
                self.expr(chan);
                self.text(" <- ");
                self.expr(value);
            }
            NodeKind::IncDecStmt { x, inc } => {
                self.expr(x);
                self.text(if *inc { "++" } else { "--" });
            }
            NodeKind::AssignStmt { lhs, tok, rhs } => {
                self.commas(&lhs.items);
                self.text(" ");
                self.text(&tok.to_string());
                self.text(" ");
                self.commas(&rhs.items);
            }
            NodeKind::GoStmt(call) => {
                self.text("go ");
                self.expr(call);
            }
            NodeKind::DeferStmt(call) => {
                self.text("defer ");
                self.expr(call);
            }
            NodeKind::ReturnStmt { results } => {
                self.text("return");
                if !results.is_empty() {
                    self.text(" ");
                    self.commas(&results.items);
                }
            }
            NodeKind::BranchStmt { kind, label } => {
                self.text(&kind.to_string());
                if let Some(label) = label {
                    self.text(" ");
                    self.expr(label);
                }
            }
            NodeKind::BlockStmt { stmts } => self.block(stmts),
            NodeKind::IfStmt {
                init,
                cond,
                body,
                els,
            } => {
                self.text("if ");
                self.header_init(init.as_deref());
                self.expr(cond);
                self.text(" ");
                self.stmt(body);
                if let Some(els) = els {
                    self.text(" else ");
                    self.stmt(els);
                }
            }
            NodeKind::CaseClause { list, body } => {
                if list.is_empty() {
                    self.text("default:");
                } else {
                    self.text("case ");
                    self.commas(&list.items);
                    self.text(":");
                }
                self.clause_body(body);
            }
            NodeKind::CommClause { comm, body } => {
                match comm {
                    Some(comm) => {
                        self.text("case ");
                        self.stmt(comm);
                        self.text(":");
                    }
                    None => self.text("default:"),
                }
                self.clause_body(body);
            }
            NodeKind::SwitchStmt { init, tag, body } => {
                self.text("switch ");
                self.header_init(init.as_deref());
                if let Some(tag) = tag {
                    self.expr(tag);
                    self.text(" ");
                }
                self.clauses(body);
            }
            NodeKind::TypeSwitchStmt { init, assign, body } => {
                self.text("switch ");
                self.header_init(init.as_deref());
                self.stmt(assign);
                self.text(" ");
                self.clauses(body);
            }
            NodeKind::SelectStmt { body } => {
                self.text("select ");
                self.clauses(body);
            }
            NodeKind::ForStmt {
                init,
                cond,
                post,
                body,
            } => {
                self.text("for ");
                if init.is_some() || post.is_some() {
                    if let Some(init) = init {
                        self.stmt(init);
                    }
                    self.text("; ");
                    if let Some(cond) = cond {
                        self.expr(cond);
                    }
                    self.text("; ");
                    if let Some(post) = post {
                        self.stmt(post);
                    }
                    self.text(" ");
                } else if let Some(cond) = cond {
                    self.expr(cond);
                    self.text(" ");
                }
                self.stmt(body);
            }
            NodeKind::RangeStmt {
                key,
                value,
                tok,
                x,
                body,
            } => {
                self.text("for ");
                if let Some(key) = key {
                    self.expr(key);
                    if let Some(value) = value {
                        self.text(", ");
                        self.expr(value);
                    }
                    self.text(" ");
                    self.text(&tok.map_or_else(|| ":=".to_owned(), |tok| tok.to_string()));
                    self.text(" ");
                }
                self.text("range ");
                self.expr(x);
                self.text(" ");
                self.stmt(body);
            }
            _ => self.expr_or_decl(node),
        }
    }

    fn expr_or_decl(&mut self, node: &Node) {
        if node.is_expr() {
            self.expr(node);
        } else {
            self.decl(node);
        }
    }

    fn header_init(&mut self, init: Option<&Node>) {
        if let Some(init) = init {
            self.stmt(init);
            self.text("; ");
        }
    }

    fn block(&mut self, stmts: &NodeList) {
        if stmts.is_empty() {
            self.text("{}");
            return;
        }
        self.text("{");
        self.depth += 1;
        for stmt in &stmts.items {
            self.newline();
            self.stmt(stmt);
        }
        self.depth -= 1;
        self.newline();
        self.text("}");
    }

    /// Prints a switch or select body; clauses align with the keyword.
    fn clauses(&mut self, body: &Node) {
        let NodeKind::BlockStmt { stmts } = &body.kind else {
            self.stmt(body);
            return;
        };
        self.text("{");
        for clause in &stmts.items {
            self.newline();
            self.stmt(clause);
        }
        self.newline();
        self.text("}");
    }

    fn clause_body(&mut self, body: &NodeList) {
        self.depth += 1;
        for stmt in &body.items {
            self.newline();
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    pub(super) fn decl(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::GenDecl {
                kind,
                specs,
                grouped,
            } => {
                self.text(&kind.to_string());
                match specs.items.as_slice() {
                    [spec] if !grouped => {
                        self.text(" ");
                        self.decl(spec);
                    }
                    _ => {
                        self.text(" (");
                        self.depth += 1;
                        for spec in &specs.items {
                            self.newline();
                            self.decl(spec);
                        }
                        self.depth -= 1;
                        self.newline();
                        self.text(")");
                    }
                }
            }
            NodeKind::ImportSpec { name, path } => {
                if let Some(name) = name {
                    self.expr(name);
                    self.text(" ");
                }
                self.expr(path);
            }
            NodeKind::ValueSpec { names, ty, values } => {
                self.commas(&names.items);
                if let Some(ty) = ty {
                    self.text(" ");
                    self.expr(ty);
                }
                if !values.is_empty() {
                    self.text(" = ");
                    self.commas(&values.items);
                }
            }
            NodeKind::TypeSpec {
                name,
                type_params,
                alias,
                ty,
            } => {
                self.expr(name);
                if !type_params.is_empty() {
                    self.text("[");
                    self.commas(&type_params.items);
                    self.text("]");
                }
                self.text(if *alias { " = " } else { " " });
                self.expr(ty);
            }
            NodeKind::FuncDecl {
                recv,
                name,
                ty,
                body,
            } => {
                self.text("func ");
                if !recv.is_empty() {
                    self.text("(");
                    self.commas(&recv.items);
                    self.text(") ");
                }
                self.expr(name);
                self.signature(ty);
                if let Some(body) = body {
                    self.text(" ");
                    self.stmt(body);
                }
            }
            NodeKind::File { package, decls } => {
                self.text("package ");
                self.expr(package);
                for decl in &decls.items {
                    self.text("\n\n");
                    self.node(decl);
                }
                self.text("\n");
            }
            NodeKind::Field { .. } => self.field(node),
            _ => self.expr(node),
        }
    }
}
