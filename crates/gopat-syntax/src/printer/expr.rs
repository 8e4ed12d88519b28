//! Expression and type printing.

use super::Printer;
use crate::node::{Node, NodeKind, NodeList};

/// Precedence above every binary operator; operands at this level never
/// need parentheses.
const UNARY_PRECEDENCE: u8 = 6;

impl Printer {
    pub(super) fn expr(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Ident(name) => self.text(name),
            NodeKind::BasicLit { value, .. } => self.text(value),
            NodeKind::Bad(text) => self.text(text),
            NodeKind::CompositeLit { ty, elts } => {
                if let Some(ty) = ty {
                    self.expr(ty);
                }
                self.text("{");
                self.commas(&elts.items);
                self.text("}");
            }
            NodeKind::FuncLit { ty, body } => {
                self.text("func");
                self.signature(ty);
                self.text(" ");
                self.stmt(body);
            }
            NodeKind::Paren(x) => {
                self.text("(");
                self.expr(x);
                self.text(")");
            }
            NodeKind::Selector { x, sel } => {
                self.operand(x);
                self.text(".");
                self.expr(sel);
            }
            NodeKind::Index { x, index } => {
                self.operand(x);
                self.text("[");
                self.expr(index);
                self.text("]");
            }
            NodeKind::IndexList { x, indices } => {
                self.operand(x);
                self.text("[");
                self.commas(&indices.items);
                self.text("]");
            }
            NodeKind::Slice {
                x,
                low,
                high,
                max,
                slice3,
            } => {
                self.operand(x);
                self.text("[");
                self.opt_expr(low.as_deref());
                self.text(":");
                self.opt_expr(high.as_deref());
                if *slice3 {
                    self.text(":");
                    self.opt_expr(max.as_deref());
                }
                self.text("]");
            }
            NodeKind::TypeAssert { x, ty } => {
                self.operand(x);
                self.text(".(");
                match ty {
                    Some(ty) => self.expr(ty),
                    None => self.text("type"),
                }
                self.text(")");
            }
            NodeKind::Call {
                fun,
                args,
                ellipsis,
            } => {
                self.operand(fun);
                self.text("(");
                self.commas(&args.items);
                if *ellipsis {
                    self.text("...");
                }
                self.text(")");
            }
            NodeKind::Star(x) => {
                self.text("*");
                self.prefix_operand(x);
            }
            NodeKind::Unary { op, x } => {
                self.text(&op.to_string());
                self.prefix_operand(x);
            }
            NodeKind::Binary { op, x, y } => {
                let prec = op.precedence();
                self.binary_operand(x, prec, false);
                self.text(" ");
                self.text(&op.to_string());
                self.text(" ");
                self.binary_operand(y, prec, true);
            }
            NodeKind::KeyValue { key, value } => {
                self.expr(key);
                self.text(": ");
                self.expr(value);
            }
            NodeKind::Ellipsis(elt) => {
                self.text("...");
                self.opt_expr(elt.as_deref());
            }
            NodeKind::ArrayType { len, elt } => {
                self.text("[");
                self.opt_expr(len.as_deref());
                self.text("]");
                self.expr(elt);
            }
            NodeKind::StructType { fields } => {
                self.text("struct");
                self.member_block(fields, false);
            }
            NodeKind::FuncType { .. } => {
                self.text("func");
                self.signature(node);
            }
            NodeKind::InterfaceType { methods } => {
                self.text("interface");
                self.member_block(methods, true);
            }
            NodeKind::MapType { key, value } => {
                self.text("map[");
                self.expr(key);
                self.text("]");
                self.expr(value);
            }
            NodeKind::ChanType { dir, value } => {
                self.text(&dir.to_string());
                self.text(" ");
                self.expr(value);
            }
            NodeKind::Field { .. } => self.field(node),
            _ => self.stmt(node),
        }
    }

    fn opt_expr(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.expr(node);
        }
    }

    /// Prints the operand of a selector, index, slice, assertion or call.
    fn operand(&mut self, node: &Node) {
        let needs_parens = matches!(
            node.kind,
            NodeKind::Binary { .. }
                | NodeKind::Unary { .. }
                | NodeKind::Star(_)
                | NodeKind::FuncType { .. }
                | NodeKind::ChanType { .. }
        );
        self.wrapped(node, needs_parens);
    }

    /// Prints the operand of a prefix operator.
    fn prefix_operand(&mut self, node: &Node) {
        let needs_parens = matches!(node.kind, NodeKind::Binary { .. });
        self.wrapped(node, needs_parens);
    }

    fn binary_operand(&mut self, node: &Node, parent: u8, right: bool) {
        let prec = match &node.kind {
            NodeKind::Binary { op, .. } => op.precedence(),
            _ => UNARY_PRECEDENCE,
        };
        let needs_parens = prec < parent || (right && prec == parent);
        self.wrapped(node, needs_parens);
    }

    fn wrapped(&mut self, node: &Node, parens: bool) {
        if parens {
            self.text("(");
            self.expr(node);
            self.text(")");
        } else {
            self.expr(node);
        }
    }

    /// Prints the type parameters, parameters and results of a function type.
    pub(super) fn signature(&mut self, ty: &Node) {
        let NodeKind::FuncType {
            type_params,
            params,
            results,
        } = &ty.kind
        else {
            self.expr(ty);
            return;
        };
        if !type_params.is_empty() {
            self.text("[");
            self.commas(&type_params.items);
            self.text("]");
        }
        self.text("(");
        self.commas(&params.items);
        self.text(")");
        match results.items.as_slice() {
            [] => {}
            [single] if is_unnamed(single) => {
                self.text(" ");
                self.field(single);
            }
            _ => {
                self.text(" (");
                self.commas(&results.items);
                self.text(")");
            }
        }
    }

    pub(super) fn field(&mut self, node: &Node) {
        let NodeKind::Field { names, ty, tag } = &node.kind else {
            self.expr(node);
            return;
        };
        self.commas(&names.items);
        if let Some(ty) = ty {
            if !names.is_empty() {
                self.text(" ");
            }
            self.expr(ty);
        }
        if let Some(tag) = tag {
            self.text(" ");
            self.expr(tag);
        }
    }

    fn member_block(&mut self, members: &NodeList, interface: bool) {
        if members.is_empty() {
            self.text("{}");
            return;
        }
        self.text(" {");
        self.depth += 1;
        for member in &members.items {
            self.newline();
            match &member.kind {
                NodeKind::Field {
                    names,
                    ty: Some(ty),
                    ..
                } if interface && matches!(ty.kind, NodeKind::FuncType { .. }) => {
                    self.commas(&names.items);
                    self.signature(ty);
                }
                _ => self.field(member),
            }
        }
        self.depth -= 1;
        self.newline();
        self.text("}");
    }
}

fn is_unnamed(field: &Node) -> bool {
    matches!(&field.kind, NodeKind::Field { names, .. } if names.is_empty())
}
