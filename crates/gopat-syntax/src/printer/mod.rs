//! Go source printing for [`Node`] trees.
//!
//! Output follows gofmt layout closely enough for rewritten code to read
//! naturally: tab indentation, one statement per line, and binary operands
//! parenthesised only where precedence requires it. Comments are not
//! preserved because the node model does not carry them.

mod expr;
mod stmt;

use crate::node::{Fragment, ListKind, Node, NodeList};

/// Prints a node as Go source.
#[must_use]
pub fn print_node(node: &Node) -> String {
    let mut printer = Printer::default();
    printer.node(node);
    printer.finish()
}

/// Prints a fragment as Go source.
///
/// Statement and declaration lists print one element per line; other lists
/// are comma separated.
#[must_use]
pub fn print_fragment(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Node(node) => print_node(node),
        Fragment::List(list) => print_list(list),
    }
}

/// Prints a list as Go source.
#[must_use]
pub fn print_list(list: &NodeList) -> String {
    let mut printer = Printer::default();
    match list.kind {
        ListKind::Stmt => printer.lines(&list.items, "\n"),
        ListKind::Decl => printer.lines(&list.items, "\n\n"),
        ListKind::Spec => printer.lines(&list.items, "\n"),
        ListKind::Expr | ListKind::Ident | ListKind::Field => printer.commas(&list.items),
    }
    printer.finish()
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn finish(self) -> String {
        self.out
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }

    /// Dispatches on whether `node` is a statement, declaration or expression.
    fn node(&mut self, node: &Node) {
        if node.is_stmt() {
            self.stmt(node);
        } else if node.is_expr() {
            self.expr(node);
        } else {
            self.decl(node);
        }
    }

    fn lines(&mut self, items: &[Node], separator: &str) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.text(separator);
            }
            self.node(item);
        }
    }

    fn commas(&mut self, items: &[Node]) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.text(", ");
            }
            self.node(item);
        }
    }
}
