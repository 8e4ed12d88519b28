//! Lowering from the Tree-sitter Go concrete syntax tree to [`Node`]s.
//!
//! Lowering is total: grammar shapes without a counterpart become
//! [`NodeKind::Bad`] nodes carrying their source text, so callers can reject
//! them explicitly. Comments are dropped.

mod decl;
mod expr;
mod stmt;

use tracing::trace;

use crate::node::{ListKind, Node, NodeKind, NodeList};
use crate::span::Span;

type TsNode<'t> = tree_sitter::Node<'t>;

/// Lowers a `source_file` root into a [`NodeKind::File`].
///
/// Top-level statements, which the grammar tolerates but Go does not, are
/// kept in the declaration list so shape checks can see them.
pub(crate) fn lower_file(root: TsNode<'_>, source: &str) -> Node {
    Lowerer { source }.file(root)
}

pub(crate) struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    fn file(&self, root: TsNode<'_>) -> Node {
        let mut package = None;
        let mut decls = Vec::new();
        for child in self.named(root) {
            match child.kind() {
                "package_clause" => {
                    package = self
                        .named(child)
                        .first()
                        .map(|name| self.ident(*name));
                }
                _ => decls.extend(self.top_level(child)),
            }
        }
        let package = package.unwrap_or_else(|| Node::ident(""));
        self.node(
            root,
            NodeKind::File {
                package: package.boxed(),
                decls: NodeList::new(ListKind::Decl, decls),
            },
        )
    }

    fn top_level(&self, node: TsNode<'_>) -> Vec<Node> {
        match node.kind() {
            "function_declaration" | "method_declaration" => vec![self.func_decl(node)],
            "import_declaration" | "const_declaration" | "var_declaration"
            | "type_declaration" => vec![self.gen_decl(node)],
            "statement_list" => self.stmts(node),
            _ => vec![self.stmt(node)],
        }
    }

    /// Builds a node with the span of `ts`.
    fn node(&self, ts: TsNode<'_>, kind: NodeKind) -> Node {
        Node::with_span(kind, Span::from_ts(ts))
    }

    fn respan(&self, mut node: Node, ts: TsNode<'_>) -> Node {
        node.set_span(Some(Span::from_ts(ts)));
        node
    }

    fn text(&self, ts: TsNode<'_>) -> &'s str {
        self.source.get(ts.byte_range()).unwrap_or_default()
    }

    fn bad(&self, ts: TsNode<'_>) -> Node {
        trace!(kind = ts.kind(), "lowering unsupported node as bad");
        self.node(ts, NodeKind::Bad(self.text(ts).to_owned()))
    }

    fn ident(&self, ts: TsNode<'_>) -> Node {
        self.node(ts, NodeKind::Ident(self.text(ts).to_owned()))
    }

    /// Named children without comments.
    fn named<'t>(&self, ts: TsNode<'t>) -> Vec<TsNode<'t>> {
        let mut cursor = ts.walk();
        ts.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn field<'t>(&self, ts: TsNode<'t>, name: &str) -> Option<TsNode<'t>> {
        ts.child_by_field_name(name)
    }

    fn fields<'t>(&self, ts: TsNode<'t>, name: &str) -> Vec<TsNode<'t>> {
        let mut cursor = ts.walk();
        ts.children_by_field_name(name, &mut cursor).collect()
    }

    /// Returns whether `ts` has an anonymous child spelled `token`.
    fn has_token(&self, ts: TsNode<'_>, token: &str) -> bool {
        let mut cursor = ts.walk();
        let found = ts
            .children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token);
        found
    }

    /// Spelling of the first anonymous child accepted by `accept`.
    fn token<'t>(&self, ts: TsNode<'t>, accept: impl Fn(&str) -> bool) -> Option<&'t str> {
        let mut cursor = ts.walk();
        let found = ts
            .children(&mut cursor)
            .filter(|child| !child.is_named())
            .map(|child| child.kind())
            .find(|kind| accept(kind));
        found
    }

    fn boxed(&self, ts: TsNode<'_>) -> Box<Node> {
        self.expr(ts).boxed()
    }

    fn opt(&self, ts: Option<TsNode<'_>>) -> Option<Box<Node>> {
        ts.map(|child| self.boxed(child))
    }

    fn opt_stmt(&self, ts: Option<TsNode<'_>>) -> Option<Box<Node>> {
        ts.map(|child| self.stmt(child).boxed())
    }
}
