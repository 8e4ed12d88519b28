//! Position repair for spliced replacements.

use gopat_syntax::{Node, NodeKind, Span};

/// Gives every unpositioned node under `node` a zero-width span at the
/// start of `region`.
///
/// A `return` with results then starts where its first result starts.
pub(super) fn repair(node: &mut Node, region: Span) {
    let anchor = region.start_point();
    for slot in node.slots_mut() {
        slot.for_each_node(|child| repair(child, anchor));
    }
    if node.span().is_none() {
        node.set_span(Some(anchor));
    }
    let first_result = match &node.kind {
        NodeKind::ReturnStmt { results } => results.items.first().and_then(Node::span),
        _ => None,
    };
    if let Some(start) = first_result {
        node.set_span(Some(start.start_point()));
    }
}

#[cfg(test)]
mod tests {
    use gopat_syntax::{LineCol, ListKind, NodeList};

    use super::*;

    fn region() -> Span {
        Span::new(10, 20, LineCol::new(2, 1), LineCol::new(2, 11))
    }

    #[test]
    fn unpositioned_nodes_collapse_to_the_region_start() {
        let mut call = Node::new(NodeKind::Call {
            fun: Node::ident("f").boxed(),
            args: NodeList::new(ListKind::Expr, vec![Node::ident("x")]),
            ellipsis: false,
        });
        repair(&mut call, region());
        assert!(call.descendants().all(|node| node.span() == Some(region().start_point())));
    }

    #[test]
    fn positioned_nodes_keep_their_spans() {
        let own = Span::new(3, 4, LineCol::new(0, 3), LineCol::new(0, 4));
        let mut ident = Node::ident("x");
        ident.set_span(Some(own));
        let mut paren = Node::new(NodeKind::Paren(ident.boxed()));
        repair(&mut paren, region());
        assert_eq!(paren.children().first().and_then(|child| child.span()), Some(own));
        assert_eq!(paren.span(), Some(region().start_point()));
    }

    #[test]
    fn returns_start_at_their_first_result() {
        let own = Span::new(14, 17, LineCol::new(2, 5), LineCol::new(2, 8));
        let mut result = Node::ident("err");
        result.set_span(Some(own));
        let mut ret = Node::new(NodeKind::ReturnStmt {
            results: NodeList::new(ListKind::Expr, vec![result]),
        });
        repair(&mut ret, region());
        assert_eq!(ret.span(), Some(own.start_point()));
    }
}
