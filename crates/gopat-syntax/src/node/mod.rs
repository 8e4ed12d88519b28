//! Closed node model for Go syntax trees.
//!
//! A [`Node`] owns its children. Identity is carried by a [`NodeId`] so that
//! side tables (for example a parent index) can refer to nodes without
//! back-pointers. Equality between nodes is structural: ids and spans are
//! ignored.

mod kind;
mod slots;
mod token;

use std::sync::atomic::{AtomicU32, Ordering};

pub use kind::NodeKind;
pub use slots::{Slot, SlotMut};
pub use token::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKind, LitKind, UnaryOp};

use crate::span::Span;

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Allocates a fresh identity.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A Go syntax node.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    span: Option<Span>,
    /// Variant payload.
    pub kind: NodeKind,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Node {
    /// Creates a node with a fresh identity and no position.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::fresh(),
            span: None,
            kind,
        }
    }

    /// Creates a node with a fresh identity at `span`.
    #[must_use]
    pub fn with_span(kind: NodeKind, span: Span) -> Self {
        Self {
            id: NodeId::fresh(),
            span: Some(span),
            kind,
        }
    }

    /// Creates an identifier node.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Ident(name.into()))
    }

    /// Wraps `self` in a boxed child slot.
    #[must_use]
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Returns the node's identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the source span, or `None` when the position is invalid.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.span
    }

    /// Sets or clears the source span.
    pub const fn set_span(&mut self, span: Option<Span>) {
        self.span = span;
    }

    /// Returns the identifier name if this node is an identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Returns whether this node is a statement.
    #[must_use]
    pub const fn is_stmt(&self) -> bool {
        self.kind.is_stmt()
    }

    /// Returns whether this node is an expression or type expression.
    #[must_use]
    pub const fn is_expr(&self) -> bool {
        self.kind.is_expr()
    }

    /// Marks every position in the subtree as invalid.
    pub fn clear_spans(&mut self) {
        self.span = None;
        for slot in self.slots_mut() {
            slot.for_each_node(Self::clear_spans);
        }
    }

    /// Returns a copy of the subtree with fresh identities throughout.
    #[must_use]
    pub fn renumbered(&self) -> Self {
        let mut copy = self.clone();
        copy.renumber();
        copy
    }

    fn renumber(&mut self) {
        self.id = NodeId::fresh();
        for slot in self.slots_mut() {
            slot.for_each_node(Self::renumber);
        }
    }

    /// Finds the node with identity `id` in this subtree.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.slots()
            .into_iter()
            .flat_map(Slot::into_nodes)
            .find_map(|child| child.find(id))
    }

    /// Finds the node with identity `id` in this subtree, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        for slot in self.slots_mut() {
            for child in slot.into_nodes() {
                if let Some(found) = child.find_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Iterates over the subtree in pre-order, starting with `self`.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Returns the direct children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        self.slots().into_iter().flat_map(Slot::into_nodes).collect()
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

/// Element kind of a [`NodeList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Expressions: arguments, results, literal elements.
    Expr,
    /// Identifiers: declared names.
    Ident,
    /// Statements: block and clause bodies.
    Stmt,
    /// Import, value and type specs.
    Spec,
    /// Parameters, results, struct fields, interface elements.
    Field,
    /// Top-level declarations.
    Decl,
}

/// An ordered list of nodes of one kind.
#[derive(Debug, Clone)]
pub struct NodeList {
    /// Element kind.
    pub kind: ListKind,
    /// Elements in source order.
    pub items: Vec<Node>,
}

impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl NodeList {
    /// Creates a list of `kind` from `items`.
    #[must_use]
    pub const fn new(kind: ListKind, items: Vec<Node>) -> Self {
        Self { kind, items }
    }

    /// Creates an empty list of `kind`.
    #[must_use]
    pub const fn empty(kind: ListKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the list has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the span covering every positioned element.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        span_of(&self.items)
    }
}

/// Returns the span covering every positioned node in `nodes`.
#[must_use]
pub fn span_of(nodes: &[Node]) -> Option<Span> {
    nodes
        .iter()
        .filter_map(Node::span)
        .reduce(|acc, span| acc.cover(&span))
}

/// A parsed fragment: one node, or a list of nodes.
///
/// Patterns such as `a, b` or `x := 1; return x` compile to lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A single node.
    Node(Node),
    /// A list of nodes.
    List(NodeList),
}

impl Fragment {
    /// Returns the single node, if this fragment is one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::List(_) => None,
        }
    }

    /// Returns the list, if this fragment is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&NodeList> {
        match self {
            Self::List(list) => Some(list),
            Self::Node(_) => None,
        }
    }

    /// Returns the span covered by the fragment.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Node(node) => node.span(),
            Self::List(list) => list.span(),
        }
    }

    /// Marks every position in the fragment as invalid.
    pub fn clear_spans(&mut self) {
        match self {
            Self::Node(node) => node.clear_spans(),
            Self::List(list) => list.items.iter_mut().for_each(Node::clear_spans),
        }
    }
}
