//! Binding environments and owned match results.
//!
//! While a search runs, bindings borrow the target tree so that branching
//! only copies a map of references. Results clone what they bound so they
//! outlive later mutation of the tree.

use std::collections::BTreeMap;
use std::rc::Rc;

use gopat_syntax::{Fragment, ListKind, Node, NodeId, NodeList, Span};

/// A binding held during a search.
#[derive(Debug, Clone)]
pub(crate) enum Bound<'a> {
    /// One node of the target tree.
    Node(&'a Node),
    /// A contiguous run of list elements of the target tree.
    Slice(ListKind, &'a [Node]),
    /// A list built during matching, such as an `if` header.
    Synthetic(Rc<NodeList>),
}

impl Bound<'_> {
    /// Returns the bound elements; a single node is a one-element run.
    pub(crate) fn items(&self) -> &[Node] {
        match self {
            Self::Node(node) => std::slice::from_ref(*node),
            Self::Slice(_, items) => items,
            Self::Synthetic(list) => &list.items,
        }
    }

    /// Clones the binding into an owned fragment.
    pub(crate) fn to_fragment(&self) -> Fragment {
        match self {
            Self::Node(node) => Fragment::Node((*node).clone()),
            Self::Slice(kind, items) => Fragment::List(NodeList::new(*kind, items.to_vec())),
            Self::Synthetic(list) => Fragment::List(list.as_ref().clone()),
        }
    }
}

/// Bindings keyed by metavariable name.
pub(crate) type Env<'a> = BTreeMap<&'a str, Bound<'a>>;

/// Borrows owned captures as a starting environment.
pub(crate) fn env_from_captures(captures: &BTreeMap<String, Fragment>) -> Env<'_> {
    captures
        .iter()
        .map(|(name, fragment)| {
            let bound = match fragment {
                Fragment::Node(node) => Bound::Node(node),
                Fragment::List(list) => Bound::Slice(list.kind, &list.items),
            };
            (name.as_str(), bound)
        })
        .collect()
}

/// Clones every binding of `env` into owned captures.
pub(crate) fn captures_from_env(env: &Env<'_>) -> BTreeMap<String, Fragment> {
    env.iter()
        .map(|(name, bound)| ((*name).to_owned(), bound.to_fragment()))
        .collect()
}

/// Where a match sits in the target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTarget {
    /// A single node.
    Node(NodeId),
    /// `len` consecutive elements of a list, starting at `first`.
    List {
        /// Identity of the first matched element.
        first: NodeId,
        /// Number of matched elements.
        len: usize,
    },
}

impl MatchTarget {
    /// Returns the identity of the first node covered by the target.
    #[must_use]
    pub const fn first(&self) -> NodeId {
        match self {
            Self::Node(id) | Self::List { first: id, .. } => *id,
        }
    }

    /// Returns the number of nodes covered by the target.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Node(_) => 1,
            Self::List { len, .. } => *len,
        }
    }

    /// Returns whether the target covers no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One match of a pattern, owning its data.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    target: MatchTarget,
    matched: Fragment,
    captures: BTreeMap<String, Fragment>,
}

impl MatchResult {
    pub(crate) const fn new(
        target: MatchTarget,
        matched: Fragment,
        captures: BTreeMap<String, Fragment>,
    ) -> Self {
        Self {
            target,
            matched,
            captures,
        }
    }

    /// Returns where the match sits in the tree it was found in.
    #[must_use]
    pub const fn target(&self) -> MatchTarget {
        self.target
    }

    /// Returns a copy of the matched node or list.
    #[must_use]
    pub const fn matched(&self) -> &Fragment {
        &self.matched
    }

    /// Returns the capture bound to `name`.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&Fragment> {
        self.captures.get(name)
    }

    /// Returns every capture.
    #[must_use]
    pub const fn captures(&self) -> &BTreeMap<String, Fragment> {
        &self.captures
    }

    /// Returns the source span of the match, if it has one.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        self.matched.span()
    }

    pub(crate) fn with_target(mut self, target: MatchTarget, matched: Fragment) -> Self {
        self.target = target;
        self.matched = matched;
        self
    }
}
