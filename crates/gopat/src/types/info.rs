//! Access to semantic facts about a target tree.

use std::collections::{HashMap, HashSet};

use gopat_syntax::{Node, NodeId};

use super::GoType;

/// Semantic facts supplied by a type checker.
///
/// Implementations answer for nodes of the tree being searched; nodes the
/// checker knows nothing about have no type.
pub trait TypeInfo {
    /// Returns the type of expression `node`.
    fn type_of(&self, node: &Node) -> Option<GoType>;

    /// Resolves a type name, such as `error` or `io.Reader`, in the scope of
    /// the searched package.
    fn scope_lookup(&self, name: &str) -> Option<GoType>;

    /// Returns whether `node` denotes an addressable value.
    fn is_addressable(&self, node: &Node) -> bool;
}

/// [`TypeInfo`] backed by precomputed tables.
///
/// Facts are keyed by node identity, so they stay valid for copies of the
/// nodes carried by match results.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<NodeId, GoType>,
    names: HashMap<String, GoType>,
    addressable: HashSet<NodeId>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the type of a node.
    #[must_use]
    pub fn with_type(mut self, id: NodeId, ty: GoType) -> Self {
        self.types.insert(id, ty);
        self
    }

    /// Records a type name visible in scope.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>, ty: GoType) -> Self {
        self.names.insert(name.into(), ty);
        self
    }

    /// Marks a node as addressable.
    #[must_use]
    pub fn with_addressable(mut self, id: NodeId) -> Self {
        self.addressable.insert(id);
        self
    }

    /// Records the type of a node in place.
    pub fn insert_type(&mut self, id: NodeId, ty: GoType) {
        self.types.insert(id, ty);
    }
}

impl TypeInfo for TypeTable {
    fn type_of(&self, node: &Node) -> Option<GoType> {
        self.types.get(&node.id()).cloned()
    }

    fn scope_lookup(&self, name: &str) -> Option<GoType> {
        self.names.get(name).cloned()
    }

    fn is_addressable(&self, node: &Node) -> bool {
        self.addressable.contains(&node.id())
    }
}
