//! Parent links for a target tree.
//!
//! The table maps every node identity to the node holding it and the slot it
//! occupies there, so matches reported by identity can be located again for
//! splicing and ancestor navigation.

use std::collections::HashMap;

use gopat_syntax::{Node, NodeId, Slot};

/// Where a child sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Slot index, in the order of [`Node::slots`].
    pub slot: usize,
    /// Position inside the slot when the slot is a list.
    pub index: Option<usize>,
}

/// The parent of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentLink {
    /// Identity of the parent node.
    pub parent: NodeId,
    /// Slot of the child within the parent.
    pub slot: SlotRef,
}

/// Maps node identities to their parents.
#[derive(Debug, Clone, Default)]
pub struct ParentTable {
    root: Option<NodeId>,
    links: HashMap<NodeId, ParentLink>,
}

impl ParentTable {
    /// Records the parent of every node under `tree`.
    #[must_use]
    pub fn build(tree: &Node) -> Self {
        let mut links = HashMap::new();
        let mut stack = vec![tree];
        while let Some(node) = stack.pop() {
            for (slot, children) in node.slots().into_iter().enumerate() {
                let indexed = matches!(children, Slot::List(_));
                for (position, child) in children.into_nodes().into_iter().enumerate() {
                    let link = ParentLink {
                        parent: node.id(),
                        slot: SlotRef {
                            slot,
                            index: indexed.then_some(position),
                        },
                    };
                    links.insert(child.id(), link);
                    stack.push(child);
                }
            }
        }
        Self {
            root: Some(tree.id()),
            links,
        }
    }

    /// Returns the identity of the tree root.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the parent link of `id`; the root has none.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<ParentLink> {
        self.links.get(&id).copied()
    }

    /// Returns whether `id` is part of the tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.root == Some(id) || self.links.contains_key(&id)
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id).map(|link| link.parent), |current| {
            self.parent(*current).map(|link| link.parent)
        })
    }

    /// Returns how many nodes have a recorded parent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns whether only the root is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use gopat_syntax::{NodeKind, parse_file};

    use super::*;

    fn tree() -> Node {
        let (file, _) = parse_file("package p\n\nfunc f() {\n\ta()\n\tb()\n}\n").expect("parse");
        file
    }

    fn call(tree: &Node, name: &str) -> NodeId {
        tree.descendants()
            .find(|node| match &node.kind {
                NodeKind::Call { fun, .. } => fun.as_ident() == Some(name),
                _ => false,
            })
            .map(Node::id)
            .expect("call")
    }

    #[test]
    fn every_descendant_has_a_parent() {
        let file = tree();
        let table = ParentTable::build(&file);
        assert_eq!(table.len(), file.descendants().count() - 1);
        assert_eq!(table.root(), Some(file.id()));
        assert!(table.parent(file.id()).is_none());
    }

    #[test]
    fn list_elements_record_their_position() {
        let file = tree();
        let table = ParentTable::build(&file);
        let statement = table.parent(call(&file, "b")).expect("expression statement");
        let link = table.parent(statement.parent).expect("block link");
        assert_eq!(link.slot, SlotRef { slot: 0, index: Some(1) });
    }

    #[test]
    fn ancestors_end_at_the_root() {
        let file = tree();
        let table = ParentTable::build(&file);
        let ancestors: Vec<_> = table.ancestors(call(&file, "a")).collect();
        assert_eq!(ancestors.last(), Some(&file.id()));
        assert_eq!(ancestors.len(), 4);
    }
}
