//! Splicing replacements into a target tree.

use gopat_syntax::{Fragment, Node, NodeKind, NodeList, SlotMut, Span, span_of};

use super::fill::{to_expression, to_field, to_list_element, to_statement};
use super::positions::repair;
use crate::error::RewriteError;
use crate::matcher::MatchTarget;
use crate::parents::ParentTable;

/// Replaces `target` in `tree` with `replacement`.
///
/// `table` must describe `tree` as it is now. Unpositioned replacement nodes
/// take a zero-width span at the start of the replaced region.
///
/// # Errors
///
/// Returns [`RewriteError::StaleTarget`] when the target is no longer in the
/// tree, [`RewriteError::ParentSlotNotFound`] when its slot cannot be
/// located, and [`RewriteError::IncompatibleReplacement`] when the
/// replacement cannot occupy the slot.
pub fn splice(
    tree: &mut Node,
    table: &ParentTable,
    target: MatchTarget,
    replacement: Fragment,
) -> Result<(), RewriteError> {
    let first = target.first();
    if !table.contains(first) {
        return Err(RewriteError::stale(first));
    }
    if table.root() == Some(first) {
        let region = tree.span();
        let mut node = single(replacement)?.ok_or_else(empty_root)?;
        if let Some(span) = region {
            repair(&mut node, span);
        }
        *tree = node;
        return Ok(());
    }

    let link = table
        .parent(first)
        .ok_or_else(|| RewriteError::parent_slot_not_found(first))?;
    let parent = tree
        .find_mut(link.parent)
        .ok_or_else(|| RewriteError::stale(link.parent))?;
    let slot = parent
        .slots_mut()
        .into_iter()
        .nth(link.slot.slot)
        .ok_or_else(|| RewriteError::parent_slot_not_found(first))?;

    match (slot, link.slot.index) {
        (SlotMut::List(list), Some(index)) => splice_list(list, index, target, replacement),
        (SlotMut::One(child), None) => {
            let region = child.span();
            let mut node = single(replacement)?
                .ok_or_else(|| RewriteError::incompatible(child.kind.name(), "empty list"))?;
            if let Some(span) = region {
                repair(&mut node, span);
            }
            **child = fit(node, child)?;
            Ok(())
        }
        (SlotMut::Opt(child), None) => {
            let Some(present) = child.as_deref() else {
                return Err(RewriteError::stale(first));
            };
            let region = present.span();
            let fitted = match single(replacement)? {
                Some(mut node) => {
                    if let Some(span) = region {
                        repair(&mut node, span);
                    }
                    Some(fit(node, present)?.boxed())
                }
                None => None,
            };
            *child = fitted;
            Ok(())
        }
        _ => Err(RewriteError::parent_slot_not_found(first)),
    }
}

fn splice_list(
    list: &mut NodeList,
    index: usize,
    target: MatchTarget,
    replacement: Fragment,
) -> Result<(), RewriteError> {
    let range = index..index + target.len();
    let replaced = list
        .items
        .get(range.clone())
        .ok_or_else(|| RewriteError::stale(target.first()))?;
    if replaced.first().map(Node::id) != Some(target.first()) {
        return Err(RewriteError::stale(target.first()));
    }
    let region: Option<Span> = span_of(replaced);
    let mut items = match replacement {
        Fragment::Node(node) => vec![node],
        Fragment::List(found) => found.items,
    };
    if let Some(span) = region {
        for item in &mut items {
            repair(item, span);
        }
    }
    let fitted = items
        .into_iter()
        .map(|item| to_list_element(item, list.kind))
        .collect::<Result<Vec<_>, _>>()?;
    list.items.splice(range, fitted);
    Ok(())
}

/// Extracts the one node a single slot can hold; an empty list yields
/// nothing.
fn single(replacement: Fragment) -> Result<Option<Node>, RewriteError> {
    match replacement {
        Fragment::Node(node) => Ok(Some(node)),
        Fragment::List(list) => {
            let mut items = list.items.into_iter();
            match (items.next(), items.next()) {
                (only, None) => Ok(only),
                _ => Err(RewriteError::incompatible("single node", "node list")),
            }
        }
    }
}

fn empty_root() -> RewriteError {
    RewriteError::incompatible("tree root", "empty list")
}

/// Converts `node` to the category of the node it replaces.
fn fit(node: Node, replaced: &Node) -> Result<Node, RewriteError> {
    if replaced.is_stmt() {
        to_statement(node)
    } else if replaced.is_expr() {
        to_expression(node)
    } else if matches!(replaced.kind, NodeKind::Field { .. }) {
        to_field(node)
    } else {
        Ok(node)
    }
}
