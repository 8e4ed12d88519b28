//! Template filling.

use std::collections::BTreeMap;

use gopat_syntax::{Fragment, ListKind, Node, NodeKind, NodeList, SlotMut};

use crate::error::RewriteError;
use crate::pattern::Pattern;

/// Builds replacement trees from a template and one match's captures.
pub(super) struct Filler<'t> {
    pub(super) template: &'t Pattern,
    pub(super) captures: &'t BTreeMap<String, Fragment>,
}

impl Filler<'_> {
    /// Fills the template root.
    ///
    /// The result carries fresh identities and no positions.
    pub(super) fn fragment(&self) -> Result<Fragment, RewriteError> {
        let mut filled = match self.template.root() {
            Fragment::Node(node) => match self.template.metavar(node) {
                Some(mv) => self.capture(&mv.name)?.clone(),
                None => {
                    let mut copy = node.clone();
                    self.fill_node(&mut copy)?;
                    Fragment::Node(copy)
                }
            },
            Fragment::List(list) => {
                let mut copy = list.clone();
                self.fill_list(&mut copy)?;
                Fragment::List(copy)
            }
        };
        filled.clear_spans();
        Ok(renumbered(&filled))
    }

    pub(super) fn capture(&self, name: &str) -> Result<&Fragment, RewriteError> {
        self.captures
            .get(name)
            .ok_or_else(|| RewriteError::unbound(name))
    }

    pub(super) fn fill_node(&self, node: &mut Node) -> Result<(), RewriteError> {
        if let Some(kind) = self.rebuild_header(&node.kind)? {
            node.kind = kind;
            return Ok(());
        }
        for slot in node.slots_mut() {
            match slot {
                SlotMut::One(child) => self.fill_one(child)?,
                SlotMut::Opt(child) => self.fill_opt(child)?,
                SlotMut::List(list) => self.fill_list(list)?,
            }
        }
        Ok(())
    }

    pub(super) fn fill_one(&self, child: &mut Box<Node>) -> Result<(), RewriteError> {
        let Some(mv) = self.template.list_wildcard(child) else {
            return self.fill_node(child);
        };
        let replacement = match self.capture(&mv.name)? {
            Fragment::Node(found) => convert(found.clone(), child)?,
            Fragment::List(_) => return Err(RewriteError::sequence_in_single_slot(&mv.name)),
        };
        **child = replacement;
        Ok(())
    }

    /// An optional slot also accepts a sequence of at most one element.
    pub(super) fn fill_opt(&self, child: &mut Option<Box<Node>>) -> Result<(), RewriteError> {
        let Some(present) = child else {
            return Ok(());
        };
        let Some(mv) = self.template.list_wildcard(present) else {
            return self.fill_node(present);
        };
        let found = match self.capture(&mv.name)? {
            Fragment::Node(found) => Some(found),
            Fragment::List(list) => match list.items.as_slice() {
                [] => None,
                [only] => Some(only),
                _ => return Err(RewriteError::sequence_in_single_slot(&mv.name)),
            },
        };
        let replacement = found
            .map(|node| convert(node.clone(), present))
            .transpose()?;
        *child = replacement.map(Node::boxed);
        Ok(())
    }

    pub(super) fn fill_list(&self, list: &mut NodeList) -> Result<(), RewriteError> {
        let mut items = Vec::with_capacity(list.len());
        for mut item in std::mem::take(&mut list.items) {
            let Some(mv) = self.template.list_wildcard(&item) else {
                self.fill_node(&mut item)?;
                items.push(item);
                continue;
            };
            match self.capture(&mv.name)? {
                Fragment::Node(found) => items.push(convert(found.clone(), &item)?),
                Fragment::List(found) => {
                    for element in &found.items {
                        items.push(convert(element.clone(), &item)?);
                    }
                }
            }
        }
        list.items = items;
        Ok(())
    }
}

fn renumbered(fragment: &Fragment) -> Fragment {
    match fragment {
        Fragment::Node(node) => Fragment::Node(node.renumbered()),
        Fragment::List(list) => Fragment::List(NodeList::new(
            list.kind,
            list.items.iter().map(Node::renumbered).collect(),
        )),
    }
}

/// Converts a captured node to the category of the wildcard it replaces.
fn convert(node: Node, wildcard: &Node) -> Result<Node, RewriteError> {
    match &wildcard.kind {
        NodeKind::ExprStmt(_) => to_statement(node),
        NodeKind::Field { .. } => to_field(node),
        NodeKind::CaseClause { .. } | NodeKind::CommClause { .. } => match node.kind {
            NodeKind::CaseClause { .. } | NodeKind::CommClause { .. } => Ok(node),
            _ => Err(RewriteError::incompatible("clause", node.kind.name())),
        },
        _ => to_expression(node),
    }
}

/// Converts `node` for a slot holding elements of `kind`.
pub(crate) fn to_list_element(node: Node, kind: ListKind) -> Result<Node, RewriteError> {
    match kind {
        ListKind::Stmt => to_statement(node),
        ListKind::Expr | ListKind::Ident => to_expression(node),
        ListKind::Field => to_field(node),
        ListKind::Spec | ListKind::Decl => Ok(node),
    }
}

/// Wraps expressions and declarations so they can stand as statements.
pub(crate) fn to_statement(node: Node) -> Result<Node, RewriteError> {
    if node.is_stmt() {
        return Ok(node);
    }
    let wrap: fn(Box<Node>) -> NodeKind = if node.is_expr() {
        NodeKind::ExprStmt
    } else if matches!(node.kind, NodeKind::GenDecl { .. }) {
        NodeKind::DeclStmt
    } else {
        return Err(RewriteError::incompatible("statement", node.kind.name()));
    };
    let span = node.span();
    let mut wrapped = Node::new(wrap(node.boxed()));
    wrapped.set_span(span);
    Ok(wrapped)
}

/// Unwraps expression statements; other statements are rejected.
pub(crate) fn to_expression(node: Node) -> Result<Node, RewriteError> {
    if !node.is_stmt() {
        return Ok(node);
    }
    match node.kind {
        NodeKind::ExprStmt(inner) => Ok(*inner),
        other => Err(RewriteError::incompatible("expression", other.name())),
    }
}

/// Turns a type expression into an unnamed field.
pub(crate) fn to_field(node: Node) -> Result<Node, RewriteError> {
    if matches!(node.kind, NodeKind::Field { .. }) {
        return Ok(node);
    }
    let ty = to_expression(node)?;
    let span = ty.span();
    let mut field = Node::new(NodeKind::Field {
        names: NodeList::empty(ListKind::Ident),
        ty: Some(ty.boxed()),
        tag: None,
    });
    field.set_span(span);
    Ok(field)
}
