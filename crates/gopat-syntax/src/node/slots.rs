//! Child-slot accessors.
//!
//! Every variant exposes its children as an ordered list of slots: a single
//! required child, an optional child, or a list. The slot index is stable per
//! variant, which lets side tables record *where* a child lives in its
//! parent. Both accessors are generated from one table so they cannot drift.

use super::{Node, NodeKind, NodeList};

/// A read-only child slot.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// Required single child.
    One(&'a Node),
    /// Optional single child.
    Opt(Option<&'a Node>),
    /// List of children.
    List(&'a NodeList),
}

impl<'a> Slot<'a> {
    fn opt(child: &'a Option<Box<Node>>) -> Self {
        Self::Opt(child.as_deref())
    }

    /// Returns the nodes held by the slot.
    #[must_use]
    pub fn into_nodes(self) -> Vec<&'a Node> {
        match self {
            Self::One(node) => vec![node],
            Self::Opt(node) => node.into_iter().collect(),
            Self::List(list) => list.items.iter().collect(),
        }
    }
}

/// A mutable child slot.
#[derive(Debug)]
pub enum SlotMut<'a> {
    /// Required single child.
    One(&'a mut Box<Node>),
    /// Optional single child.
    Opt(&'a mut Option<Box<Node>>),
    /// List of children.
    List(&'a mut NodeList),
}

impl<'a> SlotMut<'a> {
    /// Returns the nodes held by the slot.
    #[must_use]
    pub fn into_nodes(self) -> Vec<&'a mut Node> {
        match self {
            Self::One(node) => vec![&mut **node],
            Self::Opt(node) => node.as_deref_mut().into_iter().collect(),
            Self::List(list) => list.items.iter_mut().collect(),
        }
    }

    /// Applies `f` to every node held by the slot.
    pub fn for_each_node(self, f: impl FnMut(&mut Node)) {
        self.into_nodes().into_iter().for_each(f);
    }
}

macro_rules! slot_table {
    ($kind:expr, $one:path, $opt:path, $list:path) => {
        match $kind {
            NodeKind::Ident(_)
            | NodeKind::BasicLit { .. }
            | NodeKind::Bad(_)
            | NodeKind::EmptyStmt => Vec::new(),
            NodeKind::CompositeLit { ty, elts } => vec![$opt(ty), $list(elts)],
            NodeKind::FuncLit { ty, body } => vec![$one(ty), $one(body)],
            NodeKind::Paren(x)
            | NodeKind::Star(x)
            | NodeKind::DeclStmt(x)
            | NodeKind::ExprStmt(x)
            | NodeKind::GoStmt(x)
            | NodeKind::DeferStmt(x)
            | NodeKind::Unary { x, .. }
            | NodeKind::IncDecStmt { x, .. }
            | NodeKind::ChanType { value: x, .. } => vec![$one(x)],
            NodeKind::Selector { x, sel } => vec![$one(x), $one(sel)],
            NodeKind::Index { x, index } => vec![$one(x), $one(index)],
            NodeKind::IndexList { x, indices } => vec![$one(x), $list(indices)],
            NodeKind::Slice {
                x, low, high, max, ..
            } => vec![$one(x), $opt(low), $opt(high), $opt(max)],
            NodeKind::TypeAssert { x, ty } => vec![$one(x), $opt(ty)],
            NodeKind::Call { fun, args, .. } => vec![$one(fun), $list(args)],
            NodeKind::Binary { x, y, .. } => vec![$one(x), $one(y)],
            NodeKind::KeyValue { key, value } | NodeKind::MapType { key, value } => {
                vec![$one(key), $one(value)]
            }
            NodeKind::Ellipsis(elt) => vec![$opt(elt)],
            NodeKind::ArrayType { len, elt } => vec![$opt(len), $one(elt)],
            NodeKind::StructType { fields } => vec![$list(fields)],
            NodeKind::FuncType {
                type_params,
                params,
                results,
            } => vec![$list(type_params), $list(params), $list(results)],
            NodeKind::InterfaceType { methods } => vec![$list(methods)],
            NodeKind::Field { names, ty, tag } => vec![$list(names), $opt(ty), $opt(tag)],
            NodeKind::LabeledStmt { label, stmt } => vec![$one(label), $one(stmt)],
            NodeKind::SendStmt { chan, value } => vec![$one(chan), $one(value)],
            NodeKind::AssignStmt { lhs, rhs, .. } => vec![$list(lhs), $list(rhs)],
            NodeKind::ReturnStmt { results } => vec![$list(results)],
            NodeKind::BranchStmt { label, .. } => vec![$opt(label)],
            NodeKind::BlockStmt { stmts } => vec![$list(stmts)],
            NodeKind::IfStmt {
                init,
                cond,
                body,
                els,
            } => vec![$opt(init), $one(cond), $one(body), $opt(els)],
            NodeKind::CaseClause { list, body } => vec![$list(list), $list(body)],
            NodeKind::SwitchStmt { init, tag, body } => vec![$opt(init), $opt(tag), $one(body)],
            NodeKind::TypeSwitchStmt { init, assign, body } => {
                vec![$opt(init), $one(assign), $one(body)]
            }
            NodeKind::CommClause { comm, body } => vec![$opt(comm), $list(body)],
            NodeKind::SelectStmt { body } => vec![$one(body)],
            NodeKind::ForStmt {
                init,
                cond,
                post,
                body,
            } => vec![$opt(init), $opt(cond), $opt(post), $one(body)],
            NodeKind::RangeStmt {
                key,
                value,
                x,
                body,
                ..
            } => vec![$opt(key), $opt(value), $one(x), $one(body)],
            NodeKind::ImportSpec { name, path } => vec![$opt(name), $one(path)],
            NodeKind::ValueSpec { names, ty, values } => {
                vec![$list(names), $opt(ty), $list(values)]
            }
            NodeKind::TypeSpec {
                name,
                type_params,
                ty,
                ..
            } => vec![$one(name), $list(type_params), $one(ty)],
            NodeKind::GenDecl { specs, .. } => vec![$list(specs)],
            NodeKind::FuncDecl {
                recv,
                name,
                ty,
                body,
            } => vec![$list(recv), $one(name), $one(ty), $opt(body)],
            NodeKind::File { package, decls } => vec![$one(package), $list(decls)],
        }
    };
}

impl Node {
    /// Returns the child slots in a fixed per-variant order.
    #[must_use]
    pub fn slots(&self) -> Vec<Slot<'_>> {
        slot_table!(&self.kind, Slot::One, Slot::opt, Slot::List)
    }

    /// Returns the child slots mutably, in the same order as [`Node::slots`].
    pub fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        slot_table!(&mut self.kind, SlotMut::One, SlotMut::Opt, SlotMut::List)
    }
}
