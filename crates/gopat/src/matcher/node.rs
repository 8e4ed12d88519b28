//! Structural comparison of one pattern node against one candidate node.

use std::rc::Rc;

use gopat_syntax::{ListKind, Node, NodeKind, NodeList};

use super::Matcher;
use super::capture::{Bound, Env};
use crate::metavariables::{DISCARD, MetaVariable};
use crate::pattern::Pattern;

impl<'a> Matcher<'a> {
    /// Matches `pattern` against `candidate`, adding bindings to `env`.
    ///
    /// On failure `env` may hold partial bindings; callers discard it.
    pub(crate) fn node(&mut self, pattern: &'a Node, candidate: &'a Node, env: &mut Env<'a>) -> bool {
        self.stats.node_comparisons += 1;
        let table: &'a Pattern = self.pattern;
        if let Some(mv) = table.metavar(pattern) {
            return !mv.is_sequence() && bind_node(env, &mv.name, candidate);
        }
        if let Some(mv) = whole_element_wildcard(table, pattern, candidate) {
            return bind_node(env, &mv.name, candidate);
        }
        self.kinds(pattern, candidate, env)
    }

    /// Matches two list fields exactly.
    pub(crate) fn list(&mut self, pattern: &'a NodeList, candidate: &'a NodeList, env: &mut Env<'a>) -> bool {
        self.sequence(&pattern.items, &candidate.items, candidate.kind, false, env)
            .is_some()
    }

    /// Matches two optional children.
    ///
    /// A lone sequence metavariable binds the slot's content as a zero- or
    /// one-element list. In aggressive mode an absent pattern child matches a
    /// candidate `_` identifier; an absent candidate child never matches a
    /// present pattern child.
    pub(crate) fn opt(
        &mut self,
        pattern: &'a Option<Box<Node>>,
        candidate: &'a Option<Box<Node>>,
        env: &mut Env<'a>,
    ) -> bool {
        let (expected, actual) = (pattern.as_deref(), candidate.as_deref());
        if let Some((mv, kind)) = expected.and_then(|node| self.optional_wildcard(node)) {
            let items = actual.map_or(&[][..], std::slice::from_ref);
            return bind_slice(env, &mv.name, kind, items);
        }
        match (expected, actual) {
            (None, None) => true,
            (Some(expected_node), Some(actual_node)) => self.node(expected_node, actual_node, env),
            (None, Some(present)) => self.aggressive && present.as_ident() == Some(DISCARD),
            (Some(_), None) => false,
        }
    }

    fn optional_wildcard(&self, node: &'a Node) -> Option<(&'a MetaVariable, ListKind)> {
        let table: &'a Pattern = self.pattern;
        let (inner, kind) = match &node.kind {
            NodeKind::ExprStmt(wrapped) => (&**wrapped, ListKind::Stmt),
            NodeKind::Ident(_) => (node, ListKind::Expr),
            _ => return None,
        };
        table
            .metavar(inner)
            .filter(|mv| mv.is_sequence())
            .map(|mv| (mv, kind))
    }

    fn header_wildcard(&self, node: &'a Node) -> Option<&'a MetaVariable> {
        let table: &'a Pattern = self.pattern;
        table.metavar(node).filter(|mv| mv.is_sequence())
    }

    #[expect(
        clippy::too_many_lines,
        reason = "one arm per node variant keeps the comparison exhaustive"
    )]
    fn kinds(&mut self, pattern: &'a Node, candidate: &'a Node, env: &mut Env<'a>) -> bool {
        use NodeKind as K;

        if let Some(matched) = self.special_forms(pattern, candidate, env) {
            return matched;
        }

        match (&pattern.kind, &candidate.kind) {
            (K::Ident(a), K::Ident(b)) | (K::Bad(a), K::Bad(b)) => a == b,
            (K::BasicLit { kind: k1, value: v1 }, K::BasicLit { kind: k2, value: v2 }) => {
                k1 == k2 && v1 == v2
            }
            (K::CompositeLit { ty: t1, elts: e1 }, K::CompositeLit { ty: t2, elts: e2 }) => {
                self.opt(t1, t2, env) && self.list(e1, e2, env)
            }
            (K::FuncLit { ty: t1, body: b1 }, K::FuncLit { ty: t2, body: b2 }) => {
                self.node(t1, t2, env) && self.node(b1, b2, env)
            }
            (K::Paren(x1), K::Paren(x2))
            | (K::Star(x1), K::Star(x2))
            | (K::DeclStmt(x1), K::DeclStmt(x2))
            | (K::ExprStmt(x1), K::ExprStmt(x2))
            | (K::GoStmt(x1), K::GoStmt(x2))
            | (K::DeferStmt(x1), K::DeferStmt(x2))
            | (K::SelectStmt { body: x1 }, K::SelectStmt { body: x2 }) => self.node(x1, x2, env),
            (K::Selector { x: x1, sel: s1 }, K::Selector { x: x2, sel: s2 })
            | (K::Index { x: x1, index: s1 }, K::Index { x: x2, index: s2 })
            | (K::KeyValue { key: x1, value: s1 }, K::KeyValue { key: x2, value: s2 })
            | (K::MapType { key: x1, value: s1 }, K::MapType { key: x2, value: s2 })
            | (K::LabeledStmt { label: x1, stmt: s1 }, K::LabeledStmt { label: x2, stmt: s2 })
            | (K::SendStmt { chan: x1, value: s1 }, K::SendStmt { chan: x2, value: s2 }) => {
                self.node(x1, x2, env) && self.node(s1, s2, env)
            }
            (K::IndexList { x: x1, indices: i1 }, K::IndexList { x: x2, indices: i2 }) => {
                self.node(x1, x2, env) && self.list(i1, i2, env)
            }
            (
                K::Slice {
                    x: x1,
                    low: l1,
                    high: h1,
                    max: m1,
                    slice3: s1,
                },
                K::Slice {
                    x: x2,
                    low: l2,
                    high: h2,
                    max: m2,
                    slice3: s2,
                },
            ) => {
                s1 == s2
                    && self.node(x1, x2, env)
                    && self.opt(l1, l2, env)
                    && self.opt(h1, h2, env)
                    && self.opt(m1, m2, env)
            }
            (K::TypeAssert { x: x1, ty: t1 }, K::TypeAssert { x: x2, ty: t2 }) => {
                self.node(x1, x2, env) && self.opt(t1, t2, env)
            }
            (
                K::Call {
                    fun: f1,
                    args: a1,
                    ellipsis: e1,
                },
                K::Call {
                    fun: f2,
                    args: a2,
                    ellipsis: e2,
                },
            ) => e1 == e2 && self.node(f1, f2, env) && self.list(a1, a2, env),
            (K::Unary { op: o1, x: x1 }, K::Unary { op: o2, x: x2 }) => {
                o1 == o2 && self.node(x1, x2, env)
            }
            (K::Binary { op: o1, x: x1, y: y1 }, K::Binary { op: o2, x: x2, y: y2 }) => {
                o1 == o2 && self.node(x1, x2, env) && self.node(y1, y2, env)
            }
            (K::Ellipsis(e1), K::Ellipsis(e2)) => self.opt(e1, e2, env),
            (K::ArrayType { len: l1, elt: e1 }, K::ArrayType { len: l2, elt: e2 }) => {
                self.opt(l1, l2, env) && self.node(e1, e2, env)
            }
            (K::StructType { fields: f1 }, K::StructType { fields: f2 })
            | (K::InterfaceType { methods: f1 }, K::InterfaceType { methods: f2 })
            | (K::ReturnStmt { results: f1 }, K::ReturnStmt { results: f2 })
            | (K::BlockStmt { stmts: f1 }, K::BlockStmt { stmts: f2 }) => self.list(f1, f2, env),
            (
                K::FuncType {
                    type_params: t1,
                    params: p1,
                    results: r1,
                },
                K::FuncType {
                    type_params: t2,
                    params: p2,
                    results: r2,
                },
            ) => self.list(t1, t2, env) && self.list(p1, p2, env) && self.list(r1, r2, env),
            (K::ChanType { dir: d1, value: v1 }, K::ChanType { dir: d2, value: v2 }) => {
                d1 == d2 && self.node(v1, v2, env)
            }
            (
                K::Field {
                    names: n1,
                    ty: t1,
                    tag: g1,
                },
                K::Field {
                    names: n2,
                    ty: t2,
                    tag: g2,
                },
            ) => self.list(n1, n2, env) && self.opt(t1, t2, env) && self.opt(g1, g2, env),
            (K::EmptyStmt, K::EmptyStmt) => true,
            (K::IncDecStmt { x: x1, inc: i1 }, K::IncDecStmt { x: x2, inc: i2 }) => {
                i1 == i2 && self.node(x1, x2, env)
            }
            (
                K::AssignStmt {
                    lhs: l1,
                    tok: t1,
                    rhs: r1,
                },
                K::AssignStmt {
                    lhs: l2,
                    tok: t2,
                    rhs: r2,
                },
            ) => (self.aggressive || t1 == t2) && self.list(l1, l2, env) && self.list(r1, r2, env),
            (K::BranchStmt { kind: k1, label: l1 }, K::BranchStmt { kind: k2, label: l2 }) => {
                k1 == k2 && self.opt(l1, l2, env)
            }
            (
                K::IfStmt {
                    init: i1,
                    cond: c1,
                    body: b1,
                    els: e1,
                },
                K::IfStmt {
                    init: i2,
                    cond: c2,
                    body: b2,
                    els: e2,
                },
            ) => {
                self.opt(i1, i2, env)
                    && self.node(c1, c2, env)
                    && self.node(b1, b2, env)
                    && self.opt(e1, e2, env)
            }
            (K::CaseClause { list: l1, body: b1 }, K::CaseClause { list: l2, body: b2 }) => {
                self.list(l1, l2, env) && self.list(b1, b2, env)
            }
            (
                K::SwitchStmt {
                    init: i1,
                    tag: t1,
                    body: b1,
                },
                K::SwitchStmt {
                    init: i2,
                    tag: t2,
                    body: b2,
                },
            ) => self.opt(i1, i2, env) && self.opt(t1, t2, env) && self.node(b1, b2, env),
            (
                K::TypeSwitchStmt {
                    init: i1,
                    assign: a1,
                    body: b1,
                },
                K::TypeSwitchStmt {
                    init: i2,
                    assign: a2,
                    body: b2,
                },
            ) => self.opt(i1, i2, env) && self.node(a1, a2, env) && self.node(b1, b2, env),
            (K::CommClause { comm: c1, body: b1 }, K::CommClause { comm: c2, body: b2 }) => {
                self.opt(c1, c2, env) && self.list(b1, b2, env)
            }
            (
                K::ForStmt {
                    init: i1,
                    cond: c1,
                    post: p1,
                    body: b1,
                },
                K::ForStmt {
                    init: i2,
                    cond: c2,
                    post: p2,
                    body: b2,
                },
            ) => {
                self.opt(i1, i2, env)
                    && self.opt(c1, c2, env)
                    && self.opt(p1, p2, env)
                    && self.node(b1, b2, env)
            }
            (
                K::RangeStmt {
                    key: k1,
                    value: v1,
                    tok: t1,
                    x: x1,
                    body: b1,
                },
                K::RangeStmt {
                    key: k2,
                    value: v2,
                    tok: t2,
                    x: x2,
                    body: b2,
                },
            ) => {
                (self.aggressive || t1 == t2)
                    && self.opt(k1, k2, env)
                    && self.opt(v1, v2, env)
                    && self.node(x1, x2, env)
                    && self.node(b1, b2, env)
            }
            (K::ImportSpec { name: n1, path: p1 }, K::ImportSpec { name: n2, path: p2 }) => {
                self.opt(n1, n2, env) && self.node(p1, p2, env)
            }
            (
                K::ValueSpec {
                    names: n1,
                    ty: t1,
                    values: v1,
                },
                K::ValueSpec {
                    names: n2,
                    ty: t2,
                    values: v2,
                },
            ) => {
                if !self.opt(t1, t2, env) {
                    return false;
                }
                if self.aggressive && self.spec_position(n1, v1, n2, v2, env) {
                    return true;
                }
                self.list(n1, n2, env) && self.list(v1, v2, env)
            }
            (
                K::TypeSpec {
                    name: n1,
                    type_params: p1,
                    alias: a1,
                    ty: t1,
                },
                K::TypeSpec {
                    name: n2,
                    type_params: p2,
                    alias: a2,
                    ty: t2,
                },
            ) => {
                a1 == a2
                    && self.node(n1, n2, env)
                    && self.list(p1, p2, env)
                    && self.node(t1, t2, env)
            }
            (K::GenDecl { kind: k1, specs: s1, .. }, K::GenDecl { kind: k2, specs: s2, .. }) => {
                k1 == k2 && self.list(s1, s2, env)
            }
            (
                K::FuncDecl {
                    recv: r1,
                    name: n1,
                    ty: t1,
                    body: b1,
                },
                K::FuncDecl {
                    recv: r2,
                    name: n2,
                    ty: t2,
                    body: b2,
                },
            ) => {
                self.list(r1, r2, env)
                    && self.node(n1, n2, env)
                    && self.node(t1, t2, env)
                    && self.opt(b1, b2, env)
            }
            (K::File { package: p1, decls: d1 }, K::File { package: p2, decls: d2 }) => {
                self.node(p1, p2, env) && self.list(d1, d2, env)
            }
            _ => false,
        }
    }

    /// Handles header wildcards and the aggressive-mode relaxations.
    ///
    /// Returns `None` when the ordinary variant comparison applies.
    fn special_forms(&mut self, pattern: &'a Node, candidate: &'a Node, env: &mut Env<'a>) -> Option<bool> {
        use NodeKind as K;

        let matched = match (&pattern.kind, &candidate.kind) {
            (
                K::IfStmt {
                    init: None,
                    cond,
                    body,
                    els,
                },
                K::IfStmt {
                    init: i2,
                    cond: c2,
                    body: b2,
                    els: e2,
                },
            ) => {
                let mv = self.header_wildcard(cond)?;
                let header = header_list(&[i2.as_deref(), Some(&**c2)]);
                bind_synthetic(env, &mv.name, header)
                    && self.node(body, b2, env)
                    && self.opt(els, e2, env)
            }
            (
                K::SwitchStmt {
                    init: None,
                    tag: Some(tag),
                    body,
                },
                K::SwitchStmt {
                    init: i2,
                    tag: t2,
                    body: b2,
                },
            ) => {
                let mv = self.header_wildcard(tag)?;
                let header = header_list(&[i2.as_deref(), t2.as_deref()]);
                bind_synthetic(env, &mv.name, header) && self.node(body, b2, env)
            }
            (
                K::SwitchStmt {
                    init: None,
                    tag: Some(tag),
                    body,
                },
                K::TypeSwitchStmt {
                    init: i2,
                    assign,
                    body: b2,
                },
            ) => {
                let mv = self.header_wildcard(tag)?;
                let header = header_list(&[i2.as_deref(), Some(&**assign)]);
                bind_synthetic(env, &mv.name, header) && self.node(body, b2, env)
            }
            (
                K::ForStmt {
                    init: None,
                    cond: Some(cond),
                    post: None,
                    body,
                },
                K::ForStmt {
                    init: i2,
                    cond: c2,
                    post: p2,
                    body: b2,
                },
            ) => {
                let mv = self.header_wildcard(cond)?;
                let header = header_list(&[i2.as_deref(), c2.as_deref(), p2.as_deref()]);
                bind_synthetic(env, &mv.name, header) && self.node(body, b2, env)
            }
            (K::AssignStmt { lhs, rhs, .. }, K::ValueSpec { names, values, .. }) if self.aggressive => {
                self.list(lhs, names, env) && self.list(rhs, values, env)
            }
            (K::BlockStmt { stmts }, K::BlockStmt { stmts: other }) if self.aggressive => self
                .sequence(&stmts.items, &other.items, ListKind::Stmt, true, env)
                .is_some(),
            (K::BlockStmt { stmts }, _) if self.aggressive && candidate.is_stmt() => self
                .sequence(
                    &stmts.items,
                    std::slice::from_ref(candidate),
                    ListKind::Stmt,
                    false,
                    env,
                )
                .is_some(),
            _ => return None,
        };
        Some(matched)
    }

    /// Tries a one-name spec pattern against each name position of a
    /// candidate spec.
    fn spec_position(
        &mut self,
        names: &'a NodeList,
        values: &'a NodeList,
        candidate_names: &'a NodeList,
        candidate_values: &'a NodeList,
        env: &mut Env<'a>,
    ) -> bool {
        let ([name], value) = (names.items.as_slice(), values.items.first()) else {
            return false;
        };
        for (index, candidate) in candidate_names.items.iter().enumerate() {
            let mut attempt = env.clone();
            if !self.node(name, candidate, &mut attempt) {
                continue;
            }
            let value_matches = match value {
                None => true,
                Some(expected) => candidate_values
                    .items
                    .get(index)
                    .is_some_and(|actual| self.node(expected, actual, &mut attempt)),
            };
            if value_matches {
                *env = attempt;
                return true;
            }
        }
        false
    }
}

/// Returns the metavariable standing for a whole statement, field or clause
/// when `candidate` has the matching shape.
fn whole_element_wildcard<'a>(
    table: &'a Pattern,
    pattern: &'a Node,
    candidate: &Node,
) -> Option<&'a MetaVariable> {
    use NodeKind as K;

    let fits = match (&pattern.kind, &candidate.kind) {
        (K::ExprStmt(_), _) => candidate.is_stmt(),
        (K::Field { .. }, K::Field { .. })
        | (K::CaseClause { .. } | K::CommClause { .. }, K::CaseClause { .. } | K::CommClause { .. }) => {
            true
        }
        _ => false,
    };
    if !fits {
        return None;
    }
    table.list_wildcard(pattern).filter(|mv| !mv.is_sequence())
}

/// Builds the statement list standing for an `if`, `switch` or `for` header.
fn header_list(parts: &[Option<&Node>]) -> NodeList {
    let items = parts
        .iter()
        .flatten()
        .map(|part| {
            if part.is_stmt() {
                (*part).clone()
            } else {
                let mut stmt = Node::new(NodeKind::ExprStmt((*part).clone().boxed()));
                stmt.set_span(part.span());
                stmt
            }
        })
        .collect();
    NodeList::new(ListKind::Stmt, items)
}

pub(crate) fn bind_node<'a>(env: &mut Env<'a>, name: &'a str, candidate: &'a Node) -> bool {
    if name == DISCARD {
        return true;
    }
    match env.get(name) {
        None => {
            env.insert(name, Bound::Node(candidate));
            true
        }
        Some(Bound::Node(previous)) => *previous == candidate,
        Some(previous) => matches!(previous.items(), [only] if only == candidate),
    }
}

pub(crate) fn bind_slice<'a>(
    env: &mut Env<'a>,
    name: &'a str,
    kind: ListKind,
    items: &'a [Node],
) -> bool {
    if name == DISCARD {
        return true;
    }
    match env.get(name) {
        None => {
            env.insert(name, Bound::Slice(kind, items));
            true
        }
        Some(previous) => previous.items() == items,
    }
}

fn bind_synthetic<'a>(env: &mut Env<'a>, name: &'a str, list: NodeList) -> bool {
    if name == DISCARD {
        return true;
    }
    match env.get(name) {
        None => {
            env.insert(name, Bound::Synthetic(Rc::new(list)));
            true
        }
        Some(previous) => previous.items() == list.items.as_slice(),
    }
}
