//! Lazy pre-order search for matches in a tree.

use std::collections::{HashSet, VecDeque};

use gopat_syntax::{Fragment, ListKind, Node, NodeId, NodeKind, NodeList};
use tracing::debug;

use super::capture::{Env, MatchResult, MatchTarget, captures_from_env};
use super::{MatchStats, Matcher};
use crate::pattern::Pattern;

/// What the walk compares at each node.
#[derive(Debug, Clone, Copy)]
enum Shape<'a> {
    Node(&'a Node),
    List {
        items: &'a [Node],
        kind: ListKind,
        any_kind: bool,
    },
}

/// Iterator over the matches of one pattern in one tree.
///
/// Nodes are tried in pre-order. List patterns are tried against the
/// statements of blocks and clauses, call arguments and file declarations,
/// reporting each non-overlapping sub-span. A target is reported once.
#[derive(Debug)]
pub struct Matches<'a> {
    matcher: Matcher<'a>,
    shape: Shape<'a>,
    base: Env<'a>,
    stack: Vec<&'a Node>,
    pending: VecDeque<MatchResult>,
    seen: HashSet<(NodeId, usize)>,
    yielded: usize,
    limit: usize,
}

impl<'a> Matches<'a> {
    pub(super) fn new(matcher: Matcher<'a>, tree: &'a Node, base: Env<'a>) -> Self {
        let table: &'a Pattern = matcher.pattern;
        let shape = match table.root() {
            Fragment::Node(node) if table.sequence_wildcard(node).is_some() => Shape::List {
                items: std::slice::from_ref(node),
                kind: ListKind::Expr,
                any_kind: true,
            },
            Fragment::Node(node) => Shape::Node(node),
            Fragment::List(list) => Shape::List {
                items: &list.items,
                kind: list.kind,
                any_kind: list
                    .items
                    .iter()
                    .all(|item| table.sequence_wildcard(item).is_some()),
            },
        };
        Self {
            matcher,
            shape,
            base,
            stack: vec![tree],
            pending: VecDeque::new(),
            seen: HashSet::new(),
            yielded: 0,
            limit: usize::MAX,
        }
    }

    /// Stops the iterator after `limit` results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the matcher's work counters so far.
    #[must_use]
    pub const fn stats(&self) -> MatchStats {
        self.matcher.stats()
    }

    fn visit(&mut self, candidate: &'a Node) {
        match self.shape {
            Shape::Node(pattern) => {
                let mut env = self.base.clone();
                if self.matcher.node(pattern, candidate, &mut env) {
                    self.pending.push_back(MatchResult::new(
                        MatchTarget::Node(candidate.id()),
                        Fragment::Node(candidate.clone()),
                        captures_from_env(&env),
                    ));
                }
            }
            Shape::List {
                items,
                kind,
                any_kind,
            } => {
                let target = list_target(candidate).filter(|list| any_kind || list.kind == kind);
                if let Some(list) = target {
                    self.visit_list(items, list);
                }
            }
        }
    }

    fn visit_list(&mut self, patterns: &'a [Node], list: &'a NodeList) {
        let mut from = 0;
        while from < list.len() {
            let tail = list.items.get(from..).unwrap_or_default();
            let mut env = self.base.clone();
            let Some(span) = self
                .matcher
                .sequence(patterns, tail, list.kind, true, &mut env)
            else {
                break;
            };
            let (start, end) = (from + span.start, from + span.end);
            let matched = list.items.get(start..end).unwrap_or_default();
            if let Some(first) = matched.first() {
                self.pending.push_back(MatchResult::new(
                    MatchTarget::List {
                        first: first.id(),
                        len: matched.len(),
                    },
                    Fragment::List(NodeList::new(list.kind, matched.to_vec())),
                    captures_from_env(&env),
                ));
            }
            from = end.max(start + 1);
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = MatchResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.yielded >= self.limit {
                if !self.stack.is_empty() || !self.pending.is_empty() {
                    debug!(limit = self.limit, "match limit reached");
                    self.stack.clear();
                    self.pending.clear();
                }
                return None;
            }
            if let Some(result) = self.pending.pop_front() {
                let target = result.target();
                if self.seen.insert((target.first(), target.len())) {
                    self.yielded += 1;
                    return Some(result);
                }
                continue;
            }
            let node = self.stack.pop()?;
            self.stack.extend(node.children().into_iter().rev());
            self.visit(node);
        }
    }
}

/// Returns the non-empty list of `node` that list patterns are tried
/// against.
fn list_target(node: &Node) -> Option<&NodeList> {
    let list = match &node.kind {
        NodeKind::BlockStmt { stmts } => stmts,
        NodeKind::CaseClause { body, .. } | NodeKind::CommClause { body, .. } => body,
        NodeKind::Call { args, .. } => args,
        NodeKind::File { decls, .. } => decls,
        _ => return None,
    };
    (!list.is_empty()).then_some(list)
}
