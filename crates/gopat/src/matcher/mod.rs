//! Structural matching of compiled patterns against syntax trees.
//!
//! [`Matcher`] compares a pattern with candidate nodes and lists, binding
//! metavariables as it goes. [`Matcher::find`] walks a whole tree and yields
//! [`MatchResult`]s lazily in pre-order.
//!
//! # Aggressive mode
//!
//! Patterns starting with `~` relax a few comparisons:
//!
//! - assignment tokens are ignored, and an assignment may match a `var`
//!   spec
//! - a one-name spec may match any name/value position of a wider spec
//! - a block matches when its statements occur anywhere in the candidate
//!   block, and a one-statement block matches that statement unbraced
//! - `range` tokens are ignored
//! - an absent optional pattern child matches a candidate `_` identifier,
//!   but not the other way round

mod capture;
mod node;
mod sequence;
mod walk;

use std::collections::BTreeMap;
use std::ops::Range;

use gopat_config::{DEFAULT_MAX_LIST_RESTARTS, EngineConfig};
use gopat_syntax::{Fragment, Node, NodeList};

use crate::pattern::Pattern;

pub(crate) use capture::{Env, captures_from_env, env_from_captures};
pub use capture::{MatchResult, MatchTarget};
pub use walk::Matches;

/// Work counters for one matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Structural node comparisons performed.
    pub node_comparisons: usize,
    /// Restart frames resumed by the list matcher.
    pub restarts: usize,
    /// List matches abandoned after exhausting the restart budget.
    ///
    /// A non-zero count means some candidates were reported as non-matching
    /// without a complete search.
    pub exhausted: usize,
}

/// A successful list match.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMatch {
    /// Matched span of the candidate list.
    pub span: Range<usize>,
    /// Bindings made by the match.
    pub captures: BTreeMap<String, Fragment>,
}

/// Matches one compiled pattern.
#[derive(Debug)]
pub struct Matcher<'a> {
    pattern: &'a Pattern,
    aggressive: bool,
    restart_budget: usize,
    stats: MatchStats,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher with the default restart budget.
    #[must_use]
    pub const fn new(pattern: &'a Pattern) -> Self {
        Self {
            pattern,
            aggressive: pattern.aggressive(),
            restart_budget: DEFAULT_MAX_LIST_RESTARTS,
            stats: MatchStats {
                node_comparisons: 0,
                restarts: 0,
                exhausted: 0,
            },
        }
    }

    /// Creates a matcher using the limits and mode of `config`.
    #[must_use]
    pub const fn with_config(pattern: &'a Pattern, config: &EngineConfig) -> Self {
        let mut matcher = Self::new(pattern);
        matcher.aggressive = pattern.aggressive() || config.aggressive();
        matcher.restart_budget = config.max_list_restarts();
        matcher
    }

    /// Sets how many restart frames one list match may resume.
    #[must_use]
    pub const fn with_restart_budget(mut self, budget: usize) -> Self {
        self.restart_budget = budget;
        self
    }

    /// Returns the work done so far.
    #[must_use]
    pub const fn stats(&self) -> MatchStats {
        self.stats
    }

    /// Matches a single-node pattern against `candidate`.
    ///
    /// Returns the bindings on success. List patterns never match a node.
    pub fn match_node(&mut self, candidate: &'a Node) -> Option<BTreeMap<String, Fragment>> {
        let table: &'a Pattern = self.pattern;
        let Fragment::Node(root) = table.root() else {
            return None;
        };
        let mut env = Env::new();
        self.node(root, candidate, &mut env)
            .then(|| captures_from_env(&env))
    }

    /// Matches the pattern as a list against `candidate`.
    ///
    /// A single-node pattern is treated as a one-element list. With
    /// `partial` set the match may cover any contiguous sub-span.
    pub fn match_list(&mut self, candidate: &'a NodeList, partial: bool) -> Option<ListMatch> {
        let mut env = Env::new();
        let span = self.sequence(
            self.pattern_items(),
            &candidate.items,
            candidate.kind,
            partial,
            &mut env,
        )?;
        Some(ListMatch {
            span,
            captures: captures_from_env(&env),
        })
    }

    /// Walks `tree` and yields every match in pre-order.
    #[must_use]
    pub fn find(self, tree: &'a Node) -> Matches<'a> {
        Matches::new(self, tree, Env::new())
    }

    /// Walks `tree` starting every attempt from `captures`.
    #[must_use]
    pub fn find_with(self, tree: &'a Node, captures: &'a BTreeMap<String, Fragment>) -> Matches<'a> {
        Matches::new(self, tree, env_from_captures(captures))
    }

    fn pattern_items(&self) -> &'a [Node] {
        let table: &'a Pattern = self.pattern;
        match table.root() {
            Fragment::Node(node) => std::slice::from_ref(node),
            Fragment::List(list) => &list.items,
        }
    }
}

#[cfg(test)]
mod tests;
