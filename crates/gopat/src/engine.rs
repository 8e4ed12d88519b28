//! Query API over compiled patterns.
//!
//! [`Engine`] ties the pieces together under one [`EngineConfig`]: it
//! compiles patterns and predicates, finds matches, filters them, moves them
//! up the tree and rewrites them.

use std::collections::HashSet;

use gopat_config::EngineConfig;
use gopat_syntax::{Fragment, Node, print_fragment};
use tracing::debug;

use crate::attribute::{AttributeSet, Predicate};
use crate::error::{CompileError, PredicateError, RewriteError};
use crate::matcher::{MatchResult, MatchTarget, Matcher, Matches};
use crate::parents::ParentTable;
use crate::pattern::Pattern;
use crate::rewriter::{RewriteSummary, Rewriter};
use crate::types::TypeInfo;

/// Pattern matching and rewriting with shared limits.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with `config`.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compiles a pattern or template.
    ///
    /// The configuration's aggressive flag turns aggressive mode on for
    /// every pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the text is not a valid pattern.
    pub fn compile(&self, text: &str) -> Result<Pattern, CompileError> {
        let pattern = Pattern::compile(text)?;
        let aggressive = pattern.aggressive() || self.config.aggressive();
        Ok(pattern.with_aggressive(aggressive))
    }

    /// Compiles attribute predicate text.
    ///
    /// # Errors
    ///
    /// Returns a [`PredicateError`] when the text is not a valid predicate.
    pub fn compile_predicate(&self, text: &str) -> Result<AttributeSet, PredicateError> {
        AttributeSet::parse(text)
    }

    /// Lazily finds the matches of `pattern` in `tree`, in pre-order.
    ///
    /// At most `max_matches` results are produced.
    #[must_use]
    pub fn find<'a>(&self, tree: &'a Node, pattern: &'a Pattern) -> Matches<'a> {
        Matcher::with_config(pattern, &self.config)
            .find(tree)
            .with_limit(self.config.max_matches())
    }

    /// Finds `pattern` inside each previous match, starting from that
    /// match's bindings.
    #[must_use]
    pub fn find_within(&self, matches: &[MatchResult], pattern: &Pattern) -> Vec<MatchResult> {
        let limit = self.config.max_matches();
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for previous in matches {
            let roots: &[Node] = match previous.matched() {
                Fragment::Node(node) => std::slice::from_ref(node),
                Fragment::List(list) => &list.items,
            };
            for root in roots {
                let inner = Matcher::with_config(pattern, &self.config)
                    .find_with(root, previous.captures());
                for result in inner {
                    if found.len() >= limit {
                        debug!(limit, "match limit reached");
                        return found;
                    }
                    if seen.insert(result.target()) {
                        found.push(result);
                    }
                }
            }
        }
        debug!(count = found.len(), "nested search finished");
        found
    }

    /// Keeps the matches for which `predicate` holds, or with
    /// `keep_on_match` unset, those for which it does not.
    #[must_use]
    pub fn filter(
        &self,
        matches: Vec<MatchResult>,
        predicate: &Predicate,
        keep_on_match: bool,
        types: &dyn TypeInfo,
    ) -> Vec<MatchResult> {
        let before = matches.len();
        let kept: Vec<_> = matches
            .into_iter()
            .filter(|result| predicate.holds(result, types, &self.config) == keep_on_match)
            .collect();
        debug!(before, after = kept.len(), "filtered matches");
        kept
    }

    /// Replaces each match in `tree` with `template` filled from its
    /// captures.
    ///
    /// # Errors
    ///
    /// Returns the first [`RewriteError`]; earlier replacements stay applied.
    pub fn substitute(
        &self,
        tree: &mut Node,
        matches: &[MatchResult],
        template: &Pattern,
    ) -> Result<RewriteSummary, RewriteError> {
        Rewriter::new(template).apply(tree, matches)
    }

    /// Moves every match `levels` ancestors up `tree`.
    ///
    /// A list match moves to the node owning the list first. Matches that
    /// run out of ancestors are dropped, and matches landing on the same
    /// node are merged.
    #[must_use]
    pub fn navigate_parents(
        &self,
        tree: &Node,
        matches: Vec<MatchResult>,
        levels: usize,
    ) -> Vec<MatchResult> {
        if levels == 0 {
            return matches;
        }
        let table = ParentTable::build(tree);
        let mut seen = HashSet::new();
        let mut moved = Vec::new();
        for result in matches {
            let Some(ancestor) = table.ancestors(result.target().first()).nth(levels - 1) else {
                debug!(
                    node = result.target().first().get(),
                    levels, "match has too few ancestors"
                );
                continue;
            };
            let Some(node) = tree.find(ancestor) else {
                continue;
            };
            if seen.insert(ancestor) {
                moved.push(
                    result.with_target(MatchTarget::Node(ancestor), Fragment::Node(node.clone())),
                );
            }
        }
        moved
    }

    /// Renders a node or list as Go source.
    #[must_use]
    pub fn print(&self, fragment: &Fragment) -> String {
        print_fragment(fragment)
    }
}
