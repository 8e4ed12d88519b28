//! Structural rewriting of matched code.
//!
//! A [`Rewriter`] fills a compiled template with the captures of a match and
//! splices the result into the target tree in place of the matched node or
//! list span:
//!
//! - single captures replace one node, sequence captures expand inside list
//!   slots, and `if`/`switch`/`for` headers are rebuilt from captured header
//!   lists
//! - expressions are wrapped as statements (and unwrapped again) to fit the
//!   slot they land in
//! - replacement nodes get fresh identities and a zero-width position at the
//!   start of the region they replace

mod fill;
mod header;
mod positions;
mod splice;

use std::collections::{BTreeMap, BTreeSet};

use gopat_syntax::{Fragment, Node};
use tracing::debug;

use crate::error::RewriteError;
use crate::matcher::MatchResult;
use crate::parents::ParentTable;
use crate::pattern::Pattern;

use fill::Filler;
pub use splice::splice;

/// Outcome of applying a template to a list of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Matches replaced.
    pub applied: usize,
    /// Matches skipped because an earlier replacement removed their target.
    pub skipped: usize,
}

/// Applies one compiled template.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'t> {
    template: &'t Pattern,
}

impl<'t> Rewriter<'t> {
    /// Creates a rewriter for `template`.
    #[must_use]
    pub const fn new(template: &'t Pattern) -> Self {
        Self { template }
    }

    /// Returns the template.
    #[must_use]
    pub const fn template(&self) -> &'t Pattern {
        self.template
    }

    /// Checks that every metavariable in the template is bound by `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnboundMetavariable`] naming the first
    /// template metavariable the pattern never binds.
    pub fn validate_against(&self, pattern: &Pattern) -> Result<(), RewriteError> {
        let bound: BTreeSet<&str> = pattern.names();
        self.template
            .metavariables()
            .iter()
            .find(|mv| mv.is_discard() || !bound.contains(mv.name.as_str()))
            .map_or(Ok(()), |mv| Err(RewriteError::unbound(&mv.name)))
    }

    /// Builds the replacement for one set of captures.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnboundMetavariable`] when the template uses a
    /// name missing from `captures`, [`RewriteError::SequenceInSingleSlot`]
    /// when a sequence capture lands in a single-node slot, and
    /// [`RewriteError::IncompatibleReplacement`] when a capture cannot be
    /// converted to its slot's category.
    pub fn fill(&self, captures: &BTreeMap<String, Fragment>) -> Result<Fragment, RewriteError> {
        Filler {
            template: self.template,
            captures,
        }
        .fragment()
    }

    /// Builds the replacement for one match.
    ///
    /// # Errors
    ///
    /// See [`Rewriter::fill`].
    pub fn rewrite(&self, result: &MatchResult) -> Result<Fragment, RewriteError> {
        self.fill(result.captures())
    }

    /// Replaces every match in `tree`, in order.
    ///
    /// The parent table is rebuilt after each splice. A match whose target
    /// an earlier replacement removed is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first fill or splice error; replacements made before it
    /// stay in `tree`.
    pub fn apply(
        &self,
        tree: &mut Node,
        results: &[MatchResult],
    ) -> Result<RewriteSummary, RewriteError> {
        let mut summary = RewriteSummary::default();
        for result in results {
            let table = ParentTable::build(tree);
            let target = result.target();
            if !table.contains(target.first()) {
                debug!(node = target.first().get(), "skipping stale match target");
                summary.skipped += 1;
                continue;
            }
            let replacement = self.rewrite(result)?;
            match splice(tree, &table, target, replacement) {
                Ok(()) => summary.applied += 1,
                Err(RewriteError::StaleTarget { node }) => {
                    debug!(node, "skipping stale match target");
                    summary.skipped += 1;
                }
                Err(error) => return Err(error),
            }
        }
        debug!(
            applied = summary.applied,
            skipped = summary.skipped,
            "rewrite finished"
        );
        Ok(summary)
    }
}
