//! Matching of pattern lists against candidate lists.
//!
//! Sequence metavariables are resolved like a regular-expression `*` over
//! list elements: the empty span is tried first, and a restart frame
//! remembers how to retry with the span grown by one element. Frames live on
//! an explicit stack, so search depth never depends on list length.
//!
//! Two shortcuts keep the search linear in the candidate length:
//!
//! - Reaching a sequence metavariable discards every earlier frame when no
//!   name bound before it is referenced at or after it. Any success those
//!   frames could still reach is also reachable by growing the newer span.
//! - A sequence metavariable followed only by single-element patterns has
//!   exactly one possible span in an anchored match, so it pushes no frame.

use std::collections::BTreeSet;
use std::ops::Range;

use gopat_syntax::{ListKind, Node};
use tracing::warn;

use super::Matcher;
use super::capture::Env;
use super::node::bind_slice;
use crate::metavariables::DISCARD;
use crate::pattern::Pattern;

struct Frame<'a> {
    env: Env<'a>,
    index: usize,
    name: &'a str,
    start: usize,
    end: usize,
}

struct Search<'a> {
    patterns: &'a [Node],
    candidates: &'a [Node],
    kind: ListKind,
    partial: bool,
    /// Whether a wildcard at each pattern index may drop earlier frames.
    cuts: Vec<bool>,
    /// Number of elements after each pattern index, when none of them is a
    /// sequence metavariable.
    fixed_tails: Vec<Option<usize>>,
}

enum Outcome {
    Matched(usize),
    Failed,
    Exhausted,
}

enum Tail {
    Open,
    Forced(usize),
    TooShort,
}

impl<'a> Matcher<'a> {
    /// Matches `patterns` against `candidates`.
    ///
    /// With `partial` set the match may start after the first candidate and
    /// end before the last. Returns the matched span of `candidates`; on
    /// failure `env` is left as it was.
    pub(crate) fn sequence(
        &mut self,
        patterns: &'a [Node],
        candidates: &'a [Node],
        kind: ListKind,
        partial: bool,
        env: &mut Env<'a>,
    ) -> Option<Range<usize>> {
        let table: &'a Pattern = self.pattern;
        let names: Vec<BTreeSet<&str>> = patterns
            .iter()
            .map(|element| bound_names(table, element))
            .collect();
        let search = Search {
            patterns,
            candidates,
            kind,
            partial,
            cuts: cut_points(&names),
            fixed_tails: fixed_tails(table, patterns),
        };
        let unconstrained = names.iter().enumerate().all(|(index, set)| {
            names
                .iter()
                .skip(index + 1)
                .all(|other| set.is_disjoint(other))
        });
        let anchored = patterns
            .first()
            .is_some_and(|first| table.sequence_wildcard(first).is_some());
        let last_start = if partial && !anchored { candidates.len() } else { 0 };

        let base = env.clone();
        let mut restarts = 0;
        for start in 0..=last_start {
            match self.search_from(&search, start, env, &mut restarts) {
                (Outcome::Matched(end), _) => return Some(start..end),
                (Outcome::Failed, true) if unconstrained => break,
                (Outcome::Failed, _) => *env = base.clone(),
                (Outcome::Exhausted, _) => {
                    self.stats.exhausted += 1;
                    warn!(
                        budget = self.restart_budget,
                        candidates = candidates.len(),
                        "list match abandoned after exhausting its restart budget"
                    );
                    break;
                }
            }
        }
        *env = base;
        None
    }

    /// Runs one anchored search; the flag reports whether a cut happened.
    fn search_from(
        &mut self,
        search: &Search<'a>,
        start: usize,
        env: &mut Env<'a>,
        restarts: &mut usize,
    ) -> (Outcome, bool) {
        let table: &'a Pattern = self.pattern;
        let mut stack: Vec<Frame<'a>> = Vec::new();
        let mut cut = false;
        let (mut i1, mut i2) = (0, start);
        let mut advanced = true;

        loop {
            if !advanced {
                let Some(frame) = stack.pop() else {
                    return (Outcome::Failed, cut);
                };
                *restarts += 1;
                self.stats.restarts += 1;
                if *restarts > self.restart_budget {
                    return (Outcome::Exhausted, cut);
                }
                let Frame {
                    env: saved,
                    index,
                    name,
                    start: span_start,
                    end,
                } = frame;
                if end < search.candidates.len() {
                    stack.push(Frame {
                        env: saved.clone(),
                        index,
                        name,
                        start: span_start,
                        end: end + 1,
                    });
                }
                *env = saved;
                let span = search.candidates.get(span_start..end).unwrap_or_default();
                advanced = bind_slice(env, name, search.kind, span);
                if advanced {
                    i1 = index + 1;
                    i2 = end;
                }
                continue;
            }

            let Some(element) = search.patterns.get(i1) else {
                if i2 == search.candidates.len() || search.partial {
                    return (Outcome::Matched(i2), cut);
                }
                advanced = false;
                continue;
            };

            if let Some(mv) = table.sequence_wildcard(element) {
                if search.cuts.get(i1).copied().unwrap_or(false) {
                    stack.clear();
                    cut = true;
                }
                match search.tail(i1, i2) {
                    Tail::Forced(end) => {
                        let span = search.candidates.get(i2..end).unwrap_or_default();
                        advanced = bind_slice(env, &mv.name, search.kind, span);
                        if advanced {
                            i1 += 1;
                            i2 = end;
                        }
                        continue;
                    }
                    Tail::TooShort => {
                        advanced = false;
                        continue;
                    }
                    Tail::Open => {}
                }
                if i2 < search.candidates.len() {
                    stack.push(Frame {
                        env: env.clone(),
                        index: i1,
                        name: &mv.name,
                        start: i2,
                        end: i2 + 1,
                    });
                }
                let empty = search.candidates.get(i2..i2).unwrap_or_default();
                advanced = bind_slice(env, &mv.name, search.kind, empty);
                if advanced {
                    i1 += 1;
                }
                continue;
            }

            advanced = match search.candidates.get(i2) {
                Some(candidate) => self.node(element, candidate, env),
                None => false,
            };
            if advanced {
                i1 += 1;
                i2 += 1;
            }
        }
    }
}

impl Search<'_> {
    /// Decides the span of the sequence metavariable at `index` when it
    /// starts at `from` and the rest of the pattern has a fixed length.
    fn tail(&self, index: usize, from: usize) -> Tail {
        let len = self.candidates.len();
        match self.fixed_tails.get(index).copied().flatten() {
            Some(0) => Tail::Forced(len),
            Some(rest) if !self.partial => match len.checked_sub(rest) {
                Some(end) if end >= from => Tail::Forced(end),
                _ => Tail::TooShort,
            },
            _ => Tail::Open,
        }
    }
}

/// Collects the non-discard metavariable names occurring in `element`.
fn bound_names<'p>(table: &'p Pattern, element: &Node) -> BTreeSet<&'p str> {
    element
        .descendants()
        .filter_map(|node| table.metavar(node))
        .filter(|mv| mv.name != DISCARD)
        .map(|mv| mv.name.as_str())
        .collect()
}

/// Marks the indices whose elements share no name with any earlier element.
fn cut_points(names: &[BTreeSet<&str>]) -> Vec<bool> {
    let mut before = BTreeSet::new();
    let mut cuts = Vec::with_capacity(names.len());
    for (index, element_names) in names.iter().enumerate() {
        let later = names.get(index..).unwrap_or_default();
        cuts.push(later.iter().all(|set| set.is_disjoint(&before)));
        before.extend(element_names.iter().copied());
    }
    cuts
}

fn fixed_tails(table: &Pattern, patterns: &[Node]) -> Vec<Option<usize>> {
    let mut tails: Vec<Option<usize>> = patterns
        .iter()
        .rev()
        .scan(Some(0_usize), |fixed, element| {
            let current = *fixed;
            *fixed = if table.sequence_wildcard(element).is_some() {
                None
            } else {
                fixed.map(|count| count + 1)
            };
            Some(current)
        })
        .collect();
    tails.reverse();
    tails
}
