//! Metavariable naming rules shared by the compiler, matcher and rewriter.
//!
//! Patterns write metavariables as `$name` (one node) and `$*name` (a
//! sequence). Before parsing, each occurrence is replaced by a synthetic Go
//! identifier `gopat_<index>`; the index selects the occurrence's entry in the
//! pattern's metavariable table.

use gopat_syntax::{Node, NodeKind};

pub(crate) const PLACEHOLDER_PREFIX: &str = "gopat_";

/// Statement standing for the body of a wildcard case clause.
pub(crate) const CLAUSE_BODY: &str = "gopat_body";

/// Name that matches without binding.
pub const DISCARD: &str = "_";

/// How many nodes a metavariable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaVarKind {
    /// Exactly one node (`$name`).
    Single,
    /// Zero or more list elements (`$*name`).
    Sequence,
}

/// One metavariable occurrence in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaVariable {
    /// Name without the `$` or `$*` prefix.
    pub name: String,
    /// Single or sequence.
    pub kind: MetaVarKind,
    /// Byte offset of the `$` in the pattern text.
    pub offset: usize,
}

impl MetaVariable {
    /// Returns whether this occurrence discards what it matches.
    #[must_use]
    pub fn is_discard(&self) -> bool {
        self.name == DISCARD
    }

    /// Returns whether this is a sequence metavariable.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.kind == MetaVarKind::Sequence
    }
}

/// Returns whether `c` may start a Go identifier.
#[must_use]
pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Returns whether `c` may continue a Go identifier.
#[must_use]
pub(crate) fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}

/// Builds the placeholder identifier for occurrence `index`.
#[must_use]
pub(crate) fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}")
}

/// Extracts the occurrence index from a placeholder identifier.
#[must_use]
pub(crate) fn placeholder_index(text: &str) -> Option<usize> {
    let digits = text.strip_prefix(PLACEHOLDER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Looks up the metavariable a node stands for, given the occurrence table.
///
/// Only identifiers can be placeholders.
#[must_use]
pub(crate) fn lookup<'v>(table: &'v [MetaVariable], node: &Node) -> Option<&'v MetaVariable> {
    let NodeKind::Ident(name) = &node.kind else {
        return None;
    };
    placeholder_index(name).and_then(|index| table.get(index))
}
