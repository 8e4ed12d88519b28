//! Error types for pattern compilation, predicates, rewriting and loading.
//!
//! No-match and an inapplicable predicate are ordinary outcomes, never
//! errors. Everything here is fatal for the operation that raised it.

use camino::Utf8PathBuf;
use gopat_syntax::{NodeId, SyntaxError};
use thiserror::Error;

/// A pattern or template that could not be compiled.
///
/// Positions are one-based and refer to the text the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct CompileError {
    /// One-based line.
    pub line: u32,
    /// One-based column, in bytes.
    pub column: u32,
    /// Description of the problem.
    pub message: String,
}

impl CompileError {
    /// Creates a compile error at a one-based position.
    #[must_use]
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a compile error at byte `offset` of `text`.
    #[must_use]
    pub fn at_offset(text: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(text, offset);
        Self::new(line, column, message)
    }
}

/// Converts a byte offset into one-based line and column numbers.
pub(crate) fn line_column(text: &str, offset: usize) -> (u32, u32) {
    let prefix = text.get(..offset).unwrap_or(text);
    let line = prefix.matches('\n').count().saturating_add(1);
    let column = prefix
        .rfind('\n')
        .map_or(prefix.len(), |newline| prefix.len().saturating_sub(newline + 1))
        .saturating_add(1);
    (saturate(line), saturate(column))
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Attribute predicate text that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid predicate at byte {offset}: {message}")]
pub struct PredicateError {
    /// Byte offset into the predicate text.
    pub offset: usize,
    /// Description of the problem.
    pub message: String,
}

impl PredicateError {
    /// Creates a predicate error at `offset`.
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Errors raised while filling templates or splicing replacements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// A sequence capture was used where only one node fits.
    #[error("sequence capture ${name} used in a single-node position")]
    SequenceInSingleSlot {
        /// Metavariable name.
        name: String,
    },

    /// The template references a metavariable the match did not bind.
    #[error("template references unbound metavariable ${name}")]
    UnboundMetavariable {
        /// Metavariable name.
        name: String,
    },

    /// The replaced node has no recorded slot in its parent.
    #[error("no parent slot recorded for node {node}")]
    ParentSlotNotFound {
        /// Identity of the orphaned node.
        node: u32,
    },

    /// The replacement cannot occupy the target's slot.
    #[error("cannot place {found} where {expected} is required")]
    IncompatibleReplacement {
        /// What the slot accepts.
        expected: &'static str,
        /// What the replacement is.
        found: &'static str,
    },

    /// The match target no longer exists in the tree.
    #[error("match target {node} no longer exists")]
    StaleTarget {
        /// Identity of the missing node.
        node: u32,
    },
}

impl RewriteError {
    /// Creates a [`RewriteError::SequenceInSingleSlot`].
    #[must_use]
    pub fn sequence_in_single_slot(name: impl Into<String>) -> Self {
        Self::SequenceInSingleSlot { name: name.into() }
    }

    /// Creates a [`RewriteError::UnboundMetavariable`].
    #[must_use]
    pub fn unbound(name: impl Into<String>) -> Self {
        Self::UnboundMetavariable { name: name.into() }
    }

    /// Creates a [`RewriteError::ParentSlotNotFound`].
    #[must_use]
    pub const fn parent_slot_not_found(node: NodeId) -> Self {
        Self::ParentSlotNotFound { node: node.get() }
    }

    /// Creates a [`RewriteError::IncompatibleReplacement`].
    #[must_use]
    pub const fn incompatible(expected: &'static str, found: &'static str) -> Self {
        Self::IncompatibleReplacement { expected, found }
    }

    /// Creates a [`RewriteError::StaleTarget`].
    #[must_use]
    pub const fn stale(node: NodeId) -> Self {
        Self::StaleTarget { node: node.get() }
    }
}

/// Errors raised while loading target files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The parser could not produce a tree.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying syntax error.
        source: SyntaxError,
    },
}

/// Umbrella error for the query API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GopatError {
    /// Pattern or template compilation failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// Predicate compilation failed.
    #[error(transparent)]
    Predicate(#[from] PredicateError),
    /// Rewriting failed.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// Parsing failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Loading failed.
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abc", 0, (1, 1))]
    #[case("abc", 2, (1, 3))]
    #[case("a\nbc", 2, (2, 1))]
    #[case("a\nbc", 3, (2, 2))]
    #[case("a\n\nx", 3, (3, 1))]
    fn offsets_convert_to_one_based_positions(
        #[case] text: &str,
        #[case] offset: usize,
        #[case] expected: (u32, u32),
    ) {
        assert_eq!(line_column(text, offset), expected);
    }

    #[test]
    fn compile_error_displays_position() {
        let error = CompileError::at_offset("x @", 2, "illegal character U+0040 '@'");
        assert_eq!(error.to_string(), "1:3: illegal character U+0040 '@'");
    }
}
