//! Source span and position types for locating syntax nodes.
//!
//! Tree-sitter positions are zero-based. Spans keep that convention; the
//! [`point_to_one_based`] helper converts for user-facing messages.

use serde::{Deserialize, Serialize};

/// A line and column position within a source file.
///
/// Both fields are zero-indexed to match Tree-sitter conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineCol {
    /// Zero-indexed line number.
    pub line: u32,
    /// Zero-indexed column number (byte offset within the line).
    pub column: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A byte and line/column span in a UTF-8 source.
///
/// The byte range is half-open: `start_byte` is inclusive and `end_byte` is
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start_byte: u32,
    /// End byte offset (exclusive).
    pub end_byte: u32,
    /// Start position as line and column.
    pub start: LineCol,
    /// End position as line and column.
    pub end: LineCol,
}

impl Span {
    /// Creates a new span from byte offsets and line/column positions.
    #[must_use]
    pub const fn new(start_byte: u32, end_byte: u32, start: LineCol, end: LineCol) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }

    /// Creates a zero-width span at the start of `self`.
    #[must_use]
    pub const fn start_point(&self) -> Self {
        Self::new(self.start_byte, self.start_byte, self.start, self.start)
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(&self, other: &Self) -> Self {
        let (start_byte, start) = if other.start_byte < self.start_byte {
            (other.start_byte, other.start)
        } else {
            (self.start_byte, self.start)
        };
        let (end_byte, end) = if other.end_byte > self.end_byte {
            (other.end_byte, other.end)
        } else {
            (self.end_byte, self.end)
        };
        Self::new(start_byte, end_byte, start, end)
    }

    /// Returns the byte length of the span.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Returns whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn from_ts(node: tree_sitter::Node<'_>) -> Self {
        Self::new(
            saturate(node.start_byte()),
            saturate(node.end_byte()),
            point_to_line_col(node.start_position()),
            point_to_line_col(node.end_position()),
        )
    }
}

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

fn point_to_line_col(pos: tree_sitter::Point) -> LineCol {
    LineCol::new(saturate(pos.row), saturate(pos.column))
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
