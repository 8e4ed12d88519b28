//! Error types for Go parsing operations.
//!
//! This module provides structured error types for the `gopat-syntax` crate:
//! initialising the Tree-sitter parser and producing syntax trees.

use thiserror::Error;

/// Errors from Go parsing operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the Go grammar.
    #[error("failed to initialise Go parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter could not produce a syntax tree.
    #[error("failed to parse Go source: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// The source parsed, but its root is not a Go source file.
    #[error("unexpected syntax tree shape: {message}")]
    UnexpectedShape {
        /// Description of the unexpected shape.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an unexpected shape error.
    #[must_use]
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            message: message.into(),
        }
    }
}
