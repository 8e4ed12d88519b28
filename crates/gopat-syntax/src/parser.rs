//! Tree-sitter parsing wrapper with error recovery.
//!
//! This module wraps the raw Tree-sitter parser configured with the Go
//! grammar, exposes structured syntax errors, and lowers the concrete tree
//! into the [`Node`] model.

use std::ops::Range;

use tracing::debug;

use crate::error::SyntaxError;
use crate::lower::lower_file;
use crate::node::Node;
use crate::span::point_to_one_based;

/// Result of parsing Go source code.
///
/// Tree-sitter is error-tolerant, so a parse result may contain both a valid
/// tree and error nodes.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the parsed concrete syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns whether the parse result contains any syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Collects all syntax errors found in the parse result.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }

    /// Returns the root node of the concrete syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Lowers the concrete tree into a [`NodeKind::File`](crate::NodeKind::File).
    ///
    /// Error regions are lowered as `Bad` nodes.
    #[must_use]
    pub fn file(&self) -> Node {
        lower_file(self.tree.root_node(), &self.source)
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// A snippet of the problematic source text.
    pub context: String,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();

        let context = source
            .get(byte_range.clone())
            .map(|text| {
                if text.len() > 50 {
                    let truncated: String = text.chars().take(47).collect();
                    format!("{truncated}...")
                } else {
                    text.to_owned()
                }
            })
            .unwrap_or_default();

        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else if context.is_empty() {
            "syntax error".to_owned()
        } else {
            format!("syntax error near {context:?}")
        };

        let (line, column) = point_to_one_based(node.start_position());

        Self {
            byte_range,
            line,
            column,
            context,
            message,
        }
    }
}

/// Tree-sitter parser configured for Go.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a new Go parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised with
    /// the Go grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses source code and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing failed"))?;
        debug!(bytes = source.len(), "parsed Go source");
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

/// Parses a complete Go file and lowers it.
///
/// # Errors
///
/// Returns an error when the parser cannot be created or produces no tree.
pub fn parse_file(source: &str) -> Result<(Node, Vec<SyntaxErrorInfo>), SyntaxError> {
    let result = Parser::new()?.parse(source)?;
    Ok((result.file(), result.errors()))
}

fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(has_error_nodes);
    found
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}
