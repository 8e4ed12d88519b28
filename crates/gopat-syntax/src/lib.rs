//! Go syntax trees for structural search and rewriting.
//!
//! This crate turns Go source into an owned, closed node model that the
//! `gopat` engine matches and rewrites:
//!
//! - **Parsing** via [`Parser`], a Tree-sitter wrapper configured with the Go
//!   grammar that reports syntax errors with one-based positions
//! - **Lowering** of the concrete tree into [`Node`]s with stable
//!   [`NodeId`]s and byte/line spans
//! - **Child slots** via [`Node::slots`] and [`Node::slots_mut`], giving every
//!   variant a fixed child order that side tables can index into
//! - **Printing** via [`print_node`] and [`print_fragment`]
//!
//! # Example
//!
//! ```
//! use gopat_syntax::{Parser, print_node};
//!
//! let mut parser = Parser::new()?;
//! let result = parser.parse("package p\n\nfunc f() { x := 1 }\n")?;
//! let file = result.file();
//! assert!(print_node(&file).contains("x := 1"));
//! # Ok::<(), gopat_syntax::SyntaxError>(())
//! ```

mod error;
mod lower;
mod node;
mod parser;
mod printer;
mod span;

pub use error::SyntaxError;
pub use node::{
    AssignOp, BinaryOp, BranchKind, ChanDir, DeclKind, Descendants, Fragment, LitKind, ListKind,
    Node, NodeId, NodeKind, NodeList, Slot, SlotMut, UnaryOp, span_of,
};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo, parse_file};
pub use printer::{print_fragment, print_list, print_node};
pub use span::{LineCol, Span, point_to_one_based};

#[cfg(test)]
mod tests;
