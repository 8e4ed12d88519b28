//! Operator and keyword tokens carried by syntax nodes.
//!
//! Each token parses from and displays as its Go spelling.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prefix operators of unary expressions.
///
/// Dereference (`*x`) is represented by [`NodeKind::Star`](super::NodeKind::Star).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum UnaryOp {
    /// `+x`
    #[strum(serialize = "+")]
    Plus,
    /// `-x`
    #[strum(serialize = "-")]
    Minus,
    /// `!x`
    #[strum(serialize = "!")]
    Not,
    /// `^x`
    #[strum(serialize = "^")]
    Xor,
    /// `&x`
    #[strum(serialize = "&")]
    Addr,
    /// `<-x`
    #[strum(serialize = "<-")]
    Recv,
    /// `~T` in constraints.
    #[strum(serialize = "~")]
    Tilde,
}

/// Infix operators of binary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum BinaryOp {
    /// `+`
    #[strum(serialize = "+")]
    Add,
    /// `-`
    #[strum(serialize = "-")]
    Sub,
    /// `*`
    #[strum(serialize = "*")]
    Mul,
    /// `/`
    #[strum(serialize = "/")]
    Quo,
    /// `%`
    #[strum(serialize = "%")]
    Rem,
    /// `&`
    #[strum(serialize = "&")]
    And,
    /// `|`
    #[strum(serialize = "|")]
    Or,
    /// `^`
    #[strum(serialize = "^")]
    Xor,
    /// `<<`
    #[strum(serialize = "<<")]
    Shl,
    /// `>>`
    #[strum(serialize = ">>")]
    Shr,
    /// `&^`
    #[strum(serialize = "&^")]
    AndNot,
    /// `&&`
    #[strum(serialize = "&&")]
    LogAnd,
    /// `||`
    #[strum(serialize = "||")]
    LogOr,
    /// `==`
    #[strum(serialize = "==")]
    Eq,
    /// `!=`
    #[strum(serialize = "!=")]
    Neq,
    /// `<`
    #[strum(serialize = "<")]
    Lss,
    /// `<=`
    #[strum(serialize = "<=")]
    Leq,
    /// `>`
    #[strum(serialize = ">")]
    Gtr,
    /// `>=`
    #[strum(serialize = ">=")]
    Geq,
}

impl BinaryOp {
    /// Returns the Go precedence level, from 1 (`||`) to 5 (multiplicative).
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::LogOr => 1,
            Self::LogAnd => 2,
            Self::Eq | Self::Neq | Self::Lss | Self::Leq | Self::Gtr | Self::Geq => 3,
            Self::Add | Self::Sub | Self::Or | Self::Xor => 4,
            Self::Mul | Self::Quo | Self::Rem | Self::Shl | Self::Shr | Self::And | Self::AndNot => {
                5
            }
        }
    }
}

/// Assignment and definition tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum AssignOp {
    /// `=`
    #[strum(serialize = "=")]
    Assign,
    /// `:=`
    #[strum(serialize = ":=")]
    Define,
    /// `+=`
    #[strum(serialize = "+=")]
    Add,
    /// `-=`
    #[strum(serialize = "-=")]
    Sub,
    /// `*=`
    #[strum(serialize = "*=")]
    Mul,
    /// `/=`
    #[strum(serialize = "/=")]
    Quo,
    /// `%=`
    #[strum(serialize = "%=")]
    Rem,
    /// `&=`
    #[strum(serialize = "&=")]
    And,
    /// `|=`
    #[strum(serialize = "|=")]
    Or,
    /// `^=`
    #[strum(serialize = "^=")]
    Xor,
    /// `<<=`
    #[strum(serialize = "<<=")]
    Shl,
    /// `>>=`
    #[strum(serialize = ">>=")]
    Shr,
    /// `&^=`
    #[strum(serialize = "&^=")]
    AndNot,
}

/// Branch statement keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BranchKind {
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `goto`
    Goto,
    /// `fallthrough`
    Fallthrough,
}

/// Keyword introducing a generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DeclKind {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `type`
    Type,
    /// `var`
    Var,
}

/// Channel direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
pub enum ChanDir {
    /// `chan T`
    #[strum(serialize = "chan")]
    Both,
    /// `chan<- T`
    #[strum(serialize = "chan<-")]
    Send,
    /// `<-chan T`
    #[strum(serialize = "<-chan")]
    Recv,
}

/// Kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LitKind {
    /// Integer literal.
    Int,
    /// Floating-point literal.
    Float,
    /// Imaginary literal.
    Imag,
    /// Rune literal.
    Char,
    /// Interpreted or raw string literal.
    String,
}
