//! Post-match predicates over names and semantic facts.
//!
//! Attribute text is a list of `;`-terminated attributes that must all hold:
//!
//! - `rx("re")`: the node is an identifier whose whole name matches `re`
//! - `type(T)`, `asgn(T)`, `conv(T)`: the node's type is identical,
//!   assignable or convertible to `T`
//! - `comp`, `addr`: the node's type is comparable, or the node is
//!   addressable
//! - `is(kind)`: the underlying type is a basic, array, slice, struct,
//!   interface, pointer, func, map or chan type
//!
//! Nodes without a type satisfy none of the type attributes, and an
//! expression statement is judged by its expression.

mod parser;

use gopat_config::EngineConfig;
use gopat_syntax::{Fragment, Node, NodeKind};
use regex::Regex;

use crate::error::PredicateError;
use crate::matcher::{MatchResult, Matcher};
use crate::pattern::Pattern;
use crate::types::{GoType, KindClass, TypeInfo, resolve_type};

/// How a node's type must relate to a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRelation {
    /// `type(T)`
    Identical,
    /// `asgn(T)`
    Assignable,
    /// `conv(T)`
    Convertible,
}

impl TypeRelation {
    /// Returns whether `actual` relates to `wanted`.
    #[must_use]
    pub fn holds(self, actual: &GoType, wanted: &GoType) -> bool {
        match self {
            Self::Identical => actual.identical(wanted),
            Self::Assignable => actual.assignable_to(wanted),
            Self::Convertible => actual.convertible_to(wanted),
        }
    }
}

/// One compiled attribute.
#[derive(Debug, Clone)]
pub enum Attribute {
    /// Anchored identifier-name regex.
    Regex(Regex),
    /// Type relation to a type expression, resolved when evaluated.
    Type {
        /// Required relation.
        relation: TypeRelation,
        /// Type expression as parsed.
        expr: Node,
    },
    /// Comparable type.
    Comparable,
    /// Addressable value.
    Addressable,
    /// Underlying-kind class.
    Kind(KindClass),
}

impl Attribute {
    /// Returns whether the attribute holds for `node`.
    #[must_use]
    pub fn applies(&self, node: &Node, info: &dyn TypeInfo) -> bool {
        let subject = match &node.kind {
            NodeKind::ExprStmt(inner) => &**inner,
            _ => node,
        };
        match self {
            Self::Regex(re) => subject.as_ident().is_some_and(|name| re.is_match(name)),
            Self::Type { relation, expr } => {
                match (info.type_of(subject), resolve_type(expr, info)) {
                    (Some(actual), Some(wanted)) => relation.holds(&actual, &wanted),
                    _ => false,
                }
            }
            Self::Comparable => info.type_of(subject).is_some_and(|ty| ty.comparable()),
            Self::Addressable => {
                info.type_of(subject).is_some() && info.is_addressable(subject)
            }
            Self::Kind(class) => info.type_of(subject).is_some_and(|ty| ty.class() == *class),
        }
    }
}

/// A conjunction of attributes compiled from predicate text.
#[derive(Debug, Clone)]
pub struct AttributeSet {
    source: String,
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    /// Compiles predicate text.
    ///
    /// # Errors
    ///
    /// Returns a [`PredicateError`] for empty text, unknown attributes,
    /// missing `;` terminators, invalid regexes, unparsable type expressions
    /// and unknown kind names.
    pub fn parse(text: &str) -> Result<Self, PredicateError> {
        Ok(Self {
            source: text.to_owned(),
            attributes: parser::parse(text)?,
        })
    }

    /// Returns the predicate text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled attributes in order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns whether every attribute holds for `node`.
    #[must_use]
    pub fn applies(&self, node: &Node, info: &dyn TypeInfo) -> bool {
        self.attributes
            .iter()
            .all(|attribute| attribute.applies(node, info))
    }
}

/// A test applied to each match by a filter.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Attributes of the matched node; list matches never satisfy them.
    Attributes(AttributeSet),
    /// The pattern occurs inside the matched content, consistently with the
    /// match's bindings.
    Contains(Pattern),
}

impl Predicate {
    /// Returns whether the predicate holds for `result`.
    #[must_use]
    pub fn holds(&self, result: &MatchResult, info: &dyn TypeInfo, config: &EngineConfig) -> bool {
        match (self, result.matched()) {
            (Self::Attributes(set), Fragment::Node(node)) => set.applies(node, info),
            (Self::Attributes(_), Fragment::List(_)) => false,
            (Self::Contains(pattern), Fragment::Node(node)) => {
                contains(pattern, std::slice::from_ref(node), result, config)
            }
            (Self::Contains(pattern), Fragment::List(list)) => {
                contains(pattern, &list.items, result, config)
            }
        }
    }
}

impl From<AttributeSet> for Predicate {
    fn from(set: AttributeSet) -> Self {
        Self::Attributes(set)
    }
}

fn contains(
    pattern: &Pattern,
    roots: &[Node],
    result: &MatchResult,
    config: &EngineConfig,
) -> bool {
    roots.iter().any(|root| {
        Matcher::with_config(pattern, config)
            .find_with(root, result.captures())
            .next()
            .is_some()
    })
}
