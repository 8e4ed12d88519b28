//! Structural search and rewriting for Go syntax trees.
//!
//! Patterns are written in Go syntax extended with metavariables, then
//! matched against trees produced by [`gopat_syntax`]:
//!
//! - **Compilation** via [`Pattern::compile`], which tries the pattern text
//!   in turn as a whole file, declarations, expressions, statements, a type
//!   and finally a value spec
//! - **Matching** via [`Matcher`], including backtracking over statement and
//!   expression lists with a bounded restart budget
//! - **Filtering** via [`Predicate`], either attributes such as
//!   `rx("^err")` and `type(error)` or a nested pattern search
//! - **Rewriting** via [`Rewriter`], which fills a template from a match's
//!   captures and splices it into the tree
//! - **Navigation** via [`ParentTable`], mapping each node to its parent slot
//!
//! [`Engine`] bundles these operations under one
//! [`gopat_config::EngineConfig`].
//!
//! # Pattern Language
//!
//! - `$name` matches any single node and binds it; repeated names must match
//!   equal nodes
//! - `$*name` matches any run of list elements, including none
//! - `$_` and `$*_` match without binding
//! - A leading `~` enables aggressive mode, which relaxes some comparisons
//!   such as `=` against `:=`
//!
//! # Example
//!
//! ```
//! use gopat::Engine;
//! use gopat_syntax::parse_file;
//!
//! let (mut tree, _) = parse_file("package p\n\nfunc f() { fmt.Println(1) }\n")?;
//! let engine = Engine::default();
//! let pattern = engine.compile("fmt.Println($x)")?;
//! let template = engine.compile("fmt.Print($x)")?;
//! let matches: Vec<_> = engine.find(&tree, &pattern).collect();
//! engine.substitute(&mut tree, &matches, &template)?;
//! # Ok::<(), gopat::GopatError>(())
//! ```

mod attribute;
mod engine;
mod error;
mod loader;
mod matcher;
mod metavariables;
mod parents;
mod pattern;
mod rewriter;
mod types;

pub use attribute::{Attribute, AttributeSet, Predicate, TypeRelation};
pub use engine::Engine;
pub use error::{CompileError, GopatError, LoadError, PredicateError, RewriteError};
pub use loader::{Target, load_targets};
pub use matcher::{ListMatch, MatchResult, MatchStats, MatchTarget, Matcher, Matches};
pub use metavariables::{DISCARD, MetaVarKind, MetaVariable};
pub use parents::{ParentLink, ParentTable, SlotRef};
pub use pattern::Pattern;
pub use rewriter::{RewriteSummary, Rewriter, splice};
pub use types::{
    BasicKind, GoType, KindClass, StructField, TypeInfo, TypeTable, resolve_type, universe,
};

#[cfg(test)]
mod tests;
