//! Pattern compilation.
//!
//! A pattern is ordinary Go source with two extra lexical forms:
//!
//! - `$name` matches any single node and binds it as `name`
//! - `$*name` matches zero or more list elements and binds them as `name`
//!
//! The name `_` matches without binding. A leading `~` enables aggressive
//! mode, which relaxes some comparisons (see the matcher documentation).
//! Templates passed to the rewriter are compiled the same way.

mod cascade;
mod lexer;

use std::collections::BTreeSet;

use gopat_syntax::{Fragment, Node, NodeKind};
use tracing::debug;

use crate::error::CompileError;
use crate::metavariables::{self, MetaVariable};

/// A compiled pattern or template.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    root: Fragment,
    metavariables: Vec<MetaVariable>,
    aggressive: bool,
}

impl Pattern {
    /// Compiles pattern text.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] positioned in `source` when the text is
    /// empty, contains characters outside Go's lexical set, or does not
    /// parse as any supported fragment kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use gopat::Pattern;
    ///
    /// let pattern = Pattern::compile("fmt.Println($*args)")?;
    /// assert_eq!(pattern.names().len(), 1);
    /// # Ok::<(), gopat::CompileError>(())
    /// ```
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        if source.trim().is_empty() {
            return Err(CompileError::new(1, 1, "empty pattern"));
        }
        let scanned = lexer::scan(source)?;
        if scanned.text.trim().is_empty() {
            let offset = source.len() - source.trim_start().len();
            return Err(CompileError::at_offset(source, offset, "empty pattern"));
        }
        let root = cascade::parse_fragment(&scanned, source)?;
        debug!(
            metavariables = scanned.metavars.len(),
            aggressive = scanned.aggressive,
            "compiled pattern"
        );
        Ok(Self {
            source: source.to_owned(),
            root,
            metavariables: scanned.metavars,
            aggressive: scanned.aggressive,
        })
    }

    /// Returns the pattern text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled tree with metavariables as placeholder
    /// identifiers.
    #[must_use]
    pub const fn root(&self) -> &Fragment {
        &self.root
    }

    /// Returns every metavariable occurrence in source order.
    #[must_use]
    pub fn metavariables(&self) -> &[MetaVariable] {
        &self.metavariables
    }

    /// Returns the distinct binding names, excluding `_`.
    #[must_use]
    pub fn names(&self) -> BTreeSet<&str> {
        self.metavariables
            .iter()
            .filter(|mv| !mv.is_discard())
            .map(|mv| mv.name.as_str())
            .collect()
    }

    /// Returns whether aggressive matching is enabled.
    #[must_use]
    pub const fn aggressive(&self) -> bool {
        self.aggressive
    }

    /// Enables or disables aggressive matching.
    #[must_use]
    pub const fn with_aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    /// Returns the metavariable `node` stands for, if it is a placeholder.
    pub(crate) fn metavar(&self, node: &Node) -> Option<&MetaVariable> {
        metavariables::lookup(&self.metavariables, node)
    }

    /// Returns the sequence metavariable a list element stands for.
    ///
    /// Recognised shapes are a placeholder identifier, an expression
    /// statement wrapping one, a field whose only content is a placeholder
    /// type, and a wildcard case or comm clause.
    pub(crate) fn sequence_wildcard(&self, node: &Node) -> Option<&MetaVariable> {
        self.list_wildcard(node).filter(|mv| mv.is_sequence())
    }

    /// Returns the metavariable a whole list element stands for, whatever
    /// its multiplicity.
    pub(crate) fn list_wildcard(&self, node: &Node) -> Option<&MetaVariable> {
        match &node.kind {
            NodeKind::Ident(_) => self.metavar(node),
            NodeKind::ExprStmt(inner) => self.metavar(inner),
            NodeKind::Field {
                names,
                ty: Some(ty),
                tag: None,
            } if names.is_empty() => self.metavar(ty),
            NodeKind::CaseClause { list, body } => {
                match (list.items.as_slice(), body.items.as_slice()) {
                    ([head], [stmt]) if is_clause_body(stmt) => self.metavar(head),
                    _ => None,
                }
            }
            NodeKind::CommClause {
                comm: Some(comm),
                body,
            } => match (&comm.kind, body.items.as_slice()) {
                (NodeKind::ExprStmt(head), [stmt]) if is_clause_body(stmt) => self.metavar(head),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns whether `name` occurs more than once in the pattern.
    pub(crate) fn is_repeated(&self, name: &str) -> bool {
        self.metavariables
            .iter()
            .filter(|mv| mv.name == name)
            .nth(1)
            .is_some()
    }
}

fn is_clause_body(stmt: &Node) -> bool {
    match &stmt.kind {
        NodeKind::ExprStmt(inner) => inner.as_ident() == Some(metavariables::CLAUSE_BODY),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use gopat_syntax::{ListKind, print_fragment};
    use rstest::rstest;

    use super::*;
    use crate::metavariables::MetaVarKind;

    fn compile(text: &str) -> Pattern {
        Pattern::compile(text).unwrap_or_else(|err| panic!("compile {text:?}: {err}"))
    }

    #[rstest]
    #[case("package p; func f() {}", "File")]
    #[case("func f() {}", "FuncDecl")]
    #[case("var x = 1", "GenDecl")]
    #[case("$x + 1", "Binary")]
    #[case("fmt.Println($*_)", "Call")]
    #[case("x = 1", "AssignStmt")]
    #[case("if $c { $*_ }", "IfStmt")]
    #[case("map[string]$t", "MapType")]
    #[case("x, y int", "ValueSpec")]
    fn single_fragments_compile_to_nodes(#[case] text: &str, #[case] kind: &str) {
        let pattern = compile(text);
        let node = pattern.root().as_node().expect("single node");
        assert_eq!(node.kind.name(), kind);
    }

    #[rstest]
    #[case("a, b", ListKind::Expr, 2)]
    #[case("$*_; return $a", ListKind::Stmt, 2)]
    #[case("x := 1; y := 2; z := 3", ListKind::Stmt, 3)]
    #[case("func a() {}; func b() {}", ListKind::Decl, 2)]
    fn multiple_elements_compile_to_lists(
        #[case] text: &str,
        #[case] kind: ListKind,
        #[case] len: usize,
    ) {
        let pattern = compile(text);
        let list = pattern.root().as_list().expect("list fragment");
        assert_eq!((list.kind, list.len()), (kind, len));
    }

    #[test]
    fn compiled_pattern_has_no_positions() {
        let pattern = compile("foo($x, 2)");
        let node = pattern.root().as_node().expect("node");
        assert!(node.descendants().all(|n| n.span().is_none()));
    }

    #[test]
    fn metavariable_table_records_names_and_kinds() {
        let pattern = compile("$f($*args, $f)");
        let names: Vec<_> = pattern
            .metavariables()
            .iter()
            .map(|mv| (mv.name.as_str(), mv.kind))
            .collect();
        assert_eq!(
            names,
            [
                ("f", MetaVarKind::Single),
                ("args", MetaVarKind::Sequence),
                ("f", MetaVarKind::Single),
            ]
        );
        assert!(pattern.is_repeated("f"));
        assert!(!pattern.is_repeated("args"));
        assert_eq!(pattern.names().into_iter().collect::<Vec<_>>(), ["args", "f"]);
    }

    #[test]
    fn keyword_names_are_allowed() {
        let pattern = compile("$func($type)");
        assert_eq!(pattern.names().len(), 2);
        assert_eq!(print_fragment(pattern.root()), "gopat_0(gopat_1)");
    }

    #[test]
    fn tilde_sets_aggressive_mode() {
        assert!(compile("~ $x = $y").aggressive());
        assert!(!compile("$x = $y").aggressive());
        assert!(compile("$x").with_aggressive(true).aggressive());
    }

    #[rstest]
    #[case("", 1, 1, "empty pattern")]
    #[case("   \n ", 1, 1, "empty pattern")]
    #[case("~", 1, 1, "empty pattern")]
    #[case("a @ b", 1, 3, "illegal character U+0040 '@'")]
    #[case("$", 1, 1, "$ must be followed by an identifier")]
    fn invalid_patterns_report_positions(
        #[case] text: &str,
        #[case] line: u32,
        #[case] column: u32,
        #[case] message: &str,
    ) {
        let error = Pattern::compile(text).expect_err("compile should fail");
        assert_eq!(error, CompileError::new(line, column, message));
    }

    #[test]
    fn parse_errors_stay_inside_the_pattern() {
        let text = "foo(\n  $x +)";
        let error = Pattern::compile(text).expect_err("compile should fail");
        assert!(!error.message.is_empty());
        assert!(error.line <= 2, "line {} outside the pattern", error.line);
    }

    #[test]
    fn clause_wildcards_are_recognised() {
        let pattern = compile("switch $x { $*_ }");
        let Some(NodeKind::SwitchStmt { body, .. }) = pattern.root().as_node().map(|n| &n.kind)
        else {
            panic!("expected a switch");
        };
        let NodeKind::BlockStmt { stmts } = &body.kind else {
            panic!("expected a block");
        };
        let clause = stmts.items.first().expect("clause");
        let mv = pattern.sequence_wildcard(clause).expect("clause wildcard");
        assert_eq!(mv.name, "_");
    }
}
