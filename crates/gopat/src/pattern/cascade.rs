//! Fragment parse cascade.
//!
//! Go's grammar has no entry point for a bare expression or statement, so a
//! pattern is wrapped in the smallest enclosing file that makes it parse.
//! Attempts run from the widest fragment kind to the narrowest; the first
//! one that parses cleanly and has the expected shape wins.

use gopat_syntax::{Fragment, ListKind, Node, NodeKind, NodeList, Parser};
use tracing::{debug, trace};

use super::lexer::Scanned;
use crate::error::CompileError;

const PACKAGE: &str = "package p; ";

struct Attempt {
    name: &'static str,
    preamble: &'static str,
    suffix: &'static str,
    extract: fn(Node) -> Option<Fragment>,
}

const ATTEMPTS: [Attempt; 6] = [
    Attempt {
        name: "file",
        preamble: "",
        suffix: "",
        extract: whole_file,
    },
    Attempt {
        name: "declarations",
        preamble: PACKAGE,
        suffix: "",
        extract: declarations,
    },
    Attempt {
        name: "expressions",
        preamble: "package p; var _ = []interface{}{ ",
        suffix: ", }",
        extract: expressions,
    },
    Attempt {
        name: "statements",
        preamble: "package p; func _() { ",
        suffix: "\n}",
        extract: statements,
    },
    Attempt {
        name: "type",
        preamble: "package p; var _ ",
        suffix: "",
        extract: bare_type,
    },
    Attempt {
        name: "value spec",
        preamble: "package p; var ",
        suffix: "",
        extract: value_spec,
    },
];

/// Name of the attempt whose errors are reported when every attempt fails.
const REPORTED_ATTEMPT: &str = "statements";

/// Parses scanned pattern text into a fragment with cleared positions.
///
/// # Errors
///
/// Returns the statement attempt's first syntax error, mapped back to
/// `original`, when no attempt succeeds.
pub(crate) fn parse_fragment(scanned: &Scanned, original: &str) -> Result<Fragment, CompileError> {
    let mut parser = Parser::new().map_err(|err| CompileError::new(1, 1, err.to_string()))?;
    let mut reported = None;

    for attempt in &ATTEMPTS {
        let text = format!("{}{}{}", attempt.preamble, scanned.text, attempt.suffix);
        let result = parser
            .parse(&text)
            .map_err(|err| CompileError::new(1, 1, err.to_string()))?;
        let file = result.file();
        let errors = result.errors();

        if errors.is_empty() && !has_bad_nodes(&file) {
            if let Some(mut fragment) = (attempt.extract)(file) {
                debug!(attempt = attempt.name, "pattern parsed");
                fragment.clear_spans();
                return Ok(fragment);
            }
            trace!(attempt = attempt.name, "pattern parsed with unexpected shape");
        } else {
            trace!(attempt = attempt.name, errors = errors.len(), "pattern attempt failed");
        }

        if attempt.name == REPORTED_ATTEMPT {
            let offset = errors
                .first()
                .map(|info| info.byte_range.start)
                .unwrap_or_default()
                .saturating_sub(attempt.preamble.len())
                .min(scanned.text.len());
            let message = errors
                .first()
                .map_or_else(|| "cannot parse pattern".to_owned(), |info| info.message.clone());
            reported = Some((scanned.source_offset(offset), message));
        }
    }

    let (offset, message) = reported.unwrap_or_else(|| (0, "cannot parse pattern".to_owned()));
    Err(CompileError::at_offset(original, offset, message))
}

fn has_bad_nodes(file: &Node) -> bool {
    file.descendants()
        .any(|node| matches!(node.kind, NodeKind::Bad(_)))
}

fn is_declaration(node: &Node) -> bool {
    matches!(node.kind, NodeKind::FuncDecl { .. } | NodeKind::GenDecl { .. })
}

fn one_or_many(kind: ListKind, mut items: Vec<Node>) -> Option<Fragment> {
    match items.len() {
        0 => None,
        1 => items.pop().map(Fragment::Node),
        _ => Some(Fragment::List(NodeList::new(kind, items))),
    }
}

/// Moves the declarations out of a lowered file.
fn into_decls(file: Node) -> Vec<Node> {
    match file.kind {
        NodeKind::File { decls, .. } => decls.items,
        _ => Vec::new(),
    }
}

/// Moves the only declaration out of a lowered file.
fn only_decl(file: Node) -> Option<Node> {
    let mut decls = into_decls(file);
    if decls.len() == 1 { decls.pop() } else { None }
}

/// Moves the only spec out of a single-spec generic declaration.
fn only_spec(decl: Node) -> Option<Node> {
    match decl.kind {
        NodeKind::GenDecl { mut specs, .. } if specs.len() == 1 => specs.items.pop(),
        _ => None,
    }
}

fn whole_file(file: Node) -> Option<Fragment> {
    let NodeKind::File { package, decls } = &file.kind else {
        return None;
    };
    let fits = package.as_ident().is_some_and(|name| !name.is_empty())
        && decls.items.iter().all(is_declaration);
    fits.then_some(Fragment::Node(file))
}

fn declarations(file: Node) -> Option<Fragment> {
    let decls = into_decls(file);
    if !decls.iter().all(is_declaration) {
        return None;
    }
    one_or_many(ListKind::Decl, decls)
}

fn expressions(file: Node) -> Option<Fragment> {
    let spec = only_spec(only_decl(file)?)?;
    let NodeKind::ValueSpec { mut values, .. } = spec.kind else {
        return None;
    };
    let literal = values.items.pop()?;
    let NodeKind::CompositeLit { elts, .. } = literal.kind else {
        return None;
    };
    // Elided literal types are only valid inside another literal.
    let elided = elts
        .items
        .iter()
        .any(|elt| matches!(elt.kind, NodeKind::CompositeLit { ty: None, .. }));
    if elided {
        return None;
    }
    one_or_many(ListKind::Expr, elts.items)
}

fn statements(file: Node) -> Option<Fragment> {
    let decl = only_decl(file)?;
    let NodeKind::FuncDecl {
        body: Some(body), ..
    } = decl.kind
    else {
        return None;
    };
    match body.kind {
        NodeKind::BlockStmt { stmts } => one_or_many(ListKind::Stmt, stmts.items),
        _ => None,
    }
}

fn bare_type(file: Node) -> Option<Fragment> {
    let spec = only_spec(only_decl(file)?)?;
    match spec.kind {
        NodeKind::ValueSpec {
            ty: Some(ty),
            values,
            ..
        } if values.is_empty() => Some(Fragment::Node(*ty)),
        _ => None,
    }
}

fn value_spec(file: Node) -> Option<Fragment> {
    let spec = only_spec(only_decl(file)?)?;
    matches!(spec.kind, NodeKind::ValueSpec { .. }).then_some(Fragment::Node(spec))
}
