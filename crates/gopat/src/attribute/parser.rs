//! Parser for predicate text such as `rx("^Err"); type(error);`.

use regex::Regex;

use super::{Attribute, TypeRelation};
use crate::error::PredicateError;
use crate::pattern::Pattern;
use crate::types::KindClass;

/// A parenthesised argument and its byte offset.
struct Argument<'t> {
    offset: usize,
    text: &'t str,
}

struct Cursor<'t> {
    text: &'t str,
    offset: usize,
}

impl<'t> Cursor<'t> {
    const fn new(text: &'t str) -> Self {
        Self { text, offset: 0 }
    }

    fn rest(&self) -> &'t str {
        self.text.get(self.offset..).unwrap_or_default()
    }

    fn skip_space(&mut self) {
        let rest = self.rest();
        self.offset += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn word(&mut self) -> &'t str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.offset += len;
        rest.get(..len).unwrap_or_default()
    }

    /// Reads `( ... )`, balancing nested parentheses outside string literals.
    fn argument(&mut self) -> Result<Argument<'t>, PredicateError> {
        self.skip_space();
        let open = self.offset;
        if !self.eat('(') {
            return Err(PredicateError::new(open, "expected '('"));
        }
        let rest = self.rest();
        let mut depth = 1_usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for (index, c) in rest.char_indices() {
            if let Some(delimiter) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' && delimiter == '"' {
                    escaped = true;
                } else if c == delimiter {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '`' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let argument = Argument {
                            offset: self.offset,
                            text: rest.get(..index).unwrap_or_default(),
                        };
                        self.offset += index + 1;
                        return Ok(argument);
                    }
                }
                _ => {}
            }
        }
        Err(PredicateError::new(open, "unclosed '('"))
    }
}

/// Parses `;`-terminated attributes.
pub(super) fn parse(text: &str) -> Result<Vec<Attribute>, PredicateError> {
    let mut cursor = Cursor::new(text);
    let mut attributes = Vec::new();
    loop {
        cursor.skip_space();
        if cursor.rest().is_empty() {
            break;
        }
        let start = cursor.offset;
        let attribute = match cursor.word() {
            "rx" => regex(&cursor.argument()?)?,
            "type" => type_relation(TypeRelation::Identical, &cursor.argument()?)?,
            "asgn" => type_relation(TypeRelation::Assignable, &cursor.argument()?)?,
            "conv" => type_relation(TypeRelation::Convertible, &cursor.argument()?)?,
            "is" => kind(&cursor.argument()?)?,
            "comp" => Attribute::Comparable,
            "addr" => Attribute::Addressable,
            "" => return Err(PredicateError::new(start, "expected an attribute name")),
            other => {
                return Err(PredicateError::new(
                    start,
                    format!("unknown attribute {other}"),
                ));
            }
        };
        cursor.skip_space();
        if !cursor.eat(';') {
            return Err(PredicateError::new(
                cursor.offset,
                "expected ';' after attribute",
            ));
        }
        attributes.push(attribute);
    }
    if attributes.is_empty() {
        return Err(PredicateError::new(0, "empty predicate"));
    }
    Ok(attributes)
}

fn regex(argument: &Argument<'_>) -> Result<Attribute, PredicateError> {
    let pattern = unquote(argument.text.trim())
        .ok_or_else(|| PredicateError::new(argument.offset, "expected a quoted string"))?;
    Regex::new(&format!("^(?:{pattern})$"))
        .map(Attribute::Regex)
        .map_err(|err| PredicateError::new(argument.offset, err.to_string()))
}

fn type_relation(
    relation: TypeRelation,
    argument: &Argument<'_>,
) -> Result<Attribute, PredicateError> {
    let pattern = Pattern::compile(argument.text).map_err(|err| {
        PredicateError::new(
            argument.offset,
            format!("invalid type expression: {}", err.message),
        )
    })?;
    match pattern.root().as_node() {
        Some(expr) if expr.is_expr() && pattern.metavariables().is_empty() => {
            Ok(Attribute::Type {
                relation,
                expr: expr.clone(),
            })
        }
        _ => Err(PredicateError::new(
            argument.offset,
            "expected a type expression",
        )),
    }
}

fn kind(argument: &Argument<'_>) -> Result<Attribute, PredicateError> {
    let name = argument.text.trim();
    name.parse::<KindClass>()
        .map(Attribute::Kind)
        .map_err(|_| PredicateError::new(argument.offset, format!("unknown kind {name}")))
}

/// Decodes a Go string literal. Unknown escapes are kept verbatim so regex
/// classes such as `\d` survive.
fn unquote(text: &str) -> Option<String> {
    if let Some(raw) = text
        .strip_prefix('`')
        .and_then(|inner| inner.strip_suffix('`'))
    {
        return Some(raw.to_owned());
    }
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next()? {
            '"' => decoded.push('"'),
            '\\' => decoded.push('\\'),
            'n' => decoded.push('\n'),
            't' => decoded.push('\t'),
            other => {
                decoded.push('\\');
                decoded.push(other);
            }
        }
    }
    Some(decoded)
}
