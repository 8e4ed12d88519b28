//! Pattern text scanner.
//!
//! Copies the pattern into parseable Go, replacing each `$name` and
//! `$*name` with a placeholder identifier and recording enough of each
//! replacement to map parser positions back to the caller's text.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::CompileError;
use crate::metavariables::{
    CLAUSE_BODY, MetaVarKind, MetaVariable, is_ident_continue, is_ident_start, placeholder,
    placeholder_index,
};

/// Scanner output: Go text plus the metavariable table.
#[derive(Debug, Clone)]
pub(crate) struct Scanned {
    pub(crate) text: String,
    pub(crate) metavars: Vec<MetaVariable>,
    pub(crate) aggressive: bool,
    replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, Copy)]
struct Replacement {
    out_start: usize,
    out_len: usize,
    src_start: usize,
    src_len: usize,
}

impl Scanned {
    /// Maps a byte offset in [`Scanned::text`] back to the pattern text.
    ///
    /// Offsets inside a placeholder map to the `$` that produced it.
    pub(crate) fn source_offset(&self, out: usize) -> usize {
        let mut mapped = out;
        for rep in &self.replacements {
            let out_end = rep.out_start + rep.out_len;
            if out < rep.out_start {
                break;
            }
            if out < out_end {
                return rep.src_start;
            }
            mapped = rep.src_start + rep.src_len + (out - out_end);
        }
        mapped
    }
}

/// Where the scanner is relative to a `switch` or `select` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseState {
    Outside,
    AwaitingBrace,
    ClauseStart,
}

struct Scanner<'s> {
    src: &'s str,
    chars: Peekable<CharIndices<'s>>,
    out: String,
    metavars: Vec<MetaVariable>,
    replacements: Vec<Replacement>,
    clause: ClauseState,
    aggressive: bool,
    seen_token: bool,
}

/// Scans pattern text.
///
/// # Errors
///
/// Returns a [`CompileError`] for unterminated literals or comments, a `$`
/// without a following identifier, identifiers spelled like the scanner's
/// own placeholders, and characters outside Go's lexical set.
pub(crate) fn scan(src: &str) -> Result<Scanned, CompileError> {
    let mut scanner = Scanner {
        src,
        chars: src.char_indices().peekable(),
        out: String::with_capacity(src.len()),
        metavars: Vec::new(),
        replacements: Vec::new(),
        clause: ClauseState::Outside,
        aggressive: false,
        seen_token: false,
    };
    scanner.run()?;
    Ok(Scanned {
        text: scanner.out,
        metavars: scanner.metavars,
        aggressive: scanner.aggressive,
        replacements: scanner.replacements,
    })
}

impl Scanner<'_> {
    fn run(&mut self) -> Result<(), CompileError> {
        while let Some((offset, c)) = self.chars.next() {
            if c.is_whitespace() || c == ';' {
                self.out.push(c);
                continue;
            }
            let first = !self.seen_token;
            self.seen_token = true;
            match c {
                '~' if first => {
                    self.aggressive = true;
                    self.out.push(' ');
                }
                '"' => self.quoted(offset, '"', "string literal not terminated")?,
                '\'' => self.quoted(offset, '\'', "rune literal not terminated")?,
                '`' => self.raw(offset)?,
                '/' if self.peek_is('/') => self.line_comment(),
                '/' if self.peek_is('*') => self.block_comment(offset)?,
                '$' => self.metavar(offset)?,
                '@' | '#' | '?' | '\\' => {
                    return Err(self.error(
                        offset,
                        format!("illegal character U+{:04X} '{c}'", u32::from(c)),
                    ));
                }
                c if is_ident_start(c) => self.word(offset, c)?,
                '{' => {
                    self.clause = match self.clause {
                        ClauseState::AwaitingBrace => ClauseState::ClauseStart,
                        _ => ClauseState::Outside,
                    };
                    self.out.push(c);
                }
                _ => {
                    self.leave_clause_start();
                    self.out.push(c);
                }
            }
        }
        Ok(())
    }

    fn peek_is(&mut self, expected: char) -> bool {
        self.chars.peek().is_some_and(|&(_, c)| c == expected)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> CompileError {
        CompileError::at_offset(self.src, offset, message)
    }

    fn leave_clause_start(&mut self) {
        if self.clause == ClauseState::ClauseStart {
            self.clause = ClauseState::Outside;
        }
    }

    fn word(&mut self, offset: usize, first: char) -> Result<(), CompileError> {
        let mut word = String::from(first);
        while let Some(&(_, c)) = self.chars.peek() {
            if !is_ident_continue(c) {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        if word == CLAUSE_BODY || placeholder_index(&word).is_some() {
            return Err(self.error(
                offset,
                format!("identifier {word} is reserved for metavariables"),
            ));
        }
        match word.as_str() {
            "switch" | "select" => self.clause = ClauseState::AwaitingBrace,
            _ => self.leave_clause_start(),
        }
        self.out.push_str(&word);
        Ok(())
    }

    fn quoted(&mut self, offset: usize, quote: char, message: &str) -> Result<(), CompileError> {
        self.leave_clause_start();
        self.out.push(quote);
        loop {
            match self.chars.next() {
                None | Some((_, '\n')) => return Err(self.error(offset, message)),
                Some((_, '\\')) => {
                    self.out.push('\\');
                    match self.chars.next() {
                        Some((_, '\n')) | None => return Err(self.error(offset, message)),
                        Some((_, escaped)) => self.out.push(escaped),
                    }
                }
                Some((_, c)) => {
                    self.out.push(c);
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn raw(&mut self, offset: usize) -> Result<(), CompileError> {
        self.leave_clause_start();
        self.out.push('`');
        for (_, c) in self.chars.by_ref() {
            self.out.push(c);
            if c == '`' {
                return Ok(());
            }
        }
        Err(self.error(offset, "raw string literal not terminated"))
    }

    fn line_comment(&mut self) {
        self.out.push('/');
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.out.push(c);
            self.chars.next();
        }
    }

    fn block_comment(&mut self, offset: usize) -> Result<(), CompileError> {
        self.out.push('/');
        if let Some((_, star)) = self.chars.next() {
            self.out.push(star);
        }
        let mut previous = ' ';
        for (_, c) in self.chars.by_ref() {
            self.out.push(c);
            if previous == '*' && c == '/' {
                return Ok(());
            }
            previous = c;
        }
        Err(self.error(offset, "comment not terminated"))
    }

    fn metavar(&mut self, offset: usize) -> Result<(), CompileError> {
        let kind = if self.peek_is('*') {
            self.chars.next();
            MetaVarKind::Sequence
        } else {
            MetaVarKind::Single
        };
        let mut name = String::new();
        let mut end = offset;
        while let Some(&(at, c)) = self.chars.peek() {
            let valid = if name.is_empty() {
                is_ident_start(c)
            } else {
                is_ident_continue(c)
            };
            if !valid {
                break;
            }
            name.push(c);
            end = at + c.len_utf8();
            self.chars.next();
        }
        if name.is_empty() {
            return Err(self.error(offset, "$ must be followed by an identifier"));
        }

        let index = self.metavars.len();
        self.metavars.push(MetaVariable { name, kind, offset });
        let ident = placeholder(index);
        let emitted = if self.clause == ClauseState::ClauseStart {
            format!("case {ident}: {CLAUSE_BODY}")
        } else {
            ident
        };
        self.replacements.push(Replacement {
            out_start: self.out.len(),
            out_len: emitted.len(),
            src_start: offset,
            src_len: end - offset,
        });
        self.out.push_str(&emitted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn metavariables_become_placeholders() {
        let scanned = scan("$x + $*ys").expect("scan");
        assert_eq!(scanned.text, "gopat_0 + gopat_1");
        let kinds: Vec<_> = scanned.metavars.iter().map(|mv| mv.kind).collect();
        assert_eq!(kinds, [MetaVarKind::Single, MetaVarKind::Sequence]);
        assert_eq!(scanned.metavars.get(1).map(|mv| mv.name.as_str()), Some("ys"));
    }

    #[test]
    fn leading_tilde_enables_aggressive_mode() {
        let scanned = scan("  ~ x = 1").expect("scan");
        assert!(scanned.aggressive);
        assert_eq!(scanned.text, "    x = 1");
    }

    #[test]
    fn literals_and_comments_are_copied_verbatim() {
        let scanned = scan(r#"f("$x", '$', `$y`) // $z"#).expect("scan");
        assert!(scanned.metavars.is_empty());
        assert_eq!(scanned.text, r#"f("$x", '$', `$y`) // $z"#);
    }

    #[test]
    fn clause_wildcards_expand_inside_switch_bodies() {
        let scanned = scan("switch $x { $*_ }").expect("scan");
        assert_eq!(scanned.text, "switch gopat_0 { case gopat_1: gopat_body }");
    }

    #[test]
    fn case_bodies_keep_plain_wildcards() {
        let scanned = scan("switch { case $x: $y }").expect("scan");
        assert_eq!(scanned.text, "switch { case gopat_0: gopat_1 }");
    }

    #[rstest]
    #[case("x @ y", 1, 3, "illegal character U+0040 '@'")]
    #[case("a #", 1, 3, "illegal character U+0023 '#'")]
    #[case("$ + 1", 1, 1, "$ must be followed by an identifier")]
    #[case("x +\n  \"abc", 2, 3, "string literal not terminated")]
    #[case("'a", 1, 1, "rune literal not terminated")]
    #[case("`abc", 1, 1, "raw string literal not terminated")]
    #[case("x /* y", 1, 3, "comment not terminated")]
    #[case("f(gopat_0, $x)", 1, 3, "identifier gopat_0 is reserved for metavariables")]
    #[case("x + gopat_body", 1, 5, "identifier gopat_body is reserved for metavariables")]
    fn scan_errors_report_positions(
        #[case] text: &str,
        #[case] line: u32,
        #[case] column: u32,
        #[case] message: &str,
    ) {
        let error = scan(text).expect_err("scan should fail");
        assert_eq!(error, CompileError::new(line, column, message));
    }

    #[test]
    fn offsets_map_back_through_placeholders() {
        let scanned = scan("$x + $yy + z").expect("scan");
        assert_eq!(scanned.text, "gopat_0 + gopat_1 + z");
        assert_eq!(scanned.source_offset(3), 0);
        assert_eq!(scanned.source_offset(10), 5);
        assert_eq!(scanned.source_offset(20), 11);
        assert_eq!(scanned.source_offset(8), 3);
    }
}
