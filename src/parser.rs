//! Recursive-descent parser with ordered-choice backtracking.
//!
//! The grammar lives in the submodules, one per layer of the language, each
//! an `impl` block on [`Parser`]:
//!
//! - literals - lexical micro-grammars (numbers, strings, durations,
//!   timestamps, IP addresses, byte strings, identifiers)
//! - expressions - the precedence ladder and search-boolean grammar
//! - types - type expressions
//! - procs - one rule per pipeline operator
//! - sql - the embedded SQL sub-grammar
//! - program - declarations and the sequential/parallel/switch/from
//!   assembler
//!
//! Rules call downward only; the program assembler at the top calls procs,
//! procs call expressions, expressions call literals. All rules return
//! [`PResult`] and are composed with the [`Cursor`] adapters re-exposed here,
//! so a failing alternative always restores the input position.

mod expr;
mod literals;
mod procs;
mod program;
mod sql;
mod types;

use crate::ast::{Expr, Proc};
use crate::cursor::{Cursor, PResult};
use crate::error::ParseError;

pub struct Parser<'a> {
    cur: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            cur: Cursor::new(input),
        }
    }

    /// Parses a complete program: declarations, then a pipeline. The whole
    /// input must be consumed.
    pub fn parse_program(mut self) -> Result<Proc, ParseError> {
        match self.program() {
            Ok(proc) => {
                self.ws();
                match self.cur.end() {
                    Ok(()) => Ok(proc),
                    Err(_) => Err(self.cur.into_error()),
                }
            }
            Err(_) => Err(self.cur.into_error()),
        }
    }

    /// Parses a single bare expression consuming the whole input.
    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        self.ws();
        match self.expr() {
            Ok(e) => {
                self.ws();
                match self.cur.end() {
                    Ok(()) => Ok(e),
                    Err(_) => Err(self.cur.into_error()),
                }
            }
            Err(_) => Err(self.cur.into_error()),
        }
    }

    // ------------------------------------------------------------------
    // Choice / repetition adapters, lifted from Cursor to Parser so grammar
    // rules (methods on Parser) compose directly.
    // ------------------------------------------------------------------

    pub(crate) fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.cur.pos();
        let result = f(self);
        if result.is_err() {
            self.cur.set_pos(start);
        }
        result
    }

    pub(crate) fn opt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        self.attempt(f).ok()
    }

    pub(crate) fn many0<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = self.attempt(&mut f) {
            items.push(item);
        }
        items
    }

    pub(crate) fn many1<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let first = self.attempt(&mut f)?;
        let mut items = vec![first];
        while let Ok(item) = self.attempt(&mut f) {
            items.push(item);
        }
        Ok(items)
    }

    pub(crate) fn peek<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<()> {
        let start = self.cur.pos();
        self.cur.quiet_enter();
        let result = f(self);
        self.cur.quiet_exit();
        self.cur.set_pos(start);
        result.map(|_| ())
    }

    pub(crate) fn not_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<()> {
        let start = self.cur.pos();
        self.cur.quiet_enter();
        let result = f(self);
        self.cur.quiet_exit();
        self.cur.set_pos(start);
        match result {
            Ok(_) => Err(crate::cursor::Fail),
            Err(_) => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Shared token helpers
    // ------------------------------------------------------------------

    /// Skips whitespace and `//` line comments. Never fails and never
    /// records expectations; layout is not part of any error message.
    pub(crate) fn ws(&mut self) {
        loop {
            let rest = self.cur.rest();
            if let Some(c) = rest.chars().next() {
                if c.is_ascii_whitespace() {
                    self.cur.set_pos(self.cur.pos() + c.len_utf8());
                    continue;
                }
            }
            if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.cur.set_pos(self.cur.pos() + len);
                continue;
            }
            break;
        }
    }

    /// Skips whitespace, then matches `text` exactly.
    pub(crate) fn tok(&mut self, text: &str) -> PResult<()> {
        self.attempt(|p| {
            p.ws();
            p.cur.literal(text).map(|_| ())
        })
    }

    /// Case-sensitive keyword: `text` followed by a non-identifier character.
    pub(crate) fn kw(&mut self, text: &str) -> PResult<()> {
        self.attempt(|p| {
            p.ws();
            p.cur.literal(text)?;
            p.not_ahead(|p| p.ident_char())
        })
    }

    /// Case-insensitive keyword with the same identifier boundary.
    pub(crate) fn kw_ci(&mut self, text: &str) -> PResult<()> {
        self.attempt(|p| {
            p.ws();
            p.cur.literal_ci(text)?;
            p.not_ahead(|p| p.ident_char())
        })
    }

    /// Records a named expectation at the current position and fails.
    pub(crate) fn expecting<T>(&mut self, description: &str) -> PResult<T> {
        self.cur.expecting(description)
    }

    pub(crate) fn ident_char(&mut self) -> PResult<char> {
        self.cur
            .char_where("A-Za-z0-9_", |c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Identifier-boundary guard after a literal that must not run into a
    /// longer word, e.g. so `123abc` is not an int followed by garbage.
    pub(crate) fn boundary(&mut self) -> PResult<()> {
        self.not_ahead(|p| p.ident_char())
    }
}

/// Primitive type names as they appear in source: the external spellings
/// plus the internal set. Also the reserved-word list for the identifier
/// guard (with booleans, null and the expression keywords).
pub(crate) const PRIMITIVE_TYPES: &[&str] = &[
    "uint8", "uint16", "uint32", "uint64", "int8", "int16", "int32", "int64", "float32",
    "float64", "bool", "string", "duration", "time", "bytes", "bstring", "ip", "net", "type",
    "error", "null",
];

/// Words the identifier rule refuses to treat as bare identifiers (only when
/// not a prefix of a longer identifier). Includes the reserved function
/// names `select` and `match` so those forms cannot collapse into plain
/// field references.
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "true", "false", "null", "this", "and", "or", "not", "in", "matches", "select", "match",
    "uint8", "uint16", "uint32", "uint64", "int8", "int16", "int32", "int64", "float32",
    "float64", "bool", "string", "duration", "time", "bytes", "bstring", "ip", "net", "type",
    "error",
];
