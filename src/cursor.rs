//! Backtracking cursor: the combinator engine under every grammar rule.
//!
//! A [`Cursor`] owns one immutable input string, a single byte position, and
//! the farthest-failure state used for error reporting. Failure is an
//! ordinary value ([`Fail`], zero-sized); it unwinds only as far as the
//! nearest enclosing [`Cursor::attempt`], which restores the position so a
//! failing alternative never leaves partial consumption behind. Ordered
//! choice is a chain of `attempt`s; sequencing is plain `?`.
//!
//! One cursor per parse call. Nothing is shared or pooled across calls, so
//! concurrent parses on different inputs need no synchronization.

use crate::error::{Expectation, ParseError};

/// Zero-sized failure marker. Carries no data; the interesting state lives in
/// the cursor's farthest-failure fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fail;

pub type PResult<T> = Result<T, Fail>;

pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    /// Farthest offset at which anything has failed so far.
    far: usize,
    /// Expectations recorded at `far`. Replaced when a failure lands strictly
    /// beyond `far`, appended when it lands exactly on it.
    expected: Vec<Expectation>,
    /// Suppression depth: while positive, failures record nothing. Lookaheads
    /// run suppressed so failed probes do not pollute error messages.
    quiet: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            far: 0,
            expected: Vec::new(),
            quiet: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Restores a position previously returned by [`Cursor::pos`]. Used by
    /// the parser's choice/lookahead adapters; never moves forward past
    /// unexamined input.
    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn quiet_enter(&mut self) {
        self.quiet += 1;
    }

    pub(crate) fn quiet_exit(&mut self) {
        self.quiet -= 1;
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The text consumed since `start`. `start` must be a position previously
    /// returned by [`Cursor::pos`].
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn record(&mut self, exp: Expectation) {
        if self.quiet > 0 {
            return;
        }
        if self.pos > self.far {
            self.far = self.pos;
            self.expected.clear();
        }
        if self.pos == self.far {
            self.expected.push(exp);
        }
    }

    /// Records `exp` at the current position and fails.
    pub fn fail<T>(&mut self, exp: Expectation) -> PResult<T> {
        self.record(exp);
        Err(Fail)
    }

    /// Fails with a named-construct expectation, e.g. `expecting("expression")`.
    pub fn expecting<T>(&mut self, description: &str) -> PResult<T> {
        self.fail(Expectation::Other {
            description: description.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Matches `text` exactly.
    pub fn literal(&mut self, text: &str) -> PResult<&'a str> {
        if self.input[self.pos..].starts_with(text) {
            let matched = &self.input[self.pos..self.pos + text.len()];
            self.pos += text.len();
            Ok(matched)
        } else {
            self.fail(Expectation::Literal {
                text: text.to_string(),
                ignore_case: false,
            })
        }
    }

    /// Matches `text` ASCII-case-insensitively. `text` must be ASCII.
    pub fn literal_ci(&mut self, text: &str) -> PResult<&'a str> {
        let end = self.pos + text.len();
        if end <= self.input.len()
            && self.input.as_bytes()[self.pos..end].eq_ignore_ascii_case(text.as_bytes())
        {
            let matched = &self.input[self.pos..end];
            self.pos = end;
            Ok(matched)
        } else {
            self.fail(Expectation::Literal {
                text: text.to_string(),
                ignore_case: true,
            })
        }
    }

    /// Matches one character satisfying `pred`. `description` is the class in
    /// bracket-notation body form, e.g. `"0-9"`.
    pub fn char_where(
        &mut self,
        description: &str,
        pred: impl Fn(char) -> bool,
    ) -> PResult<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => self.fail(Expectation::Class {
                description: description.to_string(),
                inverted: false,
            }),
        }
    }

    /// Matches one character *not* satisfying `pred`.
    pub fn char_not(&mut self, description: &str, pred: impl Fn(char) -> bool) -> PResult<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) if !pred(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => self.fail(Expectation::Class {
                description: description.to_string(),
                inverted: true,
            }),
        }
    }

    /// Matches any single character.
    pub fn any_char(&mut self) -> PResult<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            None => self.fail(Expectation::Any),
        }
    }

    /// Succeeds only at end of input.
    pub fn end(&mut self) -> PResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            self.fail(Expectation::End)
        }
    }

    // ------------------------------------------------------------------
    // Adapters
    // ------------------------------------------------------------------

    /// Runs `f`, restoring the position if it fails. Every alternative of an
    /// ordered choice and every speculative sequence runs under `attempt`.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// `Optional`: never fails.
    pub fn opt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        self.attempt(f).ok()
    }

    /// `Repeat0`: greedy, never fails.
    pub fn many0<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = self.attempt(&mut f) {
            items.push(item);
        }
        items
    }

    /// `Repeat1`: greedy, fails on zero matches.
    pub fn many1<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let first = self.attempt(&mut f)?;
        let mut items = vec![first];
        while let Ok(item) = self.attempt(&mut f) {
            items.push(item);
        }
        Ok(items)
    }

    /// Runs `f` with expectation recording suppressed.
    pub fn quiet<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.quiet += 1;
        let result = f(self);
        self.quiet -= 1;
        result
    }

    /// Positive lookahead: succeeds iff `f` succeeds, consumes nothing,
    /// records nothing.
    pub fn peek<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<()> {
        let start = self.pos;
        let result = self.quiet(f);
        self.pos = start;
        result.map(|_| ())
    }

    /// Negative lookahead: succeeds iff `f` fails, consumes nothing, records
    /// nothing.
    pub fn not_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<()> {
        let start = self.pos;
        let result = self.quiet(f);
        self.pos = start;
        match result {
            Ok(_) => Err(Fail),
            Err(_) => Ok(()),
        }
    }

    /// Consumes the error state into a [`ParseError`]. Called once, at the
    /// end, when top-level parsing cannot complete.
    pub fn into_error(self) -> ParseError {
        ParseError::from_failure(self.input, self.far, self.expected)
    }
}
