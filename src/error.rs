//! Syntax error types and line/column tracking.
//!
//! The parser produces exactly one kind of error: a [`ParseError`] built from
//! the farthest input offset reached during backtracking, carrying the set of
//! expectations that were active there, the lexeme actually found, and a
//! line/column span. Errors serialize to JSON so the CLI can print them as
//! data rather than prose.

use serde::Serialize;
use thiserror::Error;

/// One thing the parser would have accepted at the failure position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expectation {
    /// Literal text, e.g. `"|"` or `"sort"`.
    Literal { text: String, ignore_case: bool },
    /// A character class, described in bracket notation, e.g. `[0-9]`.
    Class { description: String, inverted: bool },
    /// Any single character.
    Any,
    /// End of input.
    End,
    /// A named grammar construct, e.g. `expression`.
    Other { description: String },
}

impl Expectation {
    pub(crate) fn description(&self) -> String {
        match self {
            Expectation::Literal { text, .. } => format!("\"{}\"", text),
            Expectation::Class {
                description,
                inverted,
            } => {
                if *inverted {
                    format!("[^{}]", description)
                } else {
                    format!("[{}]", description)
                }
            }
            Expectation::Any => "any character".to_string(),
            Expectation::End => "end of input".to_string(),
            Expectation::Other { description } => description.clone(),
        }
    }
}

/// A point in the source text. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// A half-open span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

/// A syntax error: the single farthest failure of one parse attempt.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<Expectation>,
    /// The lexeme found at the failure position, or `None` at end of input.
    pub found: Option<String>,
    pub location: Location,
}

impl ParseError {
    /// Builds the error from the farthest-failure state. `expected` may hold
    /// duplicates accumulated across backtracking; they are deduplicated and
    /// the descriptions sorted before the message is rendered.
    pub(crate) fn from_failure(input: &str, offset: usize, mut expected: Vec<Expectation>) -> Self {
        expected.sort();
        expected.dedup();

        let found: Option<String> = input[offset.min(input.len())..]
            .chars()
            .next()
            .map(|c| c.to_string());

        let mut map = LineMap::new(input);
        let start = map.position(offset);
        let end = match &found {
            Some(s) => map.position(offset + s.len()),
            None => start,
        };

        let mut descriptions: Vec<String> =
            expected.iter().map(Expectation::description).collect();
        descriptions.sort();
        descriptions.dedup();

        let expected_text = match descriptions.len() {
            0 => "nothing".to_string(),
            1 => descriptions[0].clone(),
            2 => format!("{} or {}", descriptions[0], descriptions[1]),
            n => format!(
                "{} or {}",
                descriptions[..n - 1].join(", "),
                descriptions[n - 1]
            ),
        };
        let found_text = match &found {
            Some(s) => format!("\"{}\"", s.escape_default()),
            None => "end of input".to_string(),
        };
        let message = format!("expected {} but {} found", expected_text, found_text);

        ParseError {
            message,
            expected,
            found,
            location: Location { start, end },
        }
    }
}

/// Incremental byte-offset to (line, column) mapper.
///
/// Scans the input once, forward only, caching the last computed position so
/// that looking up ascending offsets never rescans from the start. Fresh per
/// parse call; nothing is shared across calls.
pub(crate) struct LineMap<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LineMap<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        LineMap {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the position of `offset`, clamped to the end of the input.
    pub(crate) fn position(&mut self, offset: usize) -> Position {
        let target = offset.min(self.input.len());
        if target < self.offset {
            // Restart for a backward query; the error path only moves forward.
            self.offset = 0;
            self.line = 1;
            self.column = 1;
        }
        for c in self.input[self.offset..target].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
        Position {
            offset: target,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_map_tracks_newlines() {
        let mut map = LineMap::new("ab\ncd\ne");
        assert_eq!(
            map.position(0),
            Position {
                offset: 0,
                line: 1,
                column: 1
            }
        );
        assert_eq!(
            map.position(4),
            Position {
                offset: 4,
                line: 2,
                column: 2
            }
        );
        assert_eq!(
            map.position(6),
            Position {
                offset: 6,
                line: 3,
                column: 1
            }
        );
    }

    #[test]
    fn test_message_joins_sorted_expectations() {
        let err = ParseError::from_failure(
            "x",
            0,
            vec![
                Expectation::Literal {
                    text: "cut".to_string(),
                    ignore_case: true,
                },
                Expectation::Other {
                    description: "expression".to_string(),
                },
                Expectation::Literal {
                    text: "cut".to_string(),
                    ignore_case: true,
                },
            ],
        );
        assert_eq!(err.message, "expected \"cut\" or expression but \"x\" found");
        assert_eq!(err.expected.len(), 2);
    }

    #[test]
    fn test_found_none_at_end_of_input() {
        let err = ParseError::from_failure("ab", 2, vec![Expectation::End]);
        assert_eq!(err.found, None);
        assert!(err.message.ends_with("but end of input found"));
        assert_eq!(err.location.start.column, 3);
    }
}
