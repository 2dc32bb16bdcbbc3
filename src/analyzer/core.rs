//! # Core Parser Definitions
//!
//! This module defines the fundamental parser interface, the match outcome types
//! and the matching mode that every evaluation call carries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// A parser looks at the input starting at `pos` and either reports the span it
/// consumed or the position at which it could not proceed. Parsers never mutate
/// the input and never keep state between calls.
pub trait Parser {
    /// Attempts to match the input starting at the given position.
    ///
    /// # Arguments
    ///
    /// * `input` - The decoded input characters
    /// * `pos` - The character offset to start matching from
    /// * `mode` - The matching discipline of the current evaluation
    ///
    /// # Returns
    ///
    /// * `Ok(span)` - The consumed span `[pos, span.end)`
    /// * `Err(no_match)` - The offset at which no alternative could proceed
    fn parse(&self, input: &[char], pos: usize, mode: Mode) -> ParseResult;
}

/// Result type for every match attempt.
pub type ParseResult = Result<Span, NoMatch>;

/// Matching discipline selected per call.
///
/// `Lexer` resolves competing alternatives by longest match, `Parser` by
/// ordered choice.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Lexer,
    #[default]
    Parser,
}

impl Mode {
    pub fn is_lexer(self) -> bool {
        self == Mode::Lexer
    }
}

impl From<bool> for Mode {
    /// `true` selects lexer matching.
    fn from(lexer: bool) -> Self {
        if lexer {
            Mode::Lexer
        } else {
            Mode::Parser
        }
    }
}

/// A successful match covering the characters `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "span end {} before start {}", end, start);
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the characters `[start, end)` of the text the span was matched on.
    pub fn as_substring_of(&self, original: &str) -> String {
        original.chars().skip(self.start).take(self.len()).collect()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A failed match. `index` is the deepest offset reached before giving up.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("no match at index {index}")]
pub struct NoMatch {
    pub index: usize,
}

impl NoMatch {
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    /// Keeps whichever failure got further into the input.
    pub fn deeper(self, other: NoMatch) -> NoMatch {
        if other.index > self.index {
            other
        } else {
            self
        }
    }
}

/// Immutable, decoded input text.
///
/// Offsets used throughout the engine count characters, so the text is decoded
/// once up front.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    chars: Vec<char>,
}

impl Input {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The consumed text of a span matched against this input.
    pub fn slice(&self, span: Span) -> String {
        self.chars
            .get(span.start..span.end)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
