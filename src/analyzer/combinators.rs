//! # Primitive Matchers
//!
//! This module implements the leaf parsers every grammar is built from. Each of
//! them looks at a single input position and either consumes a fixed number of
//! characters or fails at that very position.
//!
//! ## Matcher Types
//!
//! * **Any**: any single character
//! * **CharRange**: a single character within an inclusive range
//! * **CharSet**: a single character out of a spec'd set (see [`super::char_set`])
//! * **Literal**: an exact run of characters
//! * **Eof**: the end of the input, consuming nothing

use super::core::{Mode, NoMatch, ParseResult, Parser, Span};
use crate::grammar::{GrammarError, GrammarResult};

/// Failure at `pos`, kept inside `[0, input.len()]`.
pub(crate) fn no_match(input: &[char], pos: usize) -> NoMatch {
    NoMatch::at(pos.min(input.len()))
}

/// Any: consumes one character, whatever it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Any;

impl Parser for Any {
    fn parse(&self, input: &[char], pos: usize, _mode: Mode) -> ParseResult {
        if pos < input.len() {
            Ok(Span::new(pos, pos + 1))
        } else {
            Err(no_match(input, pos))
        }
    }
}

impl std::fmt::Display for Any {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".")
    }
}

/// CharRange: consumes one character `c` with `lo <= c <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    lo: char,
    hi: char,
}

impl CharRange {
    pub fn new(lo: char, hi: char) -> GrammarResult<Self> {
        if lo > hi {
            return Err(GrammarError::MalformedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> char {
        self.lo
    }

    pub fn hi(&self) -> char {
        self.hi
    }
}

impl Parser for CharRange {
    fn parse(&self, input: &[char], pos: usize, _mode: Mode) -> ParseResult {
        match input.get(pos) {
            Some(&c) if self.lo <= c && c <= self.hi => Ok(Span::new(pos, pos + 1)),
            _ => Err(no_match(input, pos)),
        }
    }
}

impl std::fmt::Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.lo, self.hi)
    }
}

/// Literal: consumes exactly the given text, case sensitive.
///
/// A mismatch is reported at the position the literal started at, not at the
/// first differing character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: Vec<char>,
}

impl Literal {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Parser for Literal {
    fn parse(&self, input: &[char], pos: usize, _mode: Mode) -> ParseResult {
        let end = pos.saturating_add(self.text.len());
        match input.get(pos..end) {
            Some(found) if found == self.text.as_slice() => Ok(Span::new(pos, end)),
            _ => Err(no_match(input, pos)),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'")?;
        for c in &self.text {
            match c {
                '\'' => write!(f, "\\'")?,
                '\\' => write!(f, "\\\\")?,
                other => write!(f, "{}", other.escape_default())?,
            }
        }
        write!(f, "'")
    }
}

/// Eof: succeeds without consuming anything at the end of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eof;

impl Parser for Eof {
    fn parse(&self, input: &[char], pos: usize, _mode: Mode) -> ParseResult {
        if pos == input.len() {
            Ok(Span::empty(pos))
        } else {
            Err(no_match(input, pos))
        }
    }
}

impl std::fmt::Display for Eof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EOF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_any() {
        let input = chars("abc");

        // success
        assert_eq!(Any.parse(&input, 0, Mode::Parser), Ok(Span::new(0, 1)));
        assert_eq!(Any.parse(&input, 2, Mode::Lexer), Ok(Span::new(2, 3)));

        // failure (end of input)
        assert_eq!(Any.parse(&input, 3, Mode::Parser), Err(NoMatch::at(3)));
        assert_eq!(Any.parse(&[], 0, Mode::Parser), Err(NoMatch::at(0)));

        // failure index never leaves the input
        assert_eq!(Any.parse(&input, 10, Mode::Parser), Err(NoMatch::at(3)));
    }

    #[test]
    fn test_char_range() {
        let parser = CharRange::new('a', 'z').unwrap();

        // success
        assert_eq!(parser.parse(&chars("abc"), 0, Mode::Parser), Ok(Span::new(0, 1)));
        assert_eq!(parser.parse(&chars("@z"), 1, Mode::Parser), Ok(Span::new(1, 2)));

        // failure (out of range)
        assert_eq!(parser.parse(&chars("@@@"), 0, Mode::Parser), Err(NoMatch::at(0)));
        assert_eq!(parser.parse(&chars("aA"), 1, Mode::Parser), Err(NoMatch::at(1)));

        // single character range
        let parser = CharRange::new('x', 'x').unwrap();
        assert_eq!(parser.parse(&chars("x"), 0, Mode::Parser), Ok(Span::new(0, 1)));
    }

    #[test]
    fn test_malformed_range() {
        assert_eq!(
            CharRange::new('z', 'a'),
            Err(GrammarError::MalformedRange { lo: 'z', hi: 'a' })
        );
    }

    #[test]
    fn test_literal() {
        let input = chars("literal!");

        // success
        let parser = Literal::new("literal");
        assert_eq!(parser.parse(&input, 0, Mode::Parser), Ok(Span::new(0, 7)));

        // failure is reported where the literal started
        let parser = Literal::new("no match");
        assert_eq!(parser.parse(&input, 0, Mode::Parser), Err(NoMatch::at(0)));
        let parser = Literal::new("liters");
        assert_eq!(parser.parse(&input, 0, Mode::Parser), Err(NoMatch::at(0)));

        // failure (input too short)
        let parser = Literal::new("l!!");
        assert_eq!(parser.parse(&input, 6, Mode::Parser), Err(NoMatch::at(6)));

        // no case folding
        let parser = Literal::new("LITERAL");
        assert_eq!(parser.parse(&input, 0, Mode::Lexer), Err(NoMatch::at(0)));

        // empty literal always matches
        let parser = Literal::new("");
        assert_eq!(parser.parse(&input, 8, Mode::Parser), Ok(Span::empty(8)));
    }

    #[test]
    fn test_eof() {
        assert_eq!(Eof.parse(&[], 0, Mode::Parser), Ok(Span::empty(0)));
        assert_eq!(Eof.parse(&chars("abc"), 3, Mode::Parser), Ok(Span::empty(3)));
        assert_eq!(Eof.parse(&chars("abc"), 0, Mode::Parser), Err(NoMatch::at(0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Any.to_string(), ".");
        assert_eq!(CharRange::new('a', 'f').unwrap().to_string(), "'a'..'f'");
        assert_eq!(Literal::new("it's").to_string(), "'it\\'s'");
        assert_eq!(Eof.to_string(), "EOF");
    }
}
