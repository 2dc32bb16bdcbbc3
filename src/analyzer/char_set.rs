//! # Character Sets
//!
//! A [`CharSet`] matches one character out of a set written as a compact spec
//! string: `a-z$_A-Z` is the lowercase letters, `$`, `_` and the uppercase
//! letters. `x-y` is an inclusive range, any other character stands for itself,
//! backslashes included.
//!
//! The spec is parsed once, at construction. A dash that does not sit between
//! two members is rejected right away instead of turning into a parse-time
//! mismatch later.

use nom::{
    branch::alt,
    character::complete::{char, none_of},
    combinator::map,
    multi::many0,
    sequence::separated_pair,
    IResult,
};

use super::combinators::no_match;
use super::core::{Mode, ParseResult, Parser, Span};
use crate::grammar::{GrammarError, GrammarResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    spec: String,
    singles: Vec<char>,
    ranges: Vec<(char, char)>,
}

impl CharSet {
    pub fn new(spec: &str) -> GrammarResult<Self> {
        let items = parse_spec(spec)?;
        let mut singles = Vec::new();
        let mut ranges = Vec::new();
        for item in items {
            match item {
                SpecItem::Single(c) => singles.push(c),
                SpecItem::Range(lo, hi) => ranges.push((lo, hi)),
            }
        }
        singles.sort_unstable();
        singles.dedup();
        Ok(Self {
            spec: spec.to_string(),
            singles,
            ranges,
        })
    }

    /// The spec string the set was built from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn contains(&self, c: char) -> bool {
        self.singles.binary_search(&c).is_ok()
            || self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }
}

impl Parser for CharSet {
    fn parse(&self, input: &[char], pos: usize, _mode: Mode) -> ParseResult {
        match input.get(pos) {
            Some(&c) if self.contains(c) => Ok(Span::new(pos, pos + 1)),
            _ => Err(no_match(input, pos)),
        }
    }
}

impl std::fmt::Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.spec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecItem {
    Single(char),
    Range(char, char),
}

type SpecResult<'a, T> = IResult<&'a str, T>;

fn parse_member(input: &str) -> SpecResult<char> {
    none_of("-")(input)
}

fn parse_item(input: &str) -> SpecResult<SpecItem> {
    alt((
        map(
            separated_pair(parse_member, char('-'), parse_member),
            |(lo, hi)| SpecItem::Range(lo, hi),
        ),
        map(parse_member, SpecItem::Single),
    ))(input)
}

fn parse_spec(spec: &str) -> GrammarResult<Vec<SpecItem>> {
    if spec.is_empty() {
        return Err(GrammarError::malformed_spec(spec, "empty set"));
    }

    let (rest, items) =
        many0(parse_item)(spec).map_err(|e| GrammarError::malformed_spec(spec, e.to_string()))?;

    // members take everything but '-', so only a dash can be left over
    if !rest.is_empty() {
        let offset = spec.chars().count() - rest.chars().count();
        let reason = format!("dangling '-' at offset {}", offset);
        let error = GrammarError::malformed_spec(spec, reason);
        tracing::error!("{}", error);
        return Err(error);
    }

    if let Some(&SpecItem::Range(lo, hi)) = items
        .iter()
        .find(|item| matches!(item, SpecItem::Range(lo, hi) if lo > hi))
    {
        return Err(GrammarError::malformed_spec(
            spec,
            format!("reversed range {}-{}", lo, hi),
        ));
    }

    Ok(items)
}
