//! # Alternative Resolution
//!
//! A rule with several alternatives has to settle on exactly one of them. Two
//! policies exist, and the matching mode picks one at the call site:
//!
//! * [`ordered_choice`] (parser mode): the first alternative that succeeds wins,
//!   no matter how much input a later one would have taken.
//! * [`longest_match`] (lexer mode): every alternative is tried from the same
//!   start; the one reaching furthest wins, and among equally long matches the
//!   one declared first.
//!
//! Both report the deepest failure among the alternatives when none succeeds.

use super::core::{Mode, NoMatch, ParseResult, Span};

/// The alternative a rule settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Choice {
    /// Declaration index of the winning alternative
    pub alternative: usize,
    pub span: Span,
}

pub type ChoiceResult = Result<Choice, NoMatch>;

/// Resolves `alternatives` with the policy belonging to `mode`.
pub fn resolve<A, F>(mode: Mode, alternatives: &[A], pos: usize, attempt: F) -> ChoiceResult
where
    F: FnMut(&A) -> ParseResult,
{
    match mode {
        Mode::Parser => ordered_choice(alternatives, pos, attempt),
        Mode::Lexer => longest_match(alternatives, pos, attempt),
    }
}

pub fn ordered_choice<A, F>(alternatives: &[A], pos: usize, mut attempt: F) -> ChoiceResult
where
    F: FnMut(&A) -> ParseResult,
{
    let mut deepest = NoMatch::at(pos);
    for (index, alternative) in alternatives.iter().enumerate() {
        match attempt(alternative) {
            Ok(span) => {
                return Ok(Choice {
                    alternative: index,
                    span,
                })
            }
            Err(failure) => deepest = deepest.deeper(failure),
        }
    }
    Err(deepest)
}

pub fn longest_match<A, F>(alternatives: &[A], pos: usize, mut attempt: F) -> ChoiceResult
where
    F: FnMut(&A) -> ParseResult,
{
    let mut best: Option<Choice> = None;
    let mut deepest = NoMatch::at(pos);
    for (index, alternative) in alternatives.iter().enumerate() {
        match attempt(alternative) {
            // strictly greater, so the earlier declaration keeps a tie
            Ok(span) if best.map_or(true, |b| span.end > b.span.end) => {
                best = Some(Choice {
                    alternative: index,
                    span,
                });
            }
            Ok(_) => {}
            Err(failure) => deepest = deepest.deeper(failure),
        }
    }
    best.ok_or(deepest)
}
