use super::char_set::CharSet;
use super::combinators::*;
use crate::grammar::GrammarResult;

pub fn any() -> Any {
    Any
}

pub fn char_range(lo: char, hi: char) -> GrammarResult<CharRange> {
    CharRange::new(lo, hi)
}

pub fn char_set(spec: &str) -> GrammarResult<CharSet> {
    CharSet::new(spec)
}

pub fn literal(text: &str) -> Literal {
    Literal::new(text)
}

pub fn eof() -> Eof {
    Eof
}
