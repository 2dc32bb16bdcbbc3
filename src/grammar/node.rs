use crate::analyzer::char_set::CharSet;
use crate::analyzer::combinators::{Any, CharRange, Eof, Literal};

/// Stable handle of a parser node inside one grammar's arena.
///
/// The second field tags the builder that handed the id out, so an id can not
/// be used with another builder even when its index is in range there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParserId(pub(crate) usize, pub(crate) u32);

impl ParserId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ParserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a rule definition. Rule nodes point here instead of owning their
/// alternatives, which is what allows a rule to refer back to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Any(Any),
    CharRange(CharRange),
    CharSet(CharSet),
    Literal(Literal),
    Eof(Eof),
    Sequence(Vec<ParserId>),
    Rule(RuleId),
}

#[derive(Debug, Clone)]
pub(crate) struct RuleDef {
    pub(crate) name: String,
    /// The rule's own node
    pub(crate) node: ParserId,
    pub(crate) alternatives: Vec<ParserId>,
}
