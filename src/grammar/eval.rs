use std::cell::Cell;

use tracing::trace;

use super::node::{Node, ParserId, RuleId};
use super::Grammar;
use crate::analyzer::core::{Mode, NoMatch, ParseResult, Parser, Span};
use crate::analyzer::memo::{MemoEntry, MemoTable};
use crate::analyzer::resolve::{resolve, ChoiceResult};

// Repetition is right recursion, so depth grows with the input. Below the red
// zone the stack is extended on the heap.
const RED_ZONE: usize = 128 * 1024;
const STACK_PER_RECURSION: usize = 4 * 1024 * 1024;

/// Walks a grammar's node graph over one input.
///
/// Evaluation is plain recursion: a failed attempt is an `Err` value handed
/// back to the caller, which is then free to try the next alternative from the
/// same offset. Independently of what the caller does with a failure, the
/// evaluator remembers the furthest offset any attempt failed at; that is the
/// offset reported when the whole parse fails.
pub(crate) struct Evaluator<'a> {
    grammar: &'a Grammar,
    input: &'a [char],
    memo: Option<&'a MemoTable>,
    farthest: Cell<usize>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(grammar: &'a Grammar, input: &'a [char], memo: Option<&'a MemoTable>) -> Self {
        Self {
            grammar,
            input,
            memo,
            farthest: Cell::new(0),
        }
    }

    /// Evaluates `id` at `start`, reporting failures at the furthest offset
    /// reached by any attempt.
    pub(crate) fn run(&self, id: ParserId, start: usize, mode: Mode) -> ParseResult {
        self.farthest.set(start);
        self.eval(id, start, mode)
            .map_err(|failure| NoMatch::at(failure.index.max(self.farthest.get())))
    }

    pub(crate) fn eval(&self, id: ParserId, pos: usize, mode: Mode) -> ParseResult {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || self.eval_node(id, pos, mode))
    }

    fn eval_node(&self, id: ParserId, pos: usize, mode: Mode) -> ParseResult {
        let input = self.input;
        let result = match self.grammar.node(id) {
            Node::Any(parser) => parser.parse(input, pos, mode),
            Node::CharRange(parser) => parser.parse(input, pos, mode),
            Node::CharSet(parser) => parser.parse(input, pos, mode),
            Node::Literal(parser) => parser.parse(input, pos, mode),
            Node::Eof(parser) => parser.parse(input, pos, mode),
            Node::Sequence(children) => self.eval_sequence(children, pos, mode),
            Node::Rule(rule) => self.resolve_rule(*rule, pos, mode).map(|choice| choice.span),
        };
        if let Err(failure) = result {
            self.reach(failure.index);
        }
        result
    }

    fn eval_sequence(&self, children: &[ParserId], pos: usize, mode: Mode) -> ParseResult {
        let mut end = pos;
        for child in children {
            end = self.eval(*child, end, mode)?.end;
        }
        Ok(Span::new(pos, end))
    }

    /// Settles a rule on one of its alternatives with the policy of `mode`.
    pub(crate) fn resolve_rule(&self, rule: RuleId, pos: usize, mode: Mode) -> ChoiceResult {
        if let Some(hit) = self.memo.and_then(|memo| memo.get(rule, pos, mode)) {
            self.reach(hit.farthest);
            return hit.outcome;
        }

        // track the rule's own reach separately so it can be cached with it
        let outer = self.farthest.replace(pos);
        let def = self.grammar.rule_def(rule);
        let outcome = resolve(mode, &def.alternatives, pos, |alternative| {
            self.eval(*alternative, pos, mode)
        });
        let farthest = self.farthest.get();
        self.farthest.set(outer.max(farthest));
        trace!(rule = %def.name, pos, %mode, ?outcome, farthest, "rule resolved");

        if let Some(memo) = self.memo {
            memo.insert(rule, pos, mode, MemoEntry { outcome, farthest });
        }
        outcome
    }

    fn reach(&self, index: usize) {
        if index > self.farthest.get() {
            self.farthest.set(index);
        }
    }
}
