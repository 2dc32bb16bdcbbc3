//! # Grammars
//!
//! A [`Grammar`] is an arena of parser nodes addressed by [`ParserId`], plus the
//! rule definitions that tie recursive parts of the graph together. Grammars
//! are assembled with a [`GrammarBuilder`], validated once in
//! [`GrammarBuilder::build`], and are immutable afterwards: a single grammar
//! can serve any number of parses, from any number of threads.
//!
//! ## Matching Modes
//!
//! Every evaluation carries a [`Mode`]. It only matters where a rule has to
//! pick between alternatives:
//!
//! * `Mode::Parser`: first successful alternative in declaration order
//! * `Mode::Lexer`: longest successful alternative, ties to the first declared
//!
//! ## Failure Offsets
//!
//! A failed parse reports the deepest offset any attempt got to. Primitive
//! matchers always fail at the offset they were asked to start at.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::analyzer::core::{Input, Mode, NoMatch, ParseResult};
use crate::analyzer::memo::MemoTable;
use crate::config::EngineConfig;
use crate::error::{Error, InternalResult};

mod builder;
mod error;
pub(crate) mod eval;
mod node;
mod validate;

pub use builder::GrammarBuilder;
pub use error::{GrammarError, GrammarResult};
pub use node::{ParserId, RuleId};

use eval::Evaluator;
pub(crate) use node::{Node, RuleDef};

#[derive(Debug, Clone)]
pub struct Grammar {
    nodes: Vec<Node>,
    rules: Vec<RuleDef>,
    names: HashMap<String, RuleId>,
    root: ParserId,
    config: EngineConfig,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    pub(crate) fn new(
        nodes: Vec<Node>,
        rules: Vec<RuleDef>,
        names: HashMap<String, RuleId>,
        root: ParserId,
        config: EngineConfig,
    ) -> Self {
        Self {
            nodes,
            rules,
            names,
            root,
            config,
        }
    }

    pub fn root(&self) -> ParserId {
        self.root
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The node of the rule called `name`.
    pub fn rule_id(&self, name: &str) -> Option<ParserId> {
        self.lookup_rule(name).map(|rule| self.rule_def(rule).node)
    }

    /// Rule names in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub(crate) fn node(&self, id: ParserId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn rule_def(&self, rule: RuleId) -> &RuleDef {
        &self.rules[rule.0]
    }

    pub(crate) fn lookup_rule(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    /// Matches the root parser against `input`, starting at character offset `start`.
    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn parse(&self, input: &str, start: usize, mode: Mode) -> ParseResult {
        self.parse_input(&Input::new(input), start, mode)
    }

    pub fn parse_input(&self, input: &Input, start: usize, mode: Mode) -> ParseResult {
        let memo = self.config.memoize.then(MemoTable::new);
        self.evaluate(self.root, input, start, mode, memo.as_ref())
    }

    /// Matches the rule called `name` instead of the root.
    pub fn parse_rule(
        &self,
        name: &str,
        input: &str,
        start: usize,
        mode: Mode,
    ) -> InternalResult<ParseResult> {
        let id = self
            .rule_id(name)
            .ok_or_else(|| Error::UnknownRule(name.to_string()))?;
        let input = Input::new(input);
        let memo = self.config.memoize.then(MemoTable::new);
        Ok(self.evaluate(id, &input, start, mode, memo.as_ref()))
    }

    /// Matches the root from the beginning of `input` in the configured default mode.
    pub fn recognize(&self, input: &str) -> ParseResult {
        self.parse(input, 0, self.config.default_mode)
    }

    /// Opens a session over one input whose rule results are shared between
    /// all parses made through it.
    pub fn session(&self, input: &str) -> Session<'_> {
        Session {
            grammar: self,
            input: Input::new(input),
            memo: self.config.memoize.then(MemoTable::new),
        }
    }

    fn evaluate(
        &self,
        id: ParserId,
        input: &Input,
        start: usize,
        mode: Mode,
        memo: Option<&MemoTable>,
    ) -> ParseResult {
        if start > input.len() {
            warn!(start, len = input.len(), "start index beyond end of input");
            return Err(NoMatch::at(input.len()));
        }
        Evaluator::new(self, input.as_slice(), memo).run(id, start, mode)
    }

    fn render(&self, id: ParserId) -> String {
        match self.node(id) {
            Node::Any(parser) => parser.to_string(),
            Node::CharRange(parser) => parser.to_string(),
            Node::CharSet(parser) => parser.to_string(),
            Node::Literal(parser) => parser.to_string(),
            Node::Eof(parser) => parser.to_string(),
            Node::Sequence(children) if children.is_empty() => "()".to_string(),
            Node::Sequence(children) => children
                .iter()
                .map(|child| match self.node(*child) {
                    Node::Sequence(_) => format!("( {} )", self.render(*child)),
                    _ => self.render(*child),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Node::Rule(rule) => self.rule_def(*rule).name.clone(),
        }
    }
}

impl fmt::Display for Grammar {
    /// Renders the grammar in the usual `rule : alt | alt ;` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if !matches!(self.node(self.root), Node::Rule(_)) {
            writeln!(f, "start\n  : {}\n  ;", self.render(self.root))?;
            first = false;
        }
        for rule in &self.rules {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "{}", rule.name)?;
            for (index, alternative) in rule.alternatives.iter().enumerate() {
                let separator = if index == 0 { ':' } else { '|' };
                writeln!(f, "  {} {}", separator, self.render(*alternative))?;
            }
            writeln!(f, "  ;")?;
        }
        Ok(())
    }
}

/// Parses over a single input, reusing rule results across calls.
///
/// A session is `Sync`, so several threads may parse the same input from
/// different offsets through one session.
#[derive(Debug)]
pub struct Session<'g> {
    grammar: &'g Grammar,
    input: Input,
    memo: Option<MemoTable>,
}

impl<'g> Session<'g> {
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn memo(&self) -> Option<&MemoTable> {
        self.memo.as_ref()
    }

    pub fn parse(&self, start: usize, mode: Mode) -> ParseResult {
        self.grammar
            .evaluate(self.grammar.root, &self.input, start, mode, self.memo.as_ref())
    }

    pub fn parse_rule(&self, name: &str, start: usize, mode: Mode) -> InternalResult<ParseResult> {
        let id = self
            .grammar
            .rule_id(name)
            .ok_or_else(|| Error::UnknownRule(name.to_string()))?;
        Ok(self
            .grammar
            .evaluate(id, &self.input, start, mode, self.memo.as_ref()))
    }

    pub(crate) fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.grammar, self.input.as_slice(), self.memo.as_ref())
    }
}
