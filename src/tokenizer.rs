//! # Tokenizer
//!
//! Splits a whole input into tokens by applying one token rule over and over in
//! lexer mode. The token rule lists the token kinds as its alternatives; at
//! every offset the longest one wins, and it names the token it produced.
//!
//! ```text
//! token : Number | Identifier | Space ;
//! ```
//!
//! Tokenizing stops with an error at the first offset where no alternative
//! matches, or where the winning alternative matches nothing.

use thiserror::Error;
use tracing::{debug, error};

use crate::analyzer::core::{Mode, Span};
use crate::grammar::{Grammar, Node, RuleId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("Unknown token rule: {0}")]
    UnknownRule(String),
    #[error("No token at index {index} (deepest attempt reached {deepest})")]
    NoToken { index: usize, deepest: usize },
    #[error("Empty token at index {index}")]
    EmptyToken { index: usize },
}

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub span: Span,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Tokenizer<'g> {
    grammar: &'g Grammar,
    rule: RuleId,
    kinds: Vec<String>,
}

impl<'g> Tokenizer<'g> {
    pub fn new(grammar: &'g Grammar, token_rule: &str) -> TokenizerResult<Self> {
        let rule = grammar
            .lookup_rule(token_rule)
            .ok_or_else(|| TokenizerError::UnknownRule(token_rule.to_string()))?;

        // an alternative that is itself a rule lends the token its name
        let kinds = grammar
            .rule_def(rule)
            .alternatives
            .iter()
            .enumerate()
            .map(|(index, alternative)| match grammar.node(*alternative) {
                Node::Rule(kind) => grammar.rule_def(*kind).name.clone(),
                _ => format!("{}#{}", token_rule, index),
            })
            .collect();

        Ok(Self {
            grammar,
            rule,
            kinds,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn tokenize(&self, input: &str) -> TokenizerResult<Vec<Token>> {
        let session = self.grammar.session(input);
        let evaluator = session.evaluator();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < session.input().len() {
            let choice = evaluator
                .resolve_rule(self.rule, pos, Mode::Lexer)
                .map_err(|failure| {
                    let error = TokenizerError::NoToken {
                        index: pos,
                        deepest: failure.index,
                    };
                    error!("{}", error);
                    error
                })?;

            if choice.span.is_empty() {
                let error = TokenizerError::EmptyToken { index: pos };
                error!("{}", error);
                return Err(error);
            }

            tokens.push(Token {
                kind: self.kinds[choice.alternative].clone(),
                span: choice.span,
                text: session.input().slice(choice.span),
            });
            pos = choice.span.end;
        }

        debug!(count = tokens.len(), "tokenized");
        Ok(tokens)
    }
}
