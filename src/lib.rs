//! Recursive-descent parser combinators with two ways of settling a rule:
//! longest match in [`Mode::Lexer`], ordered choice in [`Mode::Parser`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod grammar;
pub mod tokenizer;

// Re-exports
pub use analyzer::{Input, Mode, NoMatch, ParseResult, Parser, Span};
pub use config::EngineConfig;
pub use error::*;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, ParserId, Session};
pub use tokenizer::{Token, Tokenizer, TokenizerError};
