use thiserror::Error;

use crate::grammar::GrammarError;
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

pub type InternalResult<T> = Result<T, Error>;
