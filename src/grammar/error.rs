use thiserror::Error;

/// Defects found while assembling a grammar.
///
/// These are fatal for the grammar being built: a grammar that produced one of
/// these errors is never handed out for parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Malformed char set spec {spec:?}: {reason}")]
    MalformedCharSetSpec { spec: String, reason: String },
    #[error("Malformed range: {lo:?} is greater than {hi:?}")]
    MalformedRange { lo: char, hi: char },
    #[error("Unresolved rule: {name} was never bound")]
    UnresolvedRule { name: String },
    #[error("Unbounded recursion: {}", cycle.join(" -> "))]
    UnboundedRecursion { cycle: Vec<String> },
    #[error("Rule already bound: {name}")]
    RuleAlreadyBound { name: String },
    #[error("Duplicate rule: {name}")]
    DuplicateRule { name: String },
    #[error("Empty rule: {name} has no alternatives")]
    EmptyRule { name: String },
    #[error("Unknown parser: #{id}")]
    UnknownParser { id: usize },
    #[error("Not a rule: #{id}")]
    NotARule { id: usize },
}

impl GrammarError {
    pub fn malformed_spec(spec: &str, reason: impl Into<String>) -> Self {
        GrammarError::MalformedCharSetSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

pub type GrammarResult<T> = Result<T, GrammarError>;
