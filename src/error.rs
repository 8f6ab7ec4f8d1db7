//! Error types for premise generation and question composition

use thiserror::Error;

use crate::rules::RuleName;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors surfaced by a generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Caller asked for an impossible premise layout
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A schema received the wrong number of arguments
    #[error("rule {rule} takes {expected} argument(s), got {actual}")]
    SchemaArityMismatch {
        rule: RuleName,
        expected: usize,
        actual: usize,
    },

    /// Formula arguments given to a quantifier schema, or predicates to a propositional one
    #[error("rule {rule} expects {expected} arguments")]
    SchemaKindMismatch { rule: RuleName, expected: &'static str },

    /// Retry ceiling hit while resampling tautologies or duplicates
    #[error("gave up on {stage} after {attempts} rejected candidates")]
    ExhaustedGenerationBudget { stage: &'static str, attempts: usize },

    /// Operation called on inputs it cannot serve (empty pools, bad indices)
    #[error("precondition violated: {0}")]
    PreconditionViolated(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}
