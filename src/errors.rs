use thiserror::Error;

// Define an enum to represent the ways a rule evaluation can fail
#[derive(Debug, Error)]
pub enum EvalError {
    // Clause names a predicate that has no entry in the table
    #[error("unknown predicate: {0}")]
    UnknownPredicate(String),

    // A comparison predicate referenced a context key that is not present
    #[error("key {0} not provided")]
    MissingKey(String),

    // Wrong argument count, or an argument a predicate could not convert
    #[error("{0}")]
    Argument(String),

    // Umbrella error surfaced to callers, carrying the offending clause text
    #[error("invalid clause `{clause}`: {source}")]
    InvalidClause {
        clause: String,
        #[source]
        source: Box<EvalError>,
    },
}

impl EvalError {
    /// The underlying cause of an `InvalidClause`, or the error itself.
    pub fn cause(&self) -> &EvalError {
        match self {
            EvalError::InvalidClause { source, .. } => source,
            other => other,
        }
    }
}

// Type alias for results that use `EvalError` as the error type
pub type Result<T> = std::result::Result<T, EvalError>;
