use thiserror::Error;

/// Errors reported at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A clause with no literals can never be satisfied and is rejected
    /// before it reaches the engine.
    #[error("clause contains no literals")]
    EmptyClause,

    /// A literal token with no variable name.
    #[error("malformed literal: {token:?}")]
    InvalidLiteral { token: String },

    /// Clause added after a solution has been computed.
    #[error("solution found: cannot add new clauses")]
    Frozen,

    /// I/O error while reading clause input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
