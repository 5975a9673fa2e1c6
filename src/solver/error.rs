use thiserror::Error;

/// Errors reported for input that breaks the formula invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// A literal equal to zero. `clause` and `position` locate it in the raw instance.
    #[error("literal 0 at clause {clause}, position {position}")]
    ZeroLiteral { clause: usize, position: usize },

    /// The magnitude of the literal does not fit a variable index.
    #[error("variable of literal {0} is out of range")]
    VariableOutOfRange(i64),

    /// Generator parameters that cannot produce clauses of the requested length.
    #[error("cannot draw {clause_len} distinct literals per clause from {n_vars} variables")]
    InvalidGeneratorParams { n_vars: usize, clause_len: usize },
}

pub type Result<T> = std::result::Result<T, SolverError>;
