//! FILENAME: core/tabulate-engine/src/error.rs

use thiserror::Error;

/// Result type for tabulation operations.
pub type TabulateResult<T> = Result<T, TabulateError>;

/// Input-contract violations reported by the tabulation engine.
/// Every check runs before aggregation starts; no partial table is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabulateError {
    #[error("Empty input: observation sequence {dimension} has no elements")]
    EmptyInput { dimension: usize },

    #[error("Length mismatch: {what} has {actual} elements, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Negative weight {weight} at position {index}")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("Non-finite weight {weight} at position {index}")]
    NonFiniteWeight { index: usize, weight: f64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Duplicate level: {0}")]
    DuplicateLevel(String),

    #[error("Value {value} at position {index} is not a declared level")]
    UnknownLevel { index: usize, value: String },
}

impl TabulateError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
