//! FILENAME: core/tabulate-frame/src/error.rs

use tabulate_engine::TabulateError;
use thiserror::Error;

pub type FrameResult<T> = Result<T, FrameError>;

/// Errors raised while extracting columns from a frame or tabulating them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Column {name} has {actual} rows, frame has {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column {0} cannot be used as weights: it is not numeric")]
    NonNumericWeights(String),

    #[error(transparent)]
    Tabulate(#[from] TabulateError),
}
