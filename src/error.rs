// src/error.rs
use thiserror::Error;

/// Failures while reading a reference table and splitting it by category.
///
/// Row numbers are 1-based positions among the data rows (the header row is
/// not counted).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("document has no table header row")]
    EmptyDocument,

    #[error("row {row}: malformed food code {code:?}")]
    MalformedFoodCode { row: usize, code: String },

    #[error("row {row}: no cells")]
    EmptyRow { row: usize },
}
