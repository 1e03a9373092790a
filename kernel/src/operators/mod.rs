//! Operators module: relational operators over [`Table`](crate::carrier::table::Table).
//!
//! Depends on `carrier`. Does not import from `proof`.
//!
//! Every operator is pure: inputs are borrowed, a new table is returned, and
//! row order in the output follows first appearance in the input.

pub mod group;
pub mod join;
pub mod select;

use crate::carrier::table::TableError;

/// Typed failure for operator application. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// A named input column does not exist.
    UnknownColumn { name: String },
    /// A cell that must be numeric is not.
    NonNumeric { column: String, row_index: usize },
    /// The output table could not be built.
    Table(TableError),
}

impl std::fmt::Display for OperatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownColumn { name } => write!(f, "unknown column: {name}"),
            Self::NonNumeric { column, row_index } => {
                write!(f, "non-numeric cell in column {column} at row {row_index}")
            }
            Self::Table(e) => write!(f, "output table error: {e}"),
        }
    }
}

impl std::error::Error for OperatorError {}

impl From<TableError> for OperatorError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::UnknownColumn { name } => Self::UnknownColumn { name },
            other => Self::Table(other),
        }
    }
}
