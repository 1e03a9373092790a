//! `Table`: named columns over an ordered sequence of rows.
//!
//! This is the "tabular structure" every entry point of a submission
//! consumes and produces. Two invariants are enforced at construction and
//! hold for every `Table` value:
//!
//! 1. Column names are unique.
//! 2. Every row has exactly one cell per column.
//!
//! Row order and column order are preserved exactly as given.

use std::collections::BTreeSet;

use crate::carrier::value::{Key, Value};

/// A rectangular, column-named table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Error type for table construction and column access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A column name appears more than once.
    DuplicateColumn { name: String },
    /// A row does not have one cell per column.
    RaggedRow {
        row_index: usize,
        expected: usize,
        actual: usize,
    },
    /// A named column does not exist.
    UnknownColumn { name: String },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateColumn { name } => write!(f, "duplicate column: {name}"),
            Self::RaggedRow {
                row_index,
                expected,
                actual,
            } => write!(
                f,
                "row {row_index} has {actual} cells, expected {expected}"
            ),
            Self::UnknownColumn { name } => write!(f, "unknown column: {name}"),
        }
    }
}

impl std::error::Error for TableError {}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a column name repeats, or
    /// [`TableError::RaggedRow`] if any row's width differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut seen = BTreeSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
        }
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row_index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table whose invariants the caller already guarantees.
    pub(crate) fn from_parts_unchecked(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Create a table from borrowed column names and record slices.
    ///
    /// # Errors
    ///
    /// Same as [`Table::new`].
    pub fn from_records<S: AsRef<str>>(
        columns: &[S],
        records: &[Vec<Value>],
    ) -> Result<Self, TableError> {
        Self::new(
            columns.iter().map(|c| c.as_ref().to_string()).collect(),
            records.to_vec(),
        )
    }

    /// A table with the given columns and no rows.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a column name repeats.
    pub fn empty<S: AsRef<str>>(columns: &[S]) -> Result<Self, TableError> {
        Self::from_records(columns, &[])
    }

    /// `(row_count, column_count)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column by name, as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if the column does not exist.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// The cell at `row` in the named column.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// All cells of the named column, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if the column does not exist.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        let col = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| &r[col]).collect())
    }

    /// Look up `value_column` in the first row whose `key_column` matches `key`.
    ///
    /// Keys are compared through [`Value::key`], so `Int(401)` finds a row
    /// holding `Float(401.0)`. Returns `None` if either column is missing or no
    /// row matches.
    #[must_use]
    pub fn lookup(&self, key_column: &str, key: &Value, value_column: &str) -> Option<&Value> {
        let key_col = self.column_index(key_column)?;
        let value_col = self.column_index(value_column)?;
        let wanted: Key = key.key();
        self.rows
            .iter()
            .find(|r| r[key_col].key() == wanted)
            .map(|r| &r[value_col])
    }

    /// Number of rows whose `key_column` matches `key`. Zero if the column is missing.
    #[must_use]
    pub fn count_matching(&self, key_column: &str, key: &Value) -> usize {
        let Some(key_col) = self.column_index(key_column) else {
            return 0;
        };
        let wanted: Key = key.key();
        self.rows.iter().filter(|r| r[key_col].key() == wanted).count()
    }
}
