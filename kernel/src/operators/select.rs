//! Row selection.

use crate::carrier::table::Table;
use crate::carrier::value::Value;
use crate::operators::OperatorError;

/// Keep the rows for which `keep` returns `true`, preserving order and columns.
#[must_use]
pub fn filter_rows(table: &Table, keep: impl Fn(&[Value]) -> bool) -> Table {
    let rows: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .filter(|r| keep(r.as_slice()))
        .cloned()
        .collect();
    // Same columns, subset of already-rectangular rows.
    Table::from_parts_unchecked(table.columns().to_vec(), rows)
}

/// Keep the rows whose cell in `column` satisfies `keep`.
///
/// # Errors
///
/// Returns [`OperatorError::UnknownColumn`] if `column` does not exist.
pub fn filter_column(
    table: &Table,
    column: &str,
    keep: impl Fn(&Value) -> bool,
) -> Result<Table, OperatorError> {
    let col = table.require_column(column)?;
    Ok(filter_rows(table, |row| keep(&row[col])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Table {
        Table::from_records(
            &["CustomerID", "PurchaseCount"],
            &[vec![401.into(), 2.into()], vec![402.into(), 1.into()]],
        )
        .unwrap()
    }

    #[test]
    fn filter_column_keeps_matching_rows() {
        let repeat = filter_column(&counts(), "PurchaseCount", |v| {
            v.as_i64().is_some_and(|n| n >= 2)
        })
        .unwrap();
        assert_eq!(repeat.shape(), (1, 2));
        assert_eq!(repeat.cell(0, "CustomerID"), Some(&Value::Int(401)));
    }

    #[test]
    fn filter_rows_preserves_columns_when_empty() {
        let none = filter_rows(&counts(), |_| false);
        assert_eq!(none.shape(), (0, 2));
        assert_eq!(none.columns(), ["CustomerID", "PurchaseCount"]);
    }

    #[test]
    fn filter_unknown_column_is_error() {
        assert!(filter_column(&counts(), "Nope", |_| true).is_err());
    }
}
