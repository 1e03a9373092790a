//! Group-by aggregation: row counts and column sums per key.
//!
//! Groups are emitted in first-appearance order of their key. The key cell
//! written to the output is the first cell seen for that key.

use std::collections::BTreeMap;

use crate::carrier::table::Table;
use crate::carrier::value::{Key, Value};
use crate::operators::OperatorError;

/// One group: the representative key cell and the indices of its rows.
struct Group {
    key: Value,
    rows: Vec<usize>,
}

fn group_rows(table: &Table, key_column: &str) -> Result<Vec<Group>, OperatorError> {
    let key_col = table.require_column(key_column)?;
    let mut slots: BTreeMap<Key, usize> = BTreeMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (i, row) in table.rows().iter().enumerate() {
        let cell = &row[key_col];
        let slot = *slots.entry(cell.key()).or_insert_with(|| {
            groups.push(Group {
                key: cell.clone(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(i);
    }
    Ok(groups)
}

/// Count rows per distinct value of `key_column`.
///
/// Output columns: `[key_column, count_column]`; counts are integers.
///
/// # Errors
///
/// Returns [`OperatorError::UnknownColumn`] if `key_column` is missing, or
/// [`OperatorError::Table`] if `count_column` equals `key_column`.
pub fn group_count(
    table: &Table,
    key_column: &str,
    count_column: &str,
) -> Result<Table, OperatorError> {
    let rows = group_rows(table, key_column)?
        .into_iter()
        .map(|g| {
            let count = i64::try_from(g.rows.len()).unwrap_or(i64::MAX);
            vec![g.key, Value::Int(count)]
        })
        .collect();
    Ok(Table::new(
        vec![key_column.to_string(), count_column.to_string()],
        rows,
    )?)
}

/// Sum `value_column` per distinct value of `key_column`.
///
/// Output columns: `[key_column, sum_column]`; sums are floats. `Null` cells
/// contribute nothing.
///
/// # Errors
///
/// Returns [`OperatorError::UnknownColumn`] if either input column is missing,
/// [`OperatorError::NonNumeric`] if a `value_column` cell is text, or
/// [`OperatorError::Table`] if `sum_column` equals `key_column`.
pub fn group_sum(
    table: &Table,
    key_column: &str,
    value_column: &str,
    sum_column: &str,
) -> Result<Table, OperatorError> {
    let value_col = table.require_column(value_column)?;
    let groups = group_rows(table, key_column)?;
    let mut rows = Vec::with_capacity(groups.len());
    for g in groups {
        let mut total = 0.0_f64;
        for &i in &g.rows {
            let cell = &table.rows()[i][value_col];
            if cell.is_null() {
                continue;
            }
            total += cell.as_f64().ok_or_else(|| OperatorError::NonNumeric {
                column: value_column.to_string(),
                row_index: i,
            })?;
        }
        rows.push(vec![g.key, Value::Float(total)]);
    }
    Ok(Table::new(
        vec![key_column.to_string(), sum_column.to_string()],
        rows,
    )?)
}
