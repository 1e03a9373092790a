//! Inner join on a shared key column.

use std::collections::{BTreeMap, BTreeSet};

use crate::carrier::table::Table;
use crate::carrier::value::{Key, Value};
use crate::operators::OperatorError;

/// Suffix appended to a left-side column whose name collides with a right-side one.
pub const LEFT_SUFFIX: &str = "_x";
/// Suffix appended to a right-side column whose name collides with a left-side one.
pub const RIGHT_SUFFIX: &str = "_y";

/// Inner-join `left` and `right` on the column `on`, present in both.
///
/// Output columns: every `left` column in order, then every `right` column
/// except `on`. Non-key names present on both sides are disambiguated with
/// [`LEFT_SUFFIX`] / [`RIGHT_SUFFIX`]. The key column appears once.
///
/// Output rows: for each `left` row in order, one row per matching `right`
/// row in `right` order. Left rows without a match are dropped, so when every
/// left key exists exactly once on the right the output has `left.row_count()`
/// rows.
///
/// # Errors
///
/// Returns [`OperatorError::UnknownColumn`] if `on` is missing from either side.
pub fn inner_join(left: &Table, right: &Table, on: &str) -> Result<Table, OperatorError> {
    let left_key = left.require_column(on)?;
    let right_key = right.require_column(on)?;

    let left_names: BTreeSet<&str> = left.columns().iter().map(String::as_str).collect();
    let right_names: BTreeSet<&str> = right
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| *c != on)
        .collect();

    let mut columns: Vec<String> = left
        .columns()
        .iter()
        .map(|c| {
            if c != on && right_names.contains(c.as_str()) {
                format!("{c}{LEFT_SUFFIX}")
            } else {
                c.clone()
            }
        })
        .collect();
    let right_kept: Vec<usize> = (0..right.column_count())
        .filter(|&i| i != right_key)
        .collect();
    for &i in &right_kept {
        let c = &right.columns()[i];
        if left_names.contains(c.as_str()) {
            columns.push(format!("{c}{RIGHT_SUFFIX}"));
        } else {
            columns.push(c.clone());
        }
    }

    let mut index: BTreeMap<Key, Vec<usize>> = BTreeMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        index.entry(row[right_key].key()).or_default().push(i);
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for left_row in left.rows() {
        let Some(matches) = index.get(&left_row[left_key].key()) else {
            continue;
        };
        for &ri in matches {
            let right_row = &right.rows()[ri];
            let mut row = left_row.clone();
            row.extend(right_kept.iter().map(|&i| right_row[i].clone()));
            rows.push(row);
        }
    }

    Ok(Table::new(columns, rows)?)
}
