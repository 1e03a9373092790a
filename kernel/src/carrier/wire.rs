//! Table wire codec: the JSON shape tables take on the plugin boundary.
//!
//! # Format
//!
//! ```text
//! table   := {"columns": [string, ...], "rows": [[cell, ...], ...]}
//! records := [[cell, ...], ...]
//! cell    := integer | non-integer number | string | null
//! ```
//!
//! Integers decode to [`Value::Int`], every other number to [`Value::Float`].
//! A float that happens to be integral is written with a fractional part
//! (`250.0`, not `250`) so it decodes back to a float. Booleans, objects, and
//! nested arrays are not valid cells. Non-finite floats encode as `null`.
//!
//! Decoding validates the table invariants (unique columns, rectangular rows)
//! through [`Table::new`].

use crate::carrier::table::{Table, TableError};
use crate::carrier::value::Value;

/// Error type for decoding tables and records from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The JSON text did not parse.
    Parse { detail: String },
    /// The JSON parsed but is not shaped like a table or record list.
    Shape { detail: String },
    /// A cell holds a JSON value that is not a valid cell.
    InvalidCell { row_index: usize, detail: String },
    /// The decoded columns/rows violate a table invariant.
    Table(TableError),
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "JSON parse error: {detail}"),
            Self::Shape { detail } => write!(f, "unexpected JSON shape: {detail}"),
            Self::InvalidCell { row_index, detail } => {
                write!(f, "invalid cell in row {row_index}: {detail}")
            }
            Self::Table(e) => write!(f, "invalid table: {e}"),
        }
    }
}

impl std::error::Error for WireError {}

/// Encode one cell.
#[must_use]
pub fn encode_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Null => serde_json::Value::Null,
    }
}

/// Encode a table as `{"columns": [...], "rows": [[...], ...]}`.
#[must_use]
pub fn encode_table(table: &Table) -> serde_json::Value {
    serde_json::json!({
        "columns": table.columns(),
        "rows": encode_records(table.rows()),
    })
}

/// Encode a record list as an array of arrays.
#[must_use]
pub fn encode_records(records: &[Vec<Value>]) -> serde_json::Value {
    serde_json::Value::Array(
        records
            .iter()
            .map(|r| serde_json::Value::Array(r.iter().map(encode_value).collect()))
            .collect(),
    )
}

/// Decode one cell.
fn decode_value(json: &serde_json::Value, row_index: usize) -> Result<Value, WireError> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(x) = n.as_f64() {
                Ok(Value::Float(x))
            } else {
                Err(WireError::InvalidCell {
                    row_index,
                    detail: format!("unrepresentable number {n}"),
                })
            }
        }
        other => Err(WireError::InvalidCell {
            row_index,
            detail: format!("unsupported cell type: {other}"),
        }),
    }
}

/// Decode a record list (array of arrays of cells).
///
/// Records are not required to share a width; that is for the constructor
/// receiving them to judge.
///
/// # Errors
///
/// Returns [`WireError::Shape`] if the value is not an array of arrays, or
/// [`WireError::InvalidCell`] for a cell that is not a valid cell.
pub fn decode_records(json: &serde_json::Value) -> Result<Vec<Vec<Value>>, WireError> {
    let rows = json.as_array().ok_or_else(|| WireError::Shape {
        detail: "records must be an array".into(),
    })?;
    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells = row.as_array().ok_or_else(|| WireError::Shape {
                detail: format!("record {row_index} is not an array"),
            })?;
            cells.iter().map(|c| decode_value(c, row_index)).collect()
        })
        .collect()
}

/// Decode a table object.
///
/// # Errors
///
/// Returns [`WireError`] if the JSON is not a table object, a cell is
/// invalid, or the table invariants are violated.
pub fn decode_table(json: &serde_json::Value) -> Result<Table, WireError> {
    let obj = json.as_object().ok_or_else(|| WireError::Shape {
        detail: "table must be an object".into(),
    })?;
    let columns = obj
        .get("columns")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| WireError::Shape {
            detail: "missing \"columns\" array".into(),
        })?
        .iter()
        .map(|c| {
            c.as_str().map(str::to_string).ok_or_else(|| WireError::Shape {
                detail: format!("column name is not a string: {c}"),
            })
        })
        .collect::<Result<Vec<String>, WireError>>()?;
    let rows = decode_records(obj.get("rows").ok_or_else(|| WireError::Shape {
        detail: "missing \"rows\" array".into(),
    })?)?;
    Table::new(columns, rows).map_err(WireError::Table)
}

/// Parse JSON bytes and decode a table.
///
/// # Errors
///
/// Returns [`WireError::Parse`] for malformed JSON, otherwise as [`decode_table`].
pub fn table_from_slice(bytes: &[u8]) -> Result<Table, WireError> {
    let json: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| WireError::Parse {
            detail: e.to_string(),
        })?;
    decode_table(&json)
}
