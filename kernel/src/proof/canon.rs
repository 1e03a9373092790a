//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! Grade reports and table digests are hashed over these bytes, so two runs
//! that produce the same logical content produce the same digest regardless
//! of map insertion order or how a number was spelled on the wire.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. No extraneous whitespace (compact form: `{"a":1,"b":2}`).
//! 3. Strings are JSON-escaped per RFC 8259 §7.
//! 4. Integers are written in decimal. Finite floats are written in their
//!    shortest round-trip form and always carry a fraction or exponent
//!    (`250.0`, `1e-7`), so `250` and `250.0` stay distinct. NaN and
//!    infinities are rejected.
//! 5. `null`, `true`, `false` are written literally.
//! 6. Output is always valid UTF-8.

use std::io::Write;

use crate::carrier::table::Table;
use crate::carrier::value::Value;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A number was NaN or infinite.
    NonFiniteNumber { raw: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteNumber { raw } => {
                write!(f, "non-finite number in canonical JSON: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonFiniteNumber`] if a number cannot be represented
/// as an integer or a finite float.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

/// Canonical bytes of a table: `{"columns":[...],"rows":[[...],...]}`.
///
/// Cells are written directly from [`Value`], so an `Int(250)` and a
/// `Float(250.0)` cell produce different bytes.
///
/// # Errors
///
/// Returns [`CanonError::NonFiniteNumber`] for a NaN or infinite float cell.
pub fn canonical_table_bytes(table: &Table) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"{\"columns\":[");
    for (i, name) in table.columns().iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        write_string(&mut buf, name);
    }
    buf.extend_from_slice(b"],\"rows\":[");
    for (i, row) in table.rows().iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        buf.push(b'[');
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                buf.push(b',');
            }
            match cell {
                Value::Int(n) => {
                    let _ = write!(buf, "{n}");
                }
                Value::Float(x) => write_float(&mut buf, *x)?,
                Value::Text(s) => write_string(&mut buf, s),
                Value::Null => buf.extend_from_slice(b"null"),
            }
        }
        buf.push(b']');
    }
    buf.extend_from_slice(b"]}");
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Null => buf.extend_from_slice(b"null"),
        serde_json::Value::Bool(true) => buf.extend_from_slice(b"true"),
        serde_json::Value::Bool(false) => buf.extend_from_slice(b"false"),
        serde_json::Value::Number(n) => write_number(buf, n)?,
        serde_json::Value::String(s) => write_string(buf, s),
        serde_json::Value::Array(arr) => {
            buf.push(b'[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item)?;
            }
            buf.push(b']');
        }
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_string(buf, key);
                buf.push(b':');
                write_value(buf, &map[*key])?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}

fn write_number(buf: &mut Vec<u8>, n: &serde_json::Number) -> Result<(), CanonError> {
    if let Some(i) = n.as_i64() {
        let _ = write!(buf, "{i}");
        Ok(())
    } else if let Some(u) = n.as_u64() {
        let _ = write!(buf, "{u}");
        Ok(())
    } else if let Some(x) = n.as_f64() {
        write_float(buf, x)
    } else {
        Err(CanonError::NonFiniteNumber { raw: n.to_string() })
    }
}

fn write_float(buf: &mut Vec<u8>, x: f64) -> Result<(), CanonError> {
    if !x.is_finite() {
        return Err(CanonError::NonFiniteNumber {
            raw: format!("{x:?}"),
        });
    }
    // `{:?}` is the shortest round-trip form and keeps the `.0` on integral values.
    let _ = write!(buf, "{x:?}");
    Ok(())
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => {
                let mut utf8_buf = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8_buf).as_bytes());
            }
        }
    }
    buf.push(b'"');
}
