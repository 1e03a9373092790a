//! Cell values and their key projection.
//!
//! A [`Value`] is one cell of a [`crate::carrier::table::Table`]. Tables are
//! loosely typed on purpose: a submission is free to put a float in an integer
//! column, and the harness must still be able to inspect what came back.
//!
//! Joins and grouping never compare `Value`s directly. They go through
//! [`Key`], a hashable, totally ordered projection in which an integral float
//! and the matching integer are the same key (`Float(401.0)` groups with
//! `Int(401)`).

use std::fmt;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed integer cell (identifiers, quantities).
    Int(i64),
    /// Floating-point cell (amounts, derived sums).
    Float(f64),
    /// Text cell (product names, customer names, locations).
    Text(String),
    /// Missing value.
    Null,
}

/// Hashable, ordered projection of a [`Value`] used for join and group keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Key of a `Null` cell.
    Null,
    /// Integer key. Integral floats in `i64` range project here too.
    Int(i64),
    /// Non-integral float key, stored as normalized IEEE-754 bits.
    Float(u64),
    /// Text key.
    Text(String),
}

impl Value {
    /// The key projection of this cell.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn key(&self) -> Key {
        match self {
            Self::Int(i) => Key::Int(*i),
            Self::Float(f) => {
                if f.is_finite()
                    && f.fract() == 0.0
                    && *f >= i64::MIN as f64
                    && *f < i64::MAX as f64
                {
                    // Also folds -0.0 into Int(0).
                    Key::Int(*f as i64)
                } else {
                    Key::Float(f.to_bits())
                }
            }
            Self::Text(s) => Key::Text(s.clone()),
            Self::Null => Key::Null,
        }
    }

    /// Numeric view of the cell: integers widen to `f64`, text and null are `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// Integer view of the cell. Integral floats are accepted.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.key() {
            Key::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Text view of the cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if this cell is numerically equal to `expected`.
    ///
    /// Comparison is exact: `250.0` only matches `250.0` (or the integer `250`).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn equals_number(&self, expected: f64) -> bool {
        self.as_f64().is_some_and(|v| v == expected)
    }

    /// Returns `true` if this cell is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
