//! Typed cell values.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Runtime type of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Missing value.
    Null,
    /// Boolean values (true/false).
    Boolean,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text values.
    String,
    /// Date and time, with or without a timezone offset.
    DateTime,
    /// Sequence of values.
    List,
}

impl ValueType {
    /// Get a human-readable label for the type.
    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::DateTime => "datetime",
            ValueType::List => "list",
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell of a column.
///
/// Deserialization is untagged: JSON strings always become [`Value::String`], datetimes only
/// come from the loader or from code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    DateTimeTz(DateTime<FixedOffset>),
    DateTime(NaiveDateTime),
}

impl Value {
    /// The runtime type of this value. Naive and zoned datetimes share [`ValueType::DateTime`].
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::DateTime(_) | Value::DateTimeTz(_) => ValueType::DateTime,
        }
    }

    /// Numeric view of the value, if it has one. Booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Compare the value with a numeric bound.
    ///
    /// Integers are compared exactly, without rounding through `f64`. `None` for non-numeric
    /// values and NaN.
    pub fn cmp_bound(&self, bound: f64) -> Option<Ordering> {
        match self {
            Value::Integer(i) => cmp_int_bound(*i, bound),
            Value::Float(f) => f.partial_cmp(&bound),
            _ => None,
        }
    }

    /// Length of the value: characters for strings, elements for lists.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Timezone offset carried by a zoned datetime.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Value::DateTimeTz(dt) => Some(*dt.offset()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// 2^63, the first `f64` above `i64::MAX`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn cmp_int_bound(i: i64, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    if bound >= I64_UPPER {
        return Some(Ordering::Less);
    }
    if bound < -I64_UPPER {
        return Some(Ordering::Greater);
    }

    // Exact: floor lies in [-2^63, 2^63).
    let floor = bound.floor();
    let whole = floor as i64;
    Some(match i.cmp(&whole) {
        Ordering::Equal if floor == bound => Ordering::Equal,
        Ordering::Equal => Ordering::Less,
        other => other,
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::DateTimeTz(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
