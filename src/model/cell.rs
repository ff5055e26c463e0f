use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single value in a row that is written back to a sheet. Amounts stay numeric so that the
/// spreadsheet stores a number rather than text.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

impl Cell {
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Cell::Text(_) => None,
            Cell::Number(n) => Some(*n),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Number(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Text cells serialize as JSON strings and numbers as JSON numbers, which is the shape the
/// Sheets `values.update` payload expects. Whole numbers are written without a fraction.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => match n.normalize() {
                whole if whole.scale() == 0 => match whole.to_i64() {
                    Some(i) => serializer.serialize_i64(i),
                    None => serializer.serialize_f64(whole.to_f64().unwrap_or_default()),
                },
                _ => serializer.serialize_f64(n.to_f64().unwrap_or_default()),
            },
        }
    }
}
