//! Cell values held by the data matrix.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A present cell value. Absent cells are `None` in a [`Row`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Boolean(bool),
}

/// One row of the matrix; may be shorter than the column count.
pub type Row = Vec<Option<CellValue>>;

impl CellValue {
    /// Rank used to order values of different kinds against each other.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Date(_) => 1,
            CellValue::Boolean(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Ordering used by column sorts. Incomparable numbers (NaN) tie.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Build a value from JSON; `null` and nested values are absent.
    pub fn from_json(value: &serde_json::Value) -> Option<CellValue> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number),
            serde_json::Value::String(s) => Some(CellValue::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(CellValue::Boolean(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Compare two optional cells; absent sorts after every present value.
pub fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
