//! Tabular query results.
//!
//! Every query surface of the engine renders into a [`Table`]: a shared
//! column header plus rows of loosely typed [`Value`]s. This is the shape
//! a presentation layer consumes directly.

use std::fmt;

/// A single cell value in a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    /// Text helper for owned or borrowed strings.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Wrap an optional integer-like value, mapping `None` to `Null`.
    pub fn opt_integer<T: Into<i64>>(v: Option<T>) -> Self {
        v.map(|x| Value::Integer(x.into())).unwrap_or(Value::Null)
    }

    /// Wrap an optional float, mapping `None` to `Null`.
    pub fn opt_float(v: Option<f64>) -> Self {
        v.map(Value::Float).unwrap_or(Value::Null)
    }

    /// Wrap an optional string, mapping `None` to `Null`.
    pub fn opt_text(v: Option<impl Into<String>>) -> Self {
        v.map(|s| Value::Text(s.into())).unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "NULL"),
        }
    }
}

/// A tabular query result: named columns and rows of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table with the given column names and no rows.
    pub fn new(columns: Vec<&str>) -> Self {
        Self {
            columns: columns.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    /// An empty table with no columns. Returned when a query fails
    /// or matches nothing at the outermost boundary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a row. The row length must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at (row, column name), if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep at most `limit` rows.
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }
}
