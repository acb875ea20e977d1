//! In-memory tabular dataset: ordered columns, ordered rows of dynamically-typed cells.

mod summary;

pub use summary::{ColumnSummary, DatasetSummary, Dtype};

use crate::error::{PreprocessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell. Raw CSV fields are inferred into the narrowest kind that parses,
/// and every parsed cell displays as exactly the field it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    /// Canonical integer text only (`7`, `-2`), so display round-trips
    Int(i64),
    /// Any other numeric field (`1.0`, `007`, `nan`, `1e3`); `raw` is the source text
    Number { value: f64, raw: String },
    Text(String),
}

impl Value {
    pub fn parse(field: &str) -> Self {
        if field.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = field.parse::<i64>() {
            if i.to_string() == field {
                return Value::Int(i);
            }
        }
        let trimmed = field.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Number {
                value: i as f64,
                raw: field.to_string(),
            };
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Number {
                value: f,
                raw: field.to_string(),
            };
        }
        Value::Text(field.to_string())
    }

    /// Numeric cell built in code rather than read from a file. `1.0` keeps its fraction.
    pub fn number(value: f64) -> Self {
        Value::Number {
            value,
            raw: format!("{:?}", value),
        }
    }

    /// Integer reading of the cell. Non-canonical integer text (`007`, ` 5`) still
    /// counts; fractional, exponent or non-finite text does not.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Number { raw, .. } => raw.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Number { raw, .. } => f.write_str(raw),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Ordered rows sharing one header. Raw and feature datasets are both this type.
/// Only built through `new`/`with_rows`/`push_row` or the crate's readers, so every
/// row has the header's width.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build from a header and rows; every row must match the header width.
    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ds = Self::new(columns);
        ds.rows.reserve(rows.len());
        for row in rows {
            ds.push_row(row)?;
        }
        Ok(ds)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(PreprocessError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row(&self, i: usize) -> Option<&[Value]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Cell lookup by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// First `n` rows as a new dataset
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::of(self)
    }

    /// Callers guarantee row widths; `transform` still checks them per row.
    pub(crate) fn from_parts_unchecked(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }
}
