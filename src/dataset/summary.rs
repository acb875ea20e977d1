//! Column-level summary of a dataset (row/column counts, inferred dtype, non-null counts).

use super::{Dataset, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dtype {
    Null,
    Int,
    Float,
    Text,
}

impl Dtype {
    fn of(v: &Value) -> Self {
        match v {
            Value::Null => Dtype::Null,
            Value::Int(_) => Dtype::Int,
            Value::Number { .. } if v.as_int().is_some() => Dtype::Int,
            Value::Number { .. } => Dtype::Float,
            Value::Text(_) => Dtype::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Widest kind seen in the column
    pub dtype: Dtype,
    pub non_null: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_info: Vec<ColumnSummary>,
}

impl DatasetSummary {
    pub fn of(ds: &Dataset) -> Self {
        let mut column_info: Vec<ColumnSummary> = ds
            .columns()
            .iter()
            .map(|name| ColumnSummary {
                name: name.clone(),
                dtype: Dtype::Null,
                non_null: 0,
            })
            .collect();

        for row in ds.rows() {
            for (info, v) in column_info.iter_mut().zip(row) {
                if v.is_null() {
                    continue;
                }
                info.non_null += 1;
                info.dtype = info.dtype.max(Dtype::of(v));
            }
        }

        Self {
            rows: ds.len(),
            columns: ds.columns().len(),
            column_info,
        }
    }
}
