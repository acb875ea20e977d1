//! Feature transformer: raw BETH dataset → feature dataset, one output row per input row.

use super::rules::{FeatureRule, BETH_RULES, REQUIRED_COLUMNS, TARGET_COLUMN};
use crate::dataset::{Dataset, Value};
use crate::diagnostics::Diagnostics;
use crate::error::{PreprocessError, Result, RowTypeIssue};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How malformed cells in required columns are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Stop at the first malformed row
    #[default]
    FailFast,
    /// Scan every row and report all malformed cells together
    CollectErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Transform rows on the rayon pool; output order is unchanged
    pub parallel: bool,
    pub error_mode: ErrorMode,
}

/// Output schema, with `target` appended iff the input carried it.
pub fn output_columns(has_target: bool) -> Vec<String> {
    let mut cols: Vec<String> = BETH_RULES.iter().map(|r| r.output.to_string()).collect();
    if has_target {
        cols.push(TARGET_COLUMN.to_string());
    }
    cols
}

/// Column positions resolved once against the input header.
struct Plan {
    sources: Vec<(usize, FeatureRule)>,
    target: Option<usize>,
    header_width: usize,
}

impl Plan {
    fn resolve(ds: &Dataset) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !ds.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PreprocessError::Schema { missing });
        }

        let sources = BETH_RULES
            .iter()
            .filter_map(|r| ds.column_index(r.source).map(|i| (i, *r)))
            .collect();
        Ok(Self {
            sources,
            target: ds.column_index(TARGET_COLUMN),
            header_width: ds.columns().len(),
        })
    }

    fn width(&self) -> usize {
        self.sources.len() + self.target.is_some() as usize
    }

    /// Apply every rule to one row. Collects all bad cells of the row.
    fn apply(&self, row_idx: usize, row: &[Value]) -> std::result::Result<Vec<Value>, RowFault> {
        if row.len() != self.header_width {
            return Err(RowFault::Width {
                row: row_idx,
                expected: self.header_width,
                got: row.len(),
            });
        }
        let mut out = Vec::with_capacity(self.width());
        let mut issues = Vec::new();
        for (col, rule) in &self.sources {
            let cell = self.cell(row_idx, row, *col)?;
            match cell.as_int() {
                Some(raw) => out.push(Value::Int(rule.rule.apply(raw))),
                None => issues.push(RowTypeIssue {
                    column: rule.source.to_string(),
                    row: row_idx,
                    found: cell.to_string(),
                }),
            }
        }
        if !issues.is_empty() {
            return Err(RowFault::Types(issues));
        }
        if let Some(t) = self.target {
            out.push(self.cell(row_idx, row, t)?.clone());
        }
        Ok(out)
    }

    fn cell<'r>(&self, row_idx: usize, row: &'r [Value], col: usize) -> std::result::Result<&'r Value, RowFault> {
        row.get(col).ok_or(RowFault::Width {
            row: row_idx,
            expected: self.header_width,
            got: row.len(),
        })
    }
}

/// Why a single row could not be transformed.
enum RowFault {
    Types(Vec<RowTypeIssue>),
    Width { row: usize, expected: usize, got: usize },
}

impl From<RowFault> for PreprocessError {
    fn from(fault: RowFault) -> Self {
        match fault {
            // apply() never returns an empty issue list
            RowFault::Types(mut issues) => PreprocessError::from(issues.swap_remove(0)),
            RowFault::Width { row, expected, got } => PreprocessError::RowWidth { row, expected, got },
        }
    }
}

/// Stateless between calls; the same transformer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FeatureTransformer {
    options: TransformOptions,
}

impl FeatureTransformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform `raw` into the feature dataset. The schema is checked before any row.
    pub fn transform(&self, raw: &Dataset) -> Result<Dataset> {
        let plan = Plan::resolve(raw)?;
        let has_target = plan.target.is_some();
        debug!(
            rows = raw.len(),
            has_target,
            parallel = self.options.parallel,
            "transforming dataset"
        );

        let rows = match (self.options.parallel, self.options.error_mode) {
            (false, ErrorMode::FailFast) => raw
                .rows()
                .iter()
                .enumerate()
                .map(|(i, row)| plan.apply(i, row).map_err(PreprocessError::from))
                .collect::<Result<Vec<_>>>()?,
            (true, ErrorMode::FailFast) => raw
                .rows()
                .par_iter()
                .enumerate()
                .map(|(i, row)| plan.apply(i, row).map_err(PreprocessError::from))
                .collect::<Result<Vec<_>>>()?,
            (false, ErrorMode::CollectErrors) => {
                let results: Vec<_> = raw
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(i, row)| plan.apply(i, row))
                    .collect();
                gather(results)?
            }
            (true, ErrorMode::CollectErrors) => {
                let results: Vec<_> = raw
                    .rows()
                    .par_iter()
                    .enumerate()
                    .map(|(i, row)| plan.apply(i, row))
                    .collect();
                gather(results)?
            }
        };

        Ok(Dataset::from_parts_unchecked(output_columns(has_target), rows))
    }

    /// Transform with before/after notifications to an observer.
    pub fn transform_with(&self, raw: &Dataset, diagnostics: &dyn Diagnostics) -> Result<Dataset> {
        diagnostics.before(raw);
        let out = self.transform(raw)?;
        diagnostics.after(&out);
        Ok(out)
    }
}

fn gather(results: Vec<std::result::Result<Vec<Value>, RowFault>>) -> Result<Vec<Vec<Value>>> {
    let mut rows = Vec::with_capacity(results.len());
    let mut issues = Vec::new();
    for r in results {
        match r {
            Ok(row) => rows.push(row),
            Err(RowFault::Types(mut bad)) => issues.append(&mut bad),
            Err(width @ RowFault::Width { .. }) => return Err(width.into()),
        }
    }
    if issues.is_empty() {
        Ok(rows)
    } else {
        warn!(count = issues.len(), "malformed cells in required columns");
        Err(PreprocessError::RowTypes(issues))
    }
}
