//! Observational summaries around the transform. Never affects data or control flow.

use crate::dataset::Dataset;
use tracing::info;

pub trait Diagnostics: Send + Sync {
    fn before(&self, raw: &Dataset);
    fn after(&self, features: &Dataset);
}

/// Logs row/column counts, per-column info and the first rows through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingDiagnostics {
    pub sample_rows: usize,
}

impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self { sample_rows: 5 }
    }
}

impl TracingDiagnostics {
    pub fn new(sample_rows: usize) -> Self {
        Self { sample_rows }
    }

    fn report(&self, stage: &'static str, ds: &Dataset) {
        let summary = ds.summary();
        let column_info = serde_json::to_string(&summary.column_info).unwrap_or_default();
        info!(
            stage,
            rows = summary.rows,
            columns = summary.columns,
            column_info = %column_info,
            "dataset summary"
        );
        for (i, row) in ds.head(self.sample_rows).rows().iter().enumerate() {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            info!(stage, row = i, values = %cells.join(","), "sample row");
        }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn before(&self, raw: &Dataset) {
        self.report("raw", raw);
    }

    fn after(&self, features: &Dataset) {
        self.report("features", features);
    }
}

pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn before(&self, _raw: &Dataset) {}
    fn after(&self, _features: &Dataset) {}
}
