//! Feature pipeline: CSV source → transformer → CSV sink, one file at a time.

use super::transform::FeatureTransformer;
use crate::dataset::Dataset;
use crate::diagnostics::{Diagnostics, NoDiagnostics};
use crate::error::Result;
use crate::io::{CsvSink, CsvSource};
use std::path::{Path, PathBuf};
use tracing::info;

/// What one successful file run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

pub struct FeaturePipeline {
    transformer: FeatureTransformer,
    diagnostics: Box<dyn Diagnostics>,
}

impl FeaturePipeline {
    pub fn new(transformer: FeatureTransformer) -> Self {
        Self {
            transformer,
            diagnostics: Box::new(NoDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn transformer(&self) -> &FeatureTransformer {
        &self.transformer
    }

    /// In-memory step only; no file access.
    pub fn process(&self, raw: &Dataset) -> Result<Dataset> {
        self.transformer.transform_with(raw, self.diagnostics.as_ref())
    }

    /// Read `input`, transform, write `output`. Nothing is written if the transform fails.
    pub fn run(&self, input: &Path, output: &Path) -> Result<PipelineOutcome> {
        let raw = CsvSource::read(input)?;
        let features = self.process(&raw)?;
        drop(raw);
        CsvSink::write(output, &features)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            rows = features.len(),
            "features written"
        );
        Ok(PipelineOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows: features.len(),
            columns: features.columns().len(),
        })
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new(FeatureTransformer::default())
    }
}
