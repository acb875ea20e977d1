//! BETH features — audit-log preprocessing for anomaly detection models.
//!
//! Modular structure:
//! - [`dataset`] — In-memory tabular dataset and column summaries
//! - [`features`] — Per-column rule set and the feature transformer
//! - [`io`] — CSV source/sink, batch input discovery
//! - [`diagnostics`] — Optional before/after dataset summaries
//! - [`logging`] — Structured JSON logging and run reports

pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod io;
pub mod logging;

pub use config::PreprocessConfig;
pub use dataset::{Dataset, Value};
pub use diagnostics::{Diagnostics, NoDiagnostics, TracingDiagnostics};
pub use error::PreprocessError;
pub use features::{FeaturePipeline, FeatureTransformer, TransformOptions};
pub use logging::StructuredLogger;
