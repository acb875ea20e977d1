//! Structured logging setup and ndjson run reports.

mod format;

pub use format::{RunReport, StructuredLogger};
