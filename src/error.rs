//! Error kinds surfaced by the source, transform and sink stages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("input not found or unreadable: {path}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("row {row}, column {column}: expected integer, got {found:?}")]
    RowType {
        column: String,
        row: usize,
        found: String,
    },

    #[error("{} malformed cell(s){}", .0.len(), first_issue(.0))]
    RowTypes(Vec<RowTypeIssue>),

    #[error("cannot write output {path}: {source}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("row {row}: width {got} does not match header width {expected}")]
    RowWidth { row: usize, expected: usize, got: usize },
}

/// One malformed cell, as collected under `ErrorMode::CollectErrors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTypeIssue {
    pub column: String,
    pub row: usize,
    pub found: String,
}

fn first_issue(issues: &[RowTypeIssue]) -> String {
    issues
        .first()
        .map(|i| format!(", first at row {}, column {}", i.row, i.column))
        .unwrap_or_default()
}

impl PreprocessError {
    /// Stable kind string for reports and exit handling
    pub fn kind(&self) -> &'static str {
        match self {
            PreprocessError::SourceNotFound { .. } => "source_not_found",
            PreprocessError::Csv { .. } => "csv",
            PreprocessError::Schema { .. } => "schema",
            PreprocessError::RowType { .. } | PreprocessError::RowTypes(_) => "row_type",
            PreprocessError::SinkWrite { .. } => "sink_write",
            PreprocessError::Config { .. } => "config",
            PreprocessError::RowWidth { .. } => "row_width",
        }
    }
}

impl From<RowTypeIssue> for PreprocessError {
    fn from(issue: RowTypeIssue) -> Self {
        PreprocessError::RowType {
            column: issue.column,
            row: issue.row,
            found: issue.found,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_lists_all_missing() {
        let e = PreprocessError::Schema {
            missing: vec!["userId".into(), "returnValue".into()],
        };
        assert_eq!(e.to_string(), "missing required column(s): userId, returnValue");
        assert_eq!(e.kind(), "schema");
    }

    #[test]
    fn collected_issues_report_first() {
        let e = PreprocessError::RowTypes(vec![
            RowTypeIssue { column: "userId".into(), row: 3, found: "abc".into() },
            RowTypeIssue { column: "eventId".into(), row: 9, found: "".into() },
        ]);
        assert_eq!(e.to_string(), "2 malformed cell(s), first at row 3, column userId");
        assert_eq!(e.kind(), "row_type");
    }
}
