//! Preprocessing run configuration.

use crate::error::{PreprocessError, Result};
use crate::features::{ErrorMode, TransformOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Raw BETH CSV file, or a directory of them
    pub input: PathBuf,
    /// Feature CSV file, or output directory when `input` is a directory
    pub output: PathBuf,
    pub transform: TransformConfig,
    pub diagnostics: DiagnosticsConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Spread rows over the rayon pool
    pub parallel: bool,
    pub error_mode: ErrorMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    /// Rows shown before and after the transform
    pub sample_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("labelled_training_data.csv"),
            output: PathBuf::from("processed_training_data.csv"),
            transform: TransformConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            error_mode: ErrorMode::FailFast,
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_rows: 5,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl From<&TransformConfig> for TransformOptions {
    fn from(c: &TransformConfig) -> Self {
        TransformOptions {
            parallel: c.parallel,
            error_mode: c.error_mode,
        }
    }
}

impl PreprocessConfig {
    /// Load from JSON file if present and valid; otherwise return default
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(c)) => c,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), kind = e.kind(), error = %e, "config unusable; using defaults");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist; parse failures are surfaced.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path).map_err(|e| PreprocessError::SourceNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let c = serde_json::from_str::<PreprocessConfig>(&data).map_err(|e| PreprocessError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Some(c))
    }
}
