//! Source and sink collaborators: CSV files on disk, batch input discovery, output digests.

mod delimited;

pub use delimited::{CsvSink, CsvSource};

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

const MAX_DEPTH: usize = 4;

/// All `*.csv` files under `dir`, sorted by path. Unreadable entries and directories
/// past `MAX_DEPTH` are logged and skipped.
pub fn discover_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(MAX_DEPTH).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    path = ?e.path().map(|p| p.display().to_string()),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        if entry.file_type().is_dir() {
            if entry.depth() == MAX_DEPTH {
                warn!(
                    path = %entry.path().display(),
                    max_depth = MAX_DEPTH,
                    "directory at max depth, contents not scanned"
                );
            }
            continue;
        }
        if entry.file_type().is_file() && is_csv(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|x| x.to_str())
        .map(|x| x.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Hex SHA-256 of a file, for the run report
pub fn sha256_file(path: &Path) -> Option<String> {
    let data = std::fs::read(path).ok()?;
    let mut h = Sha256::new();
    h.update(&data);
    Some(format!("{:x}", h.finalize()))
}
