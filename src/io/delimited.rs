//! CSV source and sink for datasets (header row + one record per row).

use crate::dataset::{Dataset, Value};
use crate::error::{PreprocessError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

pub struct CsvSource;

impl CsvSource {
    /// Read a CSV file with a header row. Every field is type-inferred via `Value::parse`.
    /// Anything that is not a readable regular file is `SourceNotFound`.
    pub fn read(path: &Path) -> Result<Dataset> {
        let not_found = |e: std::io::Error| PreprocessError::SourceNotFound {
            path: path.to_path_buf(),
            source: e,
        };
        let meta = std::fs::metadata(path).map_err(not_found)?;
        if !meta.is_file() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let file = File::open(path).map_err(not_found)?;
        let ds = Self::from_reader(file).map_err(|e| {
            if e.is_io_error() {
                not_found(e.into())
            } else {
                PreprocessError::Csv {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        info!(path = %path.display(), rows = ds.len(), columns = ds.columns().len(), "loaded dataset");
        Ok(ds)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> std::result::Result<Dataset, csv::Error> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let width = headers.len();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row: Vec<Value> = record.iter().map(Value::parse).collect();
            debug_assert_eq!(row.len(), width);
            rows.push(row);
        }
        // csv rejects ragged records unless flexible, so widths already match
        Ok(Dataset::from_parts_unchecked(headers, rows))
    }
}

pub struct CsvSink;

impl CsvSink {
    /// Write header and rows in order, creating parent directories as needed.
    pub fn write(path: &Path, ds: &Dataset) -> Result<()> {
        let sink_err = |e: std::io::Error| PreprocessError::SinkWrite {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(sink_err)?;
        }
        let file = File::create(path).map_err(sink_err)?;
        Self::to_writer(file, ds).map_err(|e| sink_err(e.into()))?;
        debug!(path = %path.display(), rows = ds.len(), "wrote dataset");
        Ok(())
    }

    pub fn to_writer<W: std::io::Write>(writer: W, ds: &Dataset) -> std::result::Result<(), csv::Error> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(ds.columns())?;
        for row in ds.rows() {
            wtr.write_record(row.iter().map(ToString::to_string))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
