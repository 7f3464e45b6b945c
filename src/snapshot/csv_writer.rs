//! CSV output for snapshot datasets.
//!
//! Each run replaces the target file: header first, then one line per row.
//! An empty row set writes nothing and leaves any existing file in place.

use log::{info, warn};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::CsvRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    SkippedEmpty,
}

pub struct CsvWriter;

impl CsvWriter {
    pub fn write<R: CsvRow>(path: &Path, header: &[String], rows: &[R]) -> Result<WriteOutcome> {
        if rows.is_empty() {
            warn!("No rows to write, leaving {} untouched", path.display());
            return Ok(WriteOutcome::SkippedEmpty);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(header)?;
        for (idx, row) in rows.iter().enumerate() {
            let record = row.to_record();
            if record.len() != header.len() {
                return Err(Error::ValidationError(format!(
                    "Row {} has {} cells, header has {}",
                    idx,
                    record.len(),
                    header.len()
                )));
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;

        info!("Wrote {} with {} rows", path.display(), rows.len());
        Ok(WriteOutcome::Written {
            path: path.to_path_buf(),
            rows: rows.len(),
        })
    }
}
