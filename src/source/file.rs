//! File-based row source.

use super::parse_rows;
use crate::model::error::InputError;
use crate::model::Row;
use std::path::{Path, PathBuf};

/// Rows loaded once from a JSON or JSONL file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    rows: Vec<Row>,
}

impl FileSource {
    /// Read and parse the file.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `Io` for read failures,
    /// `Parse` for malformed records.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InputError> {
        let path = path.into();
        if !path.exists() {
            return Err(InputError::FileNotFound { path });
        }
        let text = std::fs::read_to_string(&path)?;
        let rows = parse_rows(&text)?;
        Ok(Self { path, rows })
    }

    /// Path the rows were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows loaded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the file held no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Take the loaded rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
