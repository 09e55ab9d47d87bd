//! Error types for rowview.
//!
//! The table pipeline itself never fails: missing cells coerce to the empty
//! string and an out-of-range page is clamped. Errors exist at the edges:
//!
//! - [`TableError`] - a host asked the controller for something the table
//!   configuration does not allow (unknown column, sorting a column that is
//!   not sortable, selecting rows when selection is disabled)
//! - [`InputError`] - reading rows from a file or stdin
//! - [`AppError`] - top-level error of the CLI, wrapping everything above
//!   plus configuration and logging failures

use super::row::RowKey;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All domain errors convert into `AppError` via `From`, so the CLI can use
/// `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load rows.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A table operation was rejected.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing output (export file, stdout) failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Table features a host can switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Global search box.
    Search,
    /// Per-column filters.
    Filter,
    /// Header-click sorting.
    Sort,
    /// Row checkboxes.
    Selection,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Search => "search",
            Feature::Filter => "filter",
            Feature::Sort => "sort",
            Feature::Selection => "selection",
        };
        f.write_str(name)
    }
}

/// Rejected table operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No column has this key.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but is not sortable.
    #[error("Column is not sortable: {0}")]
    ColumnNotSortable(String),

    /// The column exists but is not filterable.
    #[error("Column is not filterable: {0}")]
    ColumnNotFilterable(String),

    /// The feature is switched off for this table.
    #[error("Feature disabled for this table: {0}")]
    FeatureDisabled(Feature),

    /// The configured id column appears in none of the rows.
    #[error("Key column not present in any row: {0}")]
    UnknownKeyColumn(String),

    /// No row in the current data has this key.
    #[error("Unknown row: {0}")]
    UnknownRow(RowKey),

    /// Index is past the end of the visible page.
    #[error("Row {index} is outside the visible page of {len} rows")]
    RowOutOfRange {
        /// Requested position on the page.
        index: usize,
        /// Number of rows on the page.
        len: usize,
    },
}

/// Errors encountered when reading rows from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified data file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use rowview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// A record could not be parsed as a JSON object.
    #[error("Invalid row at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// Generic I/O failure while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
