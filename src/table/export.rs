//! CSV export of table rows.
//!
//! Every field, header included, is wrapped in double quotes and embedded
//! quotes are doubled. Lines are joined with `\n` and there is no trailing
//! newline.

use crate::model::{ColumnDescriptor, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// MIME type of the default export.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// File stem used when the table has no title.
pub const DEFAULT_FILE_STEM: &str = "data";

/// Which rows the default export writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Only the rows on the visible page.
    #[default]
    Page,
    /// Every row that survives search and filters, in sorted order.
    Filtered,
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::Page => f.write_str("page"),
            ExportScope::Filtered => f.write_str("filtered"),
        }
    }
}

/// Unrecognized export scope name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown export scope '{0}' (expected 'page' or 'filtered')")]
pub struct UnknownExportScope(pub String);

impl FromStr for ExportScope {
    type Err = UnknownExportScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(ExportScope::Page),
            "filtered" => Ok(ExportScope::Filtered),
            _ => Err(UnknownExportScope(s.to_string())),
        }
    }
}

/// A generated CSV file, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Suggested file name, `<title or "data">.csv`.
    pub file_name: String,
    /// Always [`CSV_MIME_TYPE`].
    pub mime_type: &'static str,
    /// CSV text.
    pub content: String,
}

impl CsvDocument {
    /// Build a document for `rows` under `columns`.
    pub fn build<'a, I>(title: Option<&str>, columns: &[ColumnDescriptor], rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        Self {
            file_name: export_file_name(title),
            mime_type: CSV_MIME_TYPE,
            content: to_csv(columns, rows),
        }
    }

    /// Write the content to `path`.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.content.as_bytes())
    }
}

/// `<title>.csv`, or `data.csv` without a title.
pub fn export_file_name(title: Option<&str>) -> String {
    format!("{}.csv", title.unwrap_or(DEFAULT_FILE_STEM))
}

/// Serialize `rows` as CSV with a header line of column titles.
///
/// Cells are the coerced values; column render callbacks are not applied.
pub fn to_csv<'a, I>(columns: &[ColumnDescriptor], rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let header = columns
        .iter()
        .map(|c| quote_field(c.title()))
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = vec![header];
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|c| quote_field(&row.text(c.key())))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
