//! CLI orchestration: build a table from loaded rows, replay the requested
//! interactions, render the page, and optionally export.
//!
//! Everything here is synchronous and deterministic so the whole run can be
//! exercised from tests without a terminal.

use crate::config::ResolvedConfig;
use crate::model::{AppError, ColumnDescriptor, KeyExtractor, Row, TableError};
use crate::table::{
    Chronological, CsvDocument, ExportOutcome, Numeric, TableController, TableOptions,
};
use crate::view::render_plain;
use std::path::PathBuf;
use tracing::info;

/// Interactions requested on the command line, applied in a fixed order:
/// search, filters, sorts, page, select-all, export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Table title, also the export file stem.
    pub title: Option<String>,
    /// Column keys to show. `None` means the first row's keys.
    pub columns: Option<Vec<String>>,
    /// Global search term.
    pub search: Option<String>,
    /// Column filters as `(key, value)` pairs.
    pub filters: Vec<(String, String)>,
    /// Header clicks, in order.
    pub sorts: Vec<String>,
    /// 1-based page to show.
    pub page: Option<usize>,
    /// Check the header checkbox after paging.
    pub select_all: bool,
    /// Write the CSV export here.
    pub export_path: Option<PathBuf>,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Plain-text rendering of the final page.
    pub rendered: String,
    /// The exported document, when an export was requested.
    pub exported: Option<CsvDocument>,
}

/// Parse a `KEY=VALUE` filter argument.
///
/// Only the first `=` separates; the value may itself contain `=` or be empty.
///
/// # Errors
///
/// Returns a message when there is no `=` or the key is empty.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        Some(_) => Err(format!("filter {:?} has an empty column key", raw)),
        None => Err(format!("filter {:?} must be KEY=VALUE", raw)),
    }
}

/// Column descriptors for the run.
///
/// Keys come from `requested`, or the first row's keys in order. Every column
/// is sortable and filterable; configured numeric and date columns get the
/// matching comparator.
pub fn build_columns(
    rows: &[Row],
    requested: Option<&[String]>,
    config: &ResolvedConfig,
) -> Vec<ColumnDescriptor> {
    let keys: Vec<String> = match requested {
        Some(keys) => keys.to_vec(),
        None => rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default(),
    };

    keys.into_iter()
        .map(|key| {
            let column = ColumnDescriptor::new(key.clone(), key.clone())
                .sortable()
                .filterable();
            if config.numeric_columns.contains(&key) {
                column.comparator(Numeric)
            } else if config.date_columns.contains(&key) {
                column.comparator(Chronological)
            } else {
                column
            }
        })
        .collect()
}

/// Table options from the request and resolved configuration.
pub fn build_options(request: &RunRequest, config: &ResolvedConfig) -> TableOptions {
    TableOptions {
        title: request.title.clone(),
        pagination: config.pagination,
        page_size: config.page_size,
        export_scope: config.export_scope,
        key_extractor: match &config.key_column {
            Some(column) => KeyExtractor::Column(column.clone()),
            None => KeyExtractor::Position,
        },
        ..TableOptions::default()
    }
}

/// Build the table, apply `request`, and render.
///
/// # Errors
///
/// Returns `AppError::Table` for unknown filter or sort columns or a key
/// column absent from every row, and `AppError::Output` when the export
/// file cannot be written.
pub fn run(
    rows: Vec<Row>,
    request: &RunRequest,
    config: &ResolvedConfig,
) -> Result<RunOutput, AppError> {
    if let Some(key) = &config.key_column {
        if !rows.is_empty() && !rows.iter().any(|row| row.get(key).is_some()) {
            return Err(TableError::UnknownKeyColumn(key.clone()).into());
        }
    }

    let columns = build_columns(&rows, request.columns.as_deref(), config);
    let options = build_options(request, config);
    let mut table = TableController::new(columns, rows, options);

    if let Some(term) = &request.search {
        table.set_search(term.as_str())?;
    }
    for (key, value) in &request.filters {
        table.set_filter(key, value.as_str())?;
    }
    for key in &request.sorts {
        table.toggle_sort(key)?;
    }
    if let Some(page) = request.page {
        table.set_page(page);
    }
    if request.select_all {
        table.select_all(true)?;
    }

    let exported = match &request.export_path {
        Some(path) => match table.export() {
            ExportOutcome::Csv(document) => {
                document.write_to(path)?;
                info!(path = %path.display(), "CSV written");
                Some(document)
            }
            ExportOutcome::Delegated => None,
        },
        None => None,
    };

    Ok(RunOutput {
        rendered: render_plain(&table.view()),
        exported,
    })
}
