//! rowview - Entry Point

use clap::Parser;
use rowview::app::{parse_filter, RunRequest};
use rowview::config::CliOverrides;
use rowview::table::ExportScope;
use std::path::PathBuf;
use tracing::info;

/// rowview - search, filter, sort, page, and export tabular JSON data
#[derive(Parser, Debug)]
#[command(name = "rowview")]
#[command(version)]
#[command(about = "Inspect a page of JSON or JSONL rows with search, filters, sorting and CSV export")]
pub struct Args {
    /// Path to a JSON array or JSONL file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Global search term, matched case-insensitively against every column
    #[arg(short, long)]
    pub search: Option<String>,

    /// Column filter as KEY=VALUE (repeatable)
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Header click on a column (repeat to flip direction)
    #[arg(long = "sort", value_name = "KEY")]
    pub sorts: Vec<String>,

    /// Page to show (must be positive, clamped to the last page)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Rows per page (must be positive)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show every row on one page
    #[arg(long)]
    pub no_pagination: bool,

    /// Comma-separated column keys to show
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Sort this column numerically (repeatable)
    #[arg(long = "numeric", value_name = "KEY")]
    pub numeric: Vec<String>,

    /// Sort this column chronologically (repeatable)
    #[arg(long = "date", value_name = "KEY")]
    pub date: Vec<String>,

    /// Column holding a stable row id
    #[arg(long)]
    pub key_column: Option<String>,

    /// Select every row on the shown page
    #[arg(long)]
    pub select_all: bool,

    /// Write a CSV export to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Rows to export
    #[arg(long, value_parser = ["page", "filtered"])]
    pub export_scope: Option<String>,

    /// Table title (also the export file stem)
    #[arg(long)]
    pub title: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Overrides for the configuration precedence chain.
    fn cli_overrides(&self) -> Result<CliOverrides, Box<dyn std::error::Error>> {
        let export_scope = match &self.export_scope {
            Some(raw) => Some(raw.parse::<ExportScope>()?),
            None => None,
        };
        Ok(CliOverrides {
            page_size: self.page_size,
            pagination: self.no_pagination.then_some(false),
            export_scope,
            numeric_columns: self.numeric.clone(),
            date_columns: self.date.clone(),
            key_column: self.key_column.clone(),
        })
    }

    /// Interactions to replay on the table.
    fn run_request(&self) -> RunRequest {
        RunRequest {
            title: self.title.clone(),
            columns: self.columns.clone(),
            search: self.search.clone(),
            filters: self.filters.clone(),
            sorts: self.sorts.clone(),
            page: self.page.map(|p| p as usize),
            select_all: self.select_all,
            export_path: self.export.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rowview::config::load_config_with_precedence(args.config.clone())?;
        let merged = rowview::config::merge_config(config_file)?;
        let with_env = rowview::config::apply_env_overrides(merged)?;
        rowview::config::apply_cli_overrides(with_env, args.cli_overrides()?)?
    };

    rowview::logging::init(&config.log_file_path, rowview::logging::DEFAULT_DIRECTIVE)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let rows = rowview::source::detect_input_source(args.file.clone())?.read_rows()?;

    let output = rowview::app::run(rows, &args.run_request(), &config)?;
    println!("{}", output.rendered);

    if let (Some(document), Some(path)) = (&output.exported, &args.export) {
        eprintln!("Exported {} to {}", document.file_name, path.display());
    }

    Ok(())
}
