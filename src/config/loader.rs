//! Configuration file loading with precedence handling.

use crate::table::{ExportScope, PageSize};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ROWVIEW_CONFIG";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "ROWVIEW_PAGE_SIZE";

/// Environment variable overriding the export scope.
pub const EXPORT_SCOPE_ENV: &str = "ROWVIEW_EXPORT_SCOPE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value outside its domain.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name (config key or env var).
        key: String,
        /// What was wrong.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rowview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Pagination enabled.
    #[serde(default)]
    pub pagination: Option<bool>,

    /// Default export scope ("page" or "filtered").
    #[serde(default)]
    pub export_scope: Option<ExportScope>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Columns sorted numerically instead of as strings.
    #[serde(default)]
    pub numeric_columns: Option<Vec<String>>,

    /// Columns sorted chronologically instead of as strings.
    #[serde(default)]
    pub date_columns: Option<Vec<String>>,

    /// Column holding a stable row id for selection.
    #[serde(default)]
    pub key_column: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page.
    pub page_size: PageSize,
    /// Pagination enabled.
    pub pagination: bool,
    /// Default export scope.
    pub export_scope: ExportScope,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Numerically sorted columns.
    pub numeric_columns: Vec<String>,
    /// Chronologically sorted columns.
    pub date_columns: Vec<String>,
    /// Stable id column.
    pub key_column: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            pagination: true,
            export_scope: ExportScope::default(),
            log_file_path: default_log_path(),
            numeric_columns: Vec::new(),
            date_columns: Vec::new(),
            key_column: None,
        }
    }
}

/// Overrides taken from command-line arguments.
///
/// `None` / empty means "not given on the command line".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`.
    pub page_size: Option<usize>,
    /// `--no-pagination` (as `Some(false)`).
    pub pagination: Option<bool>,
    /// `--export-scope`.
    pub export_scope: Option<ExportScope>,
    /// `--numeric`, added to configured numeric columns.
    pub numeric_columns: Vec<String>,
    /// `--date`, added to configured date columns.
    pub date_columns: Vec<String>,
    /// `--key-column`.
    pub key_column: Option<String>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rowview/rowview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rowview").join("rowview.log")
    } else {
        PathBuf::from("rowview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rowview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rowview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROWVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/rowview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn page_size_from(key: &str, size: usize) -> Result<PageSize, ConfigError> {
    PageSize::new(size).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns `InvalidValue` for a zero `page_size`.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let page_size = match config.page_size {
        Some(size) => page_size_from("page_size", size)?,
        None => defaults.page_size,
    };

    Ok(ResolvedConfig {
        page_size,
        pagination: config.pagination.unwrap_or(defaults.pagination),
        export_scope: config.export_scope.unwrap_or(defaults.export_scope),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        numeric_columns: config.numeric_columns.unwrap_or(defaults.numeric_columns),
        date_columns: config.date_columns.unwrap_or(defaults.date_columns),
        key_column: config.key_column.or(defaults.key_column),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ROWVIEW_PAGE_SIZE`: positive integer
/// - `ROWVIEW_EXPORT_SCOPE`: `page` or `filtered`
///
/// # Errors
///
/// Returns `InvalidValue` when a variable is set to something unusable.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
        let size = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidValue {
                key: PAGE_SIZE_ENV.to_string(),
                reason: e.to_string(),
            })?;
        config.page_size = page_size_from(PAGE_SIZE_ENV, size)?;
    }

    if let Ok(raw) = std::env::var(EXPORT_SCOPE_ENV) {
        config.export_scope = raw.parse().map_err(|e: crate::table::export::UnknownExportScope| {
            ConfigError::InvalidValue {
                key: EXPORT_SCOPE_ENV.to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Column lists are additive.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns `InvalidValue` for a zero `--page-size`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(size) = overrides.page_size {
        config.page_size = page_size_from("--page-size", size)?;
    }

    if let Some(pagination) = overrides.pagination {
        config.pagination = pagination;
    }

    if let Some(scope) = overrides.export_scope {
        config.export_scope = scope;
    }

    for column in overrides.numeric_columns {
        if !config.numeric_columns.contains(&column) {
            config.numeric_columns.push(column);
        }
    }

    for column in overrides.date_columns {
        if !config.date_columns.contains(&column) {
            config.date_columns.push(column);
        }
    }

    if overrides.key_column.is_some() {
        config.key_column = overrides.key_column;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
