//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_contains_rowview_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("rowview") && path_str.ends_with("config.toml"),
        "Path should contain 'rowview' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_rowview_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("rowview.log"),
        "Default log path should end with 'rowview.log', got: {:?}",
        path
    );
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "rowview_test_config.toml",
        r#"
page_size = 25
pagination = false
export_scope = "filtered"
numeric_columns = ["amount", "age"]
date_columns = ["created_at"]
key_column = "id"
log_file_path = "/tmp/rowview-test.log"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.page_size, Some(25));
    assert_eq!(config.pagination, Some(false));
    assert_eq!(config.export_scope, Some(ExportScope::Filtered));
    assert_eq!(
        config.numeric_columns,
        Some(vec!["amount".to_string(), "age".to_string()])
    );
    assert_eq!(config.date_columns, Some(vec!["created_at".to_string()]));
    assert_eq!(config.key_column, Some("id".to_string()));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/rowview-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("rowview_test_invalid.toml", "page_size = [unclosed");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a ParseError, got: {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = write_temp("rowview_test_unknown.toml", "theme = \"monokai\"\n");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_export_scope() {
    let config_path = write_temp("rowview_test_scope.toml", "export_scope = \"all\"\n");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn empty_config_file_is_all_none() {
    let config_path = write_temp("rowview_test_empty.toml", "");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config, ConfigFile::default());

    fs::remove_file(config_path).ok();
}

// ===== load_config_with_precedence =====

#[test]
#[serial(rowview_env)]
fn explicit_path_wins_over_env_var() {
    let explicit = write_temp("rowview_test_explicit.toml", "page_size = 7\n");
    let from_env = write_temp("rowview_test_from_env.toml", "page_size = 9\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.page_size, Some(7));

    env::remove_var(CONFIG_ENV);
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(rowview_env)]
fn env_var_path_used_without_explicit_path() {
    let from_env = write_temp("rowview_test_env_only.toml", "page_size = 9\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.page_size, Some(9));

    env::remove_var(CONFIG_ENV);
    fs::remove_file(from_env).ok();
}

// ===== merge_config =====

#[test]
fn merge_without_file_uses_defaults() {
    let resolved = merge_config(None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.page_size.get(), 10);
    assert!(resolved.pagination);
    assert_eq!(resolved.export_scope, ExportScope::Page);
}

#[test]
fn merge_applies_file_values() {
    let file = ConfigFile {
        page_size: Some(3),
        export_scope: Some(ExportScope::Filtered),
        key_column: Some("id".into()),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.page_size.get(), 3);
    assert_eq!(resolved.export_scope, ExportScope::Filtered);
    assert_eq!(resolved.key_column.as_deref(), Some("id"));
    assert!(resolved.pagination);
}

#[test]
fn merge_rejects_zero_page_size() {
    let file = ConfigFile {
        page_size: Some(0),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(file)),
        Err(ConfigError::InvalidValue { ref key, .. }) if key == "page_size"
    ));
}

// ===== apply_env_overrides =====

#[test]
#[serial(rowview_env)]
fn env_overrides_page_size_and_scope() {
    env::set_var(PAGE_SIZE_ENV, "50");
    env::set_var(EXPORT_SCOPE_ENV, "filtered");

    let resolved = apply_env_overrides(ResolvedConfig::default()).unwrap();
    assert_eq!(resolved.page_size.get(), 50);
    assert_eq!(resolved.export_scope, ExportScope::Filtered);

    env::remove_var(PAGE_SIZE_ENV);
    env::remove_var(EXPORT_SCOPE_ENV);
}

#[test]
#[serial(rowview_env)]
fn env_page_size_must_be_a_positive_number() {
    env::set_var(PAGE_SIZE_ENV, "lots");
    assert!(matches!(
        apply_env_overrides(ResolvedConfig::default()),
        Err(ConfigError::InvalidValue { .. })
    ));

    env::set_var(PAGE_SIZE_ENV, "0");
    assert!(matches!(
        apply_env_overrides(ResolvedConfig::default()),
        Err(ConfigError::InvalidValue { .. })
    ));

    env::remove_var(PAGE_SIZE_ENV);
}

#[test]
#[serial(rowview_env)]
fn env_without_variables_is_identity() {
    env::remove_var(PAGE_SIZE_ENV);
    env::remove_var(EXPORT_SCOPE_ENV);
    let config = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(config.clone()).unwrap(), config);
}

// ===== apply_cli_overrides =====

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        numeric_columns: vec!["amount".into()],
        ..ResolvedConfig::default()
    };
    let resolved = apply_cli_overrides(
        base,
        CliOverrides {
            page_size: Some(2),
            pagination: Some(false),
            export_scope: Some(ExportScope::Filtered),
            numeric_columns: vec!["age".into(), "amount".into()],
            date_columns: vec!["created".into()],
            key_column: Some("uuid".into()),
        },
    )
    .unwrap();

    assert_eq!(resolved.page_size.get(), 2);
    assert!(!resolved.pagination);
    assert_eq!(resolved.export_scope, ExportScope::Filtered);
    assert_eq!(resolved.numeric_columns, vec!["amount", "age"]);
    assert_eq!(resolved.date_columns, vec!["created"]);
    assert_eq!(resolved.key_column.as_deref(), Some("uuid"));
}

#[test]
fn empty_cli_overrides_keep_config() {
    let base = ResolvedConfig {
        key_column: Some("id".into()),
        ..ResolvedConfig::default()
    };
    let resolved = apply_cli_overrides(base.clone(), CliOverrides::default()).unwrap();
    assert_eq!(resolved, base);
}

#[test]
fn cli_rejects_zero_page_size() {
    let result = apply_cli_overrides(
        ResolvedConfig::default(),
        CliOverrides {
            page_size: Some(0),
            ..CliOverrides::default()
        },
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
