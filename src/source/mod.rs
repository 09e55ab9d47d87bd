//! Row input sources.
//!
//! Rows come from a file or piped stdin, as either a JSON array of objects
//! or JSONL (one object per line). Parsing happens at this boundary; the
//! table only ever sees [`Row`] values.

use crate::model::error::InputError;
use crate::model::Row;
use std::path::PathBuf;
use tracing::info;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for row data.
#[derive(Debug)]
pub enum InputSource {
    /// Rows loaded from a file.
    File(FileSource),
    /// Rows read from piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read and parse every row.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O failures and malformed records.
    pub fn read_rows(self) -> Result<Vec<Row>, InputError> {
        let rows = match self {
            InputSource::File(f) => f.into_rows(),
            InputSource::Stdin(s) => s.read_rows()?,
        };
        info!(rows = rows.len(), "Rows loaded");
        Ok(rows)
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: create FileSource (loads on construction)
/// 2. Else: use stdin, which must be piped
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a TTY.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Parse a JSON array of objects or JSONL text into rows.
///
/// Blank JSONL lines are skipped. Empty input yields no rows.
///
/// # Errors
///
/// Returns `InputError::Parse` with the 1-based line of the first bad record.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, InputError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<Row>>(text).map_err(|e| InputError::Parse {
            line: e.line(),
            reason: e.to_string(),
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Row>(line).map_err(|e| InputError::Parse {
                line: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::IsTerminal;

    #[test]
    fn parse_rows_accepts_json_array() {
        let rows = parse_rows(r#"[{"name":"Ali","age":30},{"name":"Zara","age":5}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("name"), "Zara");
        assert_eq!(rows[0].text("age"), "30");
    }

    #[test]
    fn parse_rows_accepts_jsonl_and_skips_blank_lines() {
        let text = "{\"name\":\"Ali\"}\n\n{\"name\":\"Zara\"}\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn parse_rows_empty_input() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("  \n ").unwrap().is_empty());
    }

    #[test]
    fn parse_rows_reports_bad_jsonl_line() {
        let text = "{\"name\":\"Ali\"}\n{oops}\n";
        let err = parse_rows(text).unwrap_err();
        assert!(
            matches!(err, InputError::Parse { line: 2, .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn parse_rows_rejects_non_object_elements() {
        let err = parse_rows("[1, 2]").unwrap_err();
        assert!(matches!(err, InputError::Parse { line: 1, .. }));
    }

    #[test]
    fn detect_returns_file_source_for_existing_file() {
        let test_file = std::env::temp_dir().join("rowview_detect_existing.json");
        fs::write(&test_file, r#"[{"id":1}]"#).unwrap();

        let source = detect_input_source(Some(test_file.clone())).unwrap();
        let _ = fs::remove_file(&test_file);

        assert!(matches!(source, InputSource::File(_)), "got {:?}", source);
        assert_eq!(source.read_rows().unwrap().len(), 1);
    }

    #[test]
    fn detect_returns_file_not_found_for_missing_file() {
        let missing = std::env::temp_dir().join("rowview_nonexistent_12345.json");
        let result = detect_input_source(Some(missing.clone()));
        match result {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn detect_returns_no_input_when_stdin_is_tty() {
        // Only meaningful when the test runner's stdin is a terminal.
        if std::io::stdin().is_terminal() {
            assert!(matches!(
                detect_input_source(None),
                Err(InputError::NoInput)
            ));
        }
    }
}
