//! Stdin-based row source for piped input.

use super::parse_rows;
use crate::model::error::InputError;
use crate::model::Row;
use std::io::{IsTerminal, Read};

/// Piped stdin (or any reader in tests), read to EOF in one go.
#[derive(Debug)]
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Wrap the process stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal, so
    /// the CLI never blocks waiting for typed input.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Read from any reader. Skips the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read to EOF and parse.
    ///
    /// # Errors
    ///
    /// `Io` for read failures (including invalid UTF-8), `Parse` for
    /// malformed records.
    pub fn read_rows(mut self) -> Result<Vec<Row>, InputError> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        parse_rows(&text)
    }
}
