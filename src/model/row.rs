//! Row records, row identity, and cell coercion.
//!
//! A [`Row`] is opaque to the table: it is a map from column key to a JSON
//! value, and the table only ever reads cells through [`coerce_cell`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

// ===== Row =====

/// One record of tabular data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a row from `(key, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Raw cell value for `key`, if the row has it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Cell value for `key` coerced to text.
    pub fn text(&self, key: &str) -> Cow<'_, str> {
        coerce_cell(self.0.get(key))
    }

    /// Set a cell, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Column keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ===== Cell coercion =====

/// Coerce a cell to the text used for search, filter, sort and export.
///
/// Missing cells and `null` become the empty string. Whole-number floats
/// print without a fraction (`5.0` as `5`, `-0.0` as `0`). Arrays join their
/// coerced elements with `,`; objects become compact JSON.
pub fn coerce_cell(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(Value::Number(n)) => Cow::Owned(number_text(n)),
        Some(Value::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| coerce_cell(Some(item)).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(obj @ Value::Object(_)) => Cow::Owned(obj.to_string()),
    }
}

/// Floats at or above this magnitude keep exponent notation.
const EXPONENT_THRESHOLD: f64 = 1e21;

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < EXPONENT_THRESHOLD => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

// ===== Row identity =====

/// Identity of a row for selection purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// Position of the row in the source collection.
    Index(usize),
    /// Host-supplied stable identifier.
    Id(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Index(i) => write!(f, "#{}", i),
            RowKey::Id(id) => f.write_str(id),
        }
    }
}

/// Host logic deriving a [`RowKey`] from a row and its source position.
pub type KeyFn = Arc<dyn Fn(&Row, usize) -> RowKey + Send + Sync>;

/// Strategy for deriving row identity.
#[derive(Clone, Default)]
pub enum KeyExtractor {
    /// Key rows by source position. Keys do not survive a data swap.
    #[default]
    Position,
    /// Key rows by the coerced value of a stable id column.
    Column(String),
    /// Key rows with custom host logic.
    Custom(KeyFn),
}

impl KeyExtractor {
    /// Derive the key of `row` at source position `index`.
    pub fn key(&self, row: &Row, index: usize) -> RowKey {
        match self {
            KeyExtractor::Position => RowKey::Index(index),
            KeyExtractor::Column(column) => RowKey::Id(row.text(column).into_owned()),
            KeyExtractor::Custom(f) => f(row, index),
        }
    }

    /// True if keys stay meaningful when the source collection is replaced.
    pub fn is_stable(&self) -> bool {
        !matches!(self, KeyExtractor::Position)
    }
}

impl fmt::Debug for KeyExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyExtractor::Position => f.write_str("Position"),
            KeyExtractor::Column(c) => f.debug_tuple("Column").field(c).finish(),
            KeyExtractor::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
