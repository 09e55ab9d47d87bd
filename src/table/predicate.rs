//! Row predicate evaluation: global search AND per-column filters.
//!
//! Matching is case-insensitive substring matching over coerced cell text.
//! Everything here is pure.

use crate::model::{ColumnDescriptor, Row};
use std::collections::BTreeMap;

// ===== FilterSet =====

/// Per-column text filters, keyed by column key.
///
/// Empty values are kept (a cleared input box) but never constrain rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove the filter for `key`.
    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Current value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Filters with a non-empty value.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of filters with a non-empty value.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True if any filter constrains rows.
    pub fn is_active(&self) -> bool {
        self.active().next().is_some()
    }
}

// ===== Predicate =====

/// Search and filter criteria, lowercased once up front.
#[derive(Debug, Clone)]
pub struct Criteria {
    search: String,
    filters: Vec<(String, String)>,
}

impl Criteria {
    /// Prepare criteria from the raw search term and filters.
    pub fn new(search_term: &str, filters: &FilterSet) -> Self {
        Self {
            search: search_term.to_lowercase(),
            filters: filters
                .active()
                .map(|(k, v)| (k.to_string(), v.to_lowercase()))
                .collect(),
        }
    }

    /// True if neither search nor any filter is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.filters.is_empty()
    }

    /// Decide whether `row` survives search and filters.
    pub fn matches(&self, row: &Row, columns: &[ColumnDescriptor]) -> bool {
        let search_ok = self.search.is_empty()
            || columns
                .iter()
                .any(|column| contains_folded(&row.text(column.key()), &self.search));

        search_ok
            && self
                .filters
                .iter()
                .all(|(key, needle)| contains_folded(&row.text(key), needle))
    }
}

/// Case-insensitive containment; `needle` must already be lowercase.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Decide whether `row` survives the search term and filters.
pub fn row_matches(
    row: &Row,
    columns: &[ColumnDescriptor],
    search_term: &str,
    filters: &FilterSet,
) -> bool {
    Criteria::new(search_term, filters).matches(row, columns)
}

/// Indices of rows that survive, in input order.
pub fn filter_indices(
    rows: &[Row],
    columns: &[ColumnDescriptor],
    search_term: &str,
    filters: &FilterSet,
) -> Vec<usize> {
    let criteria = Criteria::new(search_term, filters);
    if criteria.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| criteria.matches(row, columns))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
#[path = "predicate_tests.rs"]
mod tests;
