//! Tests for search and filter predicates.

use super::*;
use serde_json::json;

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Name").filterable(),
        ColumnDescriptor::new("city", "City").filterable(),
    ]
}

fn row(name: &str, city: &str) -> Row {
    Row::from_pairs([("name", name), ("city", city)])
}

// ===== FilterSet =====

#[test]
fn filter_set_ignores_empty_values() {
    let mut filters = FilterSet::new();
    filters.set("name", "");
    filters.set("city", "ist");

    assert_eq!(filters.active_count(), 1);
    assert!(filters.is_active());
    assert_eq!(filters.get("name"), Some(""));
}

#[test]
fn filter_set_clear_removes_everything() {
    let mut filters = FilterSet::new();
    filters.set("name", "a");
    filters.clear();

    assert!(!filters.is_active());
    assert_eq!(filters.get("name"), None);
}

// ===== Search =====

#[test]
fn empty_search_matches_everything() {
    assert!(row_matches(&row("Ali", "Ankara"), &columns(), "", &FilterSet::new()));
}

#[test]
fn search_is_case_insensitive_substring() {
    let filters = FilterSet::new();
    assert!(row_matches(&row("Ali", "Ankara"), &columns(), "ali", &filters));
    assert!(row_matches(&row("Ali", "Ankara"), &columns(), "KAR", &filters));
    assert!(!row_matches(&row("Ali", "Ankara"), &columns(), "zara", &filters));
}

#[test]
fn search_only_looks_at_declared_columns() {
    let r = Row::from_pairs([("name", "Ali"), ("secret", "hidden")]);
    let cols = vec![ColumnDescriptor::new("name", "Name")];
    assert!(!row_matches(&r, &cols, "hidden", &FilterSet::new()));
}

#[test]
fn search_treats_null_as_empty() {
    let r = Row::from_pairs([("name", json!(null)), ("city", json!("Izmir"))]);
    assert!(row_matches(&r, &columns(), "izm", &FilterSet::new()));
    assert!(!row_matches(&r, &columns(), "null", &FilterSet::new()));
}

#[test]
fn search_matches_numbers_by_text() {
    let r = Row::from_pairs([("name", json!(1234)), ("city", json!("x"))]);
    assert!(row_matches(&r, &columns(), "23", &FilterSet::new()));
}

// ===== Filters =====

#[test]
fn all_filters_must_pass() {
    let mut filters = FilterSet::new();
    filters.set("name", "al");
    filters.set("city", "ank");
    assert!(row_matches(&row("Ali", "Ankara"), &columns(), "", &filters));

    filters.set("city", "ist");
    assert!(!row_matches(&row("Ali", "Ankara"), &columns(), "", &filters));
}

#[test]
fn search_and_filters_combine_with_and() {
    let mut filters = FilterSet::new();
    filters.set("city", "ankara");
    assert!(!row_matches(&row("Ali", "Ankara"), &columns(), "zara", &filters));
    assert!(row_matches(&row("Ali", "Ankara"), &columns(), "li", &filters));
}

#[test]
fn filter_on_missing_cell_only_passes_empty_needle() {
    let mut filters = FilterSet::new();
    filters.set("phone", "5");
    assert!(!row_matches(&row("Ali", "Ankara"), &columns(), "", &filters));
}

// ===== filter_indices =====

#[test]
fn filter_indices_preserves_input_order() {
    let rows = vec![row("Zara", "Ankara"), row("Ali", "Izmir"), row("Alp", "Ankara")];
    let mut filters = FilterSet::new();
    filters.set("city", "ankara");

    assert_eq!(filter_indices(&rows, &columns(), "", &filters), vec![0, 2]);
}

#[test]
fn filter_indices_without_criteria_is_identity() {
    let rows = vec![row("a", "b"), row("c", "d")];
    assert_eq!(
        filter_indices(&rows, &columns(), "", &FilterSet::new()),
        vec![0, 1]
    );
}

#[test]
fn filter_indices_on_empty_rows() {
    assert!(filter_indices(&[], &columns(), "x", &FilterSet::new()).is_empty());
}
