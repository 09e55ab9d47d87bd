//! Snapshot tests for the plain-text renderer and CSV export
//!
//! Uses insta inline snapshots to pin the exact text the CLI prints, so
//! layout changes show up as reviewable diffs.

use crate::model::{ColumnDescriptor, Row};
use crate::table::{ExportOutcome, PageSize, TableController, TableOptions};
use crate::view::render_plain;

// ===== Test Helpers =====

fn person(name: &str, age: &str) -> Row {
    Row::from_pairs([("name", name), ("age", age)])
}

fn people() -> Vec<Row> {
    vec![person("Ali", "30"), person("Zara", "5"), person("Mehmet", "12")]
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "name").sortable().filterable(),
        ColumnDescriptor::new("age", "age").sortable().filterable(),
    ]
}

fn letters() -> Vec<Row> {
    ('a'..='l')
        .map(|c| Row::from_pairs([("item", c.to_string())]))
        .collect()
}

// ===== Rendering =====

#[test]
fn single_page_with_title() {
    let table = TableController::new(
        columns(),
        people(),
        TableOptions {
            title: Some("People".to_string()),
            ..TableOptions::default()
        },
    );

    let output = render_plain(&table.view());
    insta::assert_snapshot!(output, @r#"
    People
    [ ] | name   | age
    ----+--------+----
    [ ] | Ali    | 30
    [ ] | Zara   | 5
    [ ] | Mehmet | 12
    "#);
}

#[test]
fn descending_sort_second_page_all_selected() {
    let mut table = TableController::new(
        vec![ColumnDescriptor::new("item", "item").sortable()],
        letters(),
        TableOptions {
            page_size: PageSize::new(5).unwrap(),
            ..TableOptions::default()
        },
    );
    table.toggle_sort("item").unwrap();
    table.toggle_sort("item").unwrap();
    table.set_page(2);
    table.select_all(true).unwrap();

    let output = render_plain(&table.view());
    insta::assert_snapshot!(output, @r#"
    selected: 5
    [x] | item v
    ----+-------
    [x] | g
    [x] | f
    [x] | e
    [x] | d
    [x] | c
    Showing 6-10 of 12
    Page 2 of 3: 1 [2] 3 | prev | next
    "#);
}

#[test]
fn no_matches_shows_badge_and_message() {
    let mut table = TableController::new(columns(), people(), TableOptions::default());
    table.set_search("zzz").unwrap();
    table.set_filter("age", "1").unwrap();

    let output = render_plain(&table.view());
    insta::assert_snapshot!(output, @r#"
    search: "zzz"  filters: 1
    [ ] | name | age
    ----+------+----
    No rows match the current search or filters
    "#);
}

#[test]
fn loading_renders_skeleton_rows() {
    let table = TableController::new(
        columns(),
        Vec::new(),
        TableOptions {
            selectable: false,
            loading: true,
            page_size: PageSize::new(2).unwrap(),
            ..TableOptions::default()
        },
    );

    let output = render_plain(&table.view());
    insta::assert_snapshot!(output, @r"
    name | age
    -----+----
    ...  | ...
    ...  | ...
    ");
}

#[test]
fn empty_source_shows_no_data() {
    let table = TableController::new(
        columns(),
        Vec::new(),
        TableOptions {
            selectable: false,
            ..TableOptions::default()
        },
    );

    let output = render_plain(&table.view());
    insta::assert_snapshot!(output, @r"
    name | age
    -----+----
    No data
    ");
}

// ===== Export =====

#[test]
fn csv_export_follows_sort_order() {
    let mut table = TableController::new(columns(), people(), TableOptions::default());
    table.toggle_sort("name").unwrap();

    let ExportOutcome::Csv(document) = table.export() else {
        panic!("expected default CSV export");
    };
    insta::assert_snapshot!(document.content, @r#"
    "name","age"
    "Ali","30"
    "Mehmet","12"
    "Zara","5"
    "#);
}

#[test]
fn csv_export_doubles_embedded_quotes() {
    let mut table = TableController::new(
        columns(),
        vec![person("Say \"hi\"", "1")],
        TableOptions::default(),
    );

    let ExportOutcome::Csv(document) = table.export() else {
        panic!("expected default CSV export");
    };
    insta::assert_snapshot!(document.content, @r#"
    "name","age"
    "Say ""hi""","1"
    "#);
}
