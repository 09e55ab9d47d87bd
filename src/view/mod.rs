//! Plain-text rendering of a [`TableView`] (impure shell output).
//!
//! Layout, top to bottom:
//!
//! ```text
//! title
//! description
//! search / filter badge / selection summary
//! header
//! rule
//! body (rows, skeleton placeholders, or an empty-state message)
//! pager (summary and page buttons)
//! ```
//!
//! Lines with nothing to show are omitted. Trailing whitespace is trimmed
//! from every line.

pub mod layout;

use crate::table::view::{HeaderCell, PagerView, TableBody, TableView};
use crate::table::SortDirection;
use layout::{column_widths, format_line, rule, sanitize};

/// Checkbox cell for a selected row.
pub const CHECKED: &str = "[x]";

/// Checkbox cell for an unselected row.
pub const UNCHECKED: &str = "[ ]";

/// Placeholder cell while loading.
pub const SKELETON_CELL: &str = "...";

fn checkbox(checked: bool) -> String {
    let mark = if checked { CHECKED } else { UNCHECKED };
    mark.to_string()
}

fn header_label(cell: &HeaderCell) -> String {
    match cell.sorted {
        Some(SortDirection::Asc) => format!("{} ^", cell.title),
        Some(SortDirection::Desc) => format!("{} v", cell.title),
        None => cell.title.clone(),
    }
}

fn status_line(view: &TableView) -> Option<String> {
    let mut parts = Vec::new();
    if !view.search_term.is_empty() {
        parts.push(format!("search: {:?}", view.search_term));
    }
    if view.active_filters > 0 {
        parts.push(format!("filters: {}", view.active_filters));
    }
    if view.selected_count > 0 {
        parts.push(format!("selected: {}", view.selected_count));
    }
    (!parts.is_empty()).then(|| parts.join("  "))
}

fn pager_lines(pager: &PagerView) -> [String; 2] {
    let summary = format!(
        "Showing {}-{} of {}",
        pager.summary.first, pager.summary.last, pager.summary.total
    );

    let buttons = pager
        .window
        .iter()
        .map(|&p| {
            if p == pager.current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut nav = format!(
        "Page {} of {}: {}",
        pager.current_page, pager.total_pages, buttons
    );
    if pager.has_previous {
        nav.push_str(" | prev");
    }
    if pager.has_next {
        nav.push_str(" | next");
    }

    [summary, nav]
}

/// Render the view as aligned plain text.
pub fn render_plain(view: &TableView) -> String {
    let mut out = Vec::new();

    if let Some(title) = &view.title {
        out.push(title.clone());
    }
    if let Some(description) = &view.description {
        out.push(description.clone());
    }
    if let Some(status) = status_line(view) {
        out.push(status);
    }

    let mut header: Vec<String> = view.header.iter().map(header_label).collect();
    if view.selectable {
        header.insert(0, checkbox(view.page_selected));
    }

    let mut body: Vec<Vec<String>> = match &view.body {
        TableBody::Rows(rows) => rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.cells.iter().map(|c| sanitize(c)).collect();
                if view.selectable {
                    cells.insert(0, checkbox(row.selected));
                }
                cells
            })
            .collect(),
        TableBody::Skeleton { rows, columns } => {
            let width = columns + usize::from(view.selectable);
            vec![vec![SKELETON_CELL.to_string(); width]; *rows]
        }
        TableBody::Empty(_) => Vec::new(),
    };

    let mut grid = Vec::with_capacity(body.len() + 1);
    grid.push(header);
    grid.append(&mut body);
    let widths = column_widths(&grid);

    let mut lines = grid.iter();
    if let Some(header) = lines.next() {
        out.push(format_line(header, &widths));
        out.push(rule(&widths));
    }
    out.extend(lines.map(|cells| format_line(cells, &widths)));

    if let TableBody::Empty(state) = &view.body {
        out.push(state.message().to_string());
    }

    if let Some(pager) = &view.pager {
        out.extend(pager_lines(pager));
    }

    out.join("\n")
}
