//! Presentation model handed to renderers.
//!
//! A [`TableView`] is a snapshot: it owns its strings and does not borrow
//! the controller.

use super::pagination::PageSummary;
use super::sort::SortDirection;
use crate::model::RowKey;

/// Empty-body message when search or filters exclude every row.
pub const NO_MATCHES_MESSAGE: &str = "No rows match the current search or filters";

/// Empty-body message when there is no data at all.
pub const NO_DATA_MESSAGE: &str = "No data";

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Column title.
    pub title: String,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    /// Direction indicator when this is the sort column.
    pub sorted: Option<SortDirection>,
    /// Width hint from the column descriptor.
    pub width: Option<String>,
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Identity of the row.
    pub key: RowKey,
    /// Display text per column, in column order.
    pub cells: Vec<String>,
    /// Checkbox state.
    pub selected: bool,
}

/// Why the body is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Search or filters are set and nothing matches.
    NoMatches,
    /// The source has no rows.
    NoData,
}

impl EmptyState {
    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoMatches => NO_MATCHES_MESSAGE,
            EmptyState::NoData => NO_DATA_MESSAGE,
        }
    }
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Loading placeholders: `rows` skeleton rows of `columns` cells.
    Skeleton {
        /// Number of placeholder rows (the page size).
        rows: usize,
        /// Number of data columns.
        columns: usize,
    },
    /// Rows of the current page.
    Rows(Vec<ViewRow>),
    /// Nothing to show.
    Empty(EmptyState),
}

/// Pager footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Page numbers to offer as buttons.
    pub window: Vec<usize>,
    /// Showing first-last of total.
    pub summary: PageSummary,
    /// "Previous" is enabled.
    pub has_previous: bool,
    /// "Next" is enabled.
    pub has_next: bool,
}

/// Everything a renderer needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Table title.
    pub title: Option<String>,
    /// Table description.
    pub description: Option<String>,
    /// Whether row checkboxes are shown.
    pub selectable: bool,
    /// Header checkbox state.
    pub page_selected: bool,
    /// Header cells.
    pub header: Vec<HeaderCell>,
    /// Body.
    pub body: TableBody,
    /// Pager, present when pagination is on and there is more than one page.
    pub pager: Option<PagerView>,
    /// Current search term.
    pub search_term: String,
    /// Number of non-empty column filters (the filter badge).
    pub active_filters: usize,
    /// Number of selected rows (the selection summary).
    pub selected_count: usize,
}
