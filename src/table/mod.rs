//! Client-side table core.
//!
//! Leaves first:
//! - [`predicate`] - does a row survive search and filters
//! - [`sort`] - comparators and header-click sort state
//! - [`pagination`] - page count, clamping, visible window
//! - [`selection`] - selected row keys
//! - [`export`] - CSV serialization
//! - [`controller`] - owns state and wires the above together
//! - [`view`] - presentation snapshot for renderers

pub mod controller;
pub mod export;
pub mod pagination;
pub mod predicate;
pub mod selection;
pub mod sort;
pub mod view;

pub use controller::{ExportOutcome, TableCallbacks, TableController, TableOptions};
pub use export::{CsvDocument, ExportScope};
pub use pagination::{PageSize, PageSummary};
pub use predicate::FilterSet;
pub use selection::SelectionSet;
pub use sort::{CellComparator, Chronological, Lexicographic, Numeric, SortDirection, SortState};
pub use view::{EmptyState, TableBody, TableView};
