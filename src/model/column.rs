//! Column descriptors.

use super::row::Row;
use crate::table::sort::{CellComparator, Lexicographic};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Host display callback for a cell.
pub type RenderFn = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Describes how a field is titled, sorted, filtered and rendered.
///
/// Built once by the host and never mutated by the table.
#[derive(Clone)]
pub struct ColumnDescriptor {
    key: String,
    title: String,
    sortable: bool,
    filterable: bool,
    render: Option<RenderFn>,
    width: Option<String>,
    comparator: Arc<dyn CellComparator>,
}

impl ColumnDescriptor {
    /// Create a plain column: not sortable, not filterable, lexicographic order.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            filterable: false,
            render: None,
            width: None,
            comparator: Arc::new(Lexicographic),
        }
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow a per-column filter on this column.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Display width hint, passed through to renderers untouched.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Custom display callback. Only affects rendered cells, never export.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Replace the default lexicographic ordering for this column.
    pub fn comparator(mut self, comparator: impl CellComparator + 'static) -> Self {
        self.comparator = Arc::new(comparator);
        self
    }

    /// Field key read from each row.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the column accepts a filter.
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Width hint.
    pub fn width_hint(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// Ordering used when sorting by this column.
    pub fn cell_comparator(&self) -> &dyn CellComparator {
        self.comparator.as_ref()
    }

    /// Display text for this column's cell in `row`.
    pub fn display(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row.get(&self.key).unwrap_or(&Value::Null), row),
            None => row.text(&self.key).into_owned(),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("render", &self.render.is_some())
            .field("width", &self.width)
            .field("comparator", &self.comparator)
            .finish()
    }
}

/// Look up a column by key.
pub fn find_column<'a>(columns: &'a [ColumnDescriptor], key: &str) -> Option<&'a ColumnDescriptor> {
    columns.iter().find(|c| c.key == key)
}
