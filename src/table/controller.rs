//! Table controller: owns table state and derives the visible page.
//!
//! Every state change re-runs the whole pipeline:
//!
//! ```text
//! rows -> predicate -> filtered -> sort -> sorted -> clamp page -> page
//! ```
//!
//! Nothing is maintained incrementally. Host callbacks are fired
//! synchronously and never awaited.

use super::export::{CsvDocument, ExportScope};
use super::pagination::{
    clamp_page, page_range, page_window, total_pages, PageSize, PageSummary, DEFAULT_PAGE_BUTTONS,
};
use super::predicate::{filter_indices, FilterSet};
use super::selection::SelectionSet;
use super::sort::{sort_indices, SortState};
use super::view::{EmptyState, HeaderCell, PagerView, TableBody, TableView, ViewRow};
use crate::model::{find_column, ColumnDescriptor, Feature, KeyExtractor, Row, RowKey, TableError};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use tracing::{debug, info, warn};

// ===== Options and callbacks =====

/// Static table configuration, fixed for the controller's lifetime.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Title, also the export file stem.
    pub title: Option<String>,
    /// Description shown under the title.
    pub description: Option<String>,
    /// Global search enabled.
    pub searchable: bool,
    /// Per-column filters enabled.
    pub filterable: bool,
    /// Header sorting enabled.
    pub sortable: bool,
    /// Row selection enabled.
    pub selectable: bool,
    /// Pagination enabled. When off the page is every sorted row.
    pub pagination: bool,
    /// Rows per page; also the number of skeleton rows while loading.
    pub page_size: PageSize,
    /// Show loading placeholders.
    pub loading: bool,
    /// How rows are identified for selection.
    pub key_extractor: KeyExtractor,
    /// Rows written by the default export.
    pub export_scope: ExportScope,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            searchable: true,
            filterable: true,
            sortable: true,
            selectable: true,
            pagination: true,
            page_size: PageSize::default(),
            loading: false,
            key_extractor: KeyExtractor::default(),
            export_scope: ExportScope::default(),
        }
    }
}

type RowCallback = Box<dyn FnMut(&Row)>;
type SelectionCallback = Box<dyn FnMut(&[&Row])>;
type ActionCallback = Box<dyn FnMut()>;

/// Host callbacks. All optional.
#[derive(Default)]
pub struct TableCallbacks {
    on_row_click: Option<RowCallback>,
    on_selection_change: Option<SelectionCallback>,
    on_export: Option<ActionCallback>,
    on_refresh: Option<ActionCallback>,
}

impl TableCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the clicked row.
    pub fn on_row_click(mut self, f: impl FnMut(&Row) + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Called with the selected rows after every selection mutation.
    pub fn on_selection_change(mut self, f: impl FnMut(&[&Row]) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    /// Replaces the default CSV export.
    pub fn on_export(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_export = Some(Box::new(f));
        self
    }

    /// Called by [`TableController::refresh`].
    pub fn on_refresh(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_refresh = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TableCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("on_row_click", &self.on_row_click.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_export", &self.on_export.is_some())
            .field("on_refresh", &self.on_refresh.is_some())
            .finish()
    }
}

/// Result of [`TableController::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The host's `on_export` callback handled it.
    Delegated,
    /// Default CSV export.
    Csv(CsvDocument),
}

// ===== Derived pipeline output =====

#[derive(Debug, Clone, Default)]
struct Derived {
    filtered: Vec<usize>,
    sorted: Vec<usize>,
    page: Range<usize>,
    total_pages: usize,
}

// ===== TableController =====

/// Client-side table over host-supplied rows.
#[derive(Debug)]
pub struct TableController {
    columns: Vec<ColumnDescriptor>,
    options: TableOptions,
    callbacks: TableCallbacks,
    rows: Vec<Row>,
    keys: Vec<RowKey>,
    key_index: HashMap<RowKey, usize>,
    search_term: String,
    filters: FilterSet,
    sort: SortState,
    selection: SelectionSet,
    current_page: usize,
    derived: Derived,
}

impl TableController {
    /// Create a controller in its initial state: no search, no filters, no
    /// sort, nothing selected, page 1.
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>, options: TableOptions) -> Self {
        let mut table = Self {
            columns,
            options,
            callbacks: TableCallbacks::default(),
            rows: Vec::new(),
            keys: Vec::new(),
            key_index: HashMap::new(),
            search_term: String::new(),
            filters: FilterSet::new(),
            sort: SortState::new(),
            selection: SelectionSet::new(),
            current_page: 1,
            derived: Derived::default(),
        };
        table.install_rows(rows);
        table.recompute();
        table
    }

    /// Attach host callbacks.
    pub fn with_callbacks(mut self, callbacks: TableCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    // ===== Data =====

    /// Replace the source rows.
    ///
    /// With positional keys the selection is cleared; with a stable key
    /// extractor, selected keys missing from the new rows are dropped, as
    /// are rows that fell back to positional keys.
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.install_rows(rows);

        let changed = if self.options.key_extractor.is_stable() {
            // Positional fallback keys do not survive a swap.
            let key_index = &self.key_index;
            self.selection
                .retain(|k| !matches!(k, RowKey::Index(_)) && key_index.contains_key(k))
        } else {
            let had_selection = !self.selection.is_empty();
            self.selection.clear();
            had_selection
        };

        info!(rows = self.rows.len(), "Table data replaced");
        self.recompute();
        if changed {
            self.notify_selection();
        }
    }

    /// Toggle loading placeholders.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Derive row keys. A row whose stable id is empty or already taken is
    /// keyed by position instead, so every row keeps a distinct key.
    fn install_rows(&mut self, rows: Vec<Row>) {
        self.keys = Vec::with_capacity(rows.len());
        self.key_index = HashMap::with_capacity(rows.len());
        let mut fallbacks = 0usize;
        for (i, row) in rows.iter().enumerate() {
            let mut key = self.options.key_extractor.key(row, i);
            let unusable = matches!(&key, RowKey::Id(id) if id.is_empty())
                || self.key_index.contains_key(&key);
            if unusable {
                key = RowKey::Index(i);
                fallbacks += 1;
            }
            self.key_index.insert(key.clone(), i);
            self.keys.push(key);
        }
        if fallbacks > 0 {
            warn!(
                rows = fallbacks,
                extractor = ?self.options.key_extractor,
                "Rows with empty or duplicate ids keyed by position"
            );
        }
        self.rows = rows;
    }

    // ===== Search and filters =====

    /// Set the global search term.
    pub fn set_search(&mut self, term: impl Into<String>) -> Result<(), TableError> {
        self.require(self.options.searchable, Feature::Search)?;
        self.search_term = term.into();
        debug!(search = %self.search_term, "Search changed");
        self.recompute();
        Ok(())
    }

    /// Set the filter value for a filterable column.
    pub fn set_filter(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), TableError> {
        self.require(self.options.filterable, Feature::Filter)?;
        let column =
            find_column(&self.columns, key).ok_or_else(|| TableError::UnknownColumn(key.into()))?;
        if !column.is_filterable() {
            return Err(TableError::ColumnNotFilterable(key.into()));
        }
        self.filters.set(key, value);
        debug!(column = key, value = ?self.filters.get(key), "Filter changed");
        self.recompute();
        Ok(())
    }

    /// Remove the filter on `key`.
    pub fn clear_filter(&mut self, key: &str) -> Result<(), TableError> {
        self.require(self.options.filterable, Feature::Filter)?;
        self.filters.remove(key);
        self.recompute();
        Ok(())
    }

    /// Clear the search term and every filter. Sort and selection are kept.
    pub fn reset_filters(&mut self) {
        self.search_term.clear();
        self.filters.clear();
        debug!("Search and filters reset");
        self.recompute();
    }

    // ===== Sorting =====

    /// Header click on a sortable column.
    pub fn toggle_sort(&mut self, key: &str) -> Result<(), TableError> {
        self.require(self.options.sortable, Feature::Sort)?;
        let column =
            find_column(&self.columns, key).ok_or_else(|| TableError::UnknownColumn(key.into()))?;
        if !column.is_sortable() {
            return Err(TableError::ColumnNotSortable(key.into()));
        }
        self.sort.toggle(key);
        debug!(column = key, direction = ?self.sort.direction(), "Sort changed");
        self.recompute();
        Ok(())
    }

    // ===== Paging =====

    /// Go to a 1-based page, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
        self.recompute();
        debug!(page = self.current_page, "Page changed");
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    /// Go to the previous page, if any.
    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    // ===== Selection =====

    /// Header checkbox: select exactly the visible page, or clear everything.
    pub fn select_all(&mut self, checked: bool) -> Result<(), TableError> {
        self.require(self.options.selectable, Feature::Selection)?;
        let page_keys = self.derived.sorted[self.derived.page.clone()]
            .iter()
            .map(|&i| &self.keys[i]);
        self.selection.select_all(checked, page_keys);
        debug!(checked, selected = self.selection.len(), "Select all");
        self.notify_selection();
        Ok(())
    }

    /// Row checkbox.
    pub fn toggle_row(&mut self, key: &RowKey, checked: bool) -> Result<(), TableError> {
        self.require(self.options.selectable, Feature::Selection)?;
        if !self.key_index.contains_key(key) {
            return Err(TableError::UnknownRow(key.clone()));
        }
        self.selection.toggle(key, checked);
        debug!(row = %key, checked, selected = self.selection.len(), "Row toggled");
        self.notify_selection();
        Ok(())
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> Result<(), TableError> {
        self.require(self.options.selectable, Feature::Selection)?;
        self.selection.clear();
        debug!("Selection cleared");
        self.notify_selection();
        Ok(())
    }

    fn notify_selection(&mut self) {
        let Some(callback) = self.callbacks.on_selection_change.as_mut() else {
            return;
        };
        let selected: Vec<&Row> = self
            .selection
            .keys()
            .iter()
            .filter_map(|k| self.key_index.get(k).map(|&i| &self.rows[i]))
            .collect();
        callback(selected.as_slice());
    }

    // ===== Host actions =====

    /// Row click on the `index`-th row of the visible page.
    pub fn click_row(&mut self, index: usize) -> Result<(), TableError> {
        let len = self.derived.page.len();
        if index >= len {
            return Err(TableError::RowOutOfRange { index, len });
        }
        let row = &self.rows[self.derived.sorted[self.derived.page.start + index]];
        if let Some(callback) = self.callbacks.on_row_click.as_mut() {
            callback(row);
        }
        Ok(())
    }

    /// Fire `on_refresh`. Returns false when the host supplied none.
    pub fn refresh(&mut self) -> bool {
        match self.callbacks.on_refresh.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Export with the configured scope.
    pub fn export(&mut self) -> ExportOutcome {
        self.export_with(self.options.export_scope)
    }

    /// Export with an explicit scope.
    ///
    /// A host `on_export` callback takes over entirely; otherwise the rows in
    /// `scope` are serialized to CSV in pipeline order.
    pub fn export_with(&mut self, scope: ExportScope) -> ExportOutcome {
        if let Some(callback) = self.callbacks.on_export.as_mut() {
            callback();
            return ExportOutcome::Delegated;
        }
        let indices = match scope {
            ExportScope::Page => &self.derived.sorted[self.derived.page.clone()],
            ExportScope::Filtered => &self.derived.sorted[..],
        };
        let document = CsvDocument::build(
            self.options.title.as_deref(),
            &self.columns,
            indices.iter().map(|&i| &self.rows[i]),
        );
        info!(
            scope = %scope,
            rows = indices.len(),
            file = %document.file_name,
            "Exported CSV"
        );
        ExportOutcome::Csv(document)
    }

    // ===== Accessors =====

    /// Column descriptors.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Table options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Source rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Key of the row at source position `index`.
    pub fn key_at(&self, index: usize) -> Option<&RowKey> {
        self.keys.get(index)
    }

    /// Current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Current filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Current sort.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Rows surviving search and filters, in source order.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.resolve(&self.derived.filtered)
    }

    /// Filtered rows in sort order.
    pub fn sorted_rows(&self) -> Vec<&Row> {
        self.resolve(&self.derived.sorted)
    }

    /// Rows of the visible page.
    pub fn page_rows(&self) -> Vec<&Row> {
        self.resolve(self.page_indices())
    }

    /// Keys of the rows on the visible page.
    pub fn page_keys(&self) -> impl Iterator<Item = &RowKey> + '_ {
        self.page_indices().iter().map(move |&i| &self.keys[i])
    }

    /// Current page, 1-based, always within `[1, total_pages]`.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.derived.total_pages
    }

    /// Showing first-last of total.
    pub fn page_summary(&self) -> PageSummary {
        PageSummary::new(self.derived.sorted.len(), &self.derived.page)
    }

    /// Page buttons around the current page.
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.current_page, self.derived.total_pages, DEFAULT_PAGE_BUTTONS)
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selected rows in selection order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.selection
            .keys()
            .iter()
            .filter_map(|k| self.key_index.get(k).map(|&i| &self.rows[i]))
            .collect()
    }

    /// Header checkbox state.
    pub fn is_page_selected(&self) -> bool {
        self.selection.all_selected(self.page_keys())
    }

    /// Number of non-empty column filters.
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    /// True if a search term or any filter is set.
    pub fn has_active_criteria(&self) -> bool {
        !self.search_term.is_empty() || self.filters.is_active()
    }

    /// Snapshot for renderers.
    pub fn view(&self) -> TableView {
        let header = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key().to_string(),
                title: c.title().to_string(),
                sortable: self.options.sortable && c.is_sortable(),
                sorted: (self.sort.field() == Some(c.key())).then(|| self.sort.direction()),
                width: c.width_hint().map(str::to_string),
            })
            .collect();

        let body = if self.options.loading {
            TableBody::Skeleton {
                rows: self.options.page_size.get(),
                columns: self.columns.len(),
            }
        } else if self.derived.page.is_empty() {
            TableBody::Empty(if self.has_active_criteria() {
                EmptyState::NoMatches
            } else {
                EmptyState::NoData
            })
        } else {
            TableBody::Rows(
                self.page_indices()
                    .iter()
                    .map(|&i| ViewRow {
                        key: self.keys[i].clone(),
                        cells: self.columns.iter().map(|c| c.display(&self.rows[i])).collect(),
                        selected: self.selection.contains(&self.keys[i]),
                    })
                    .collect(),
            )
        };

        let pager = (self.options.pagination && self.derived.total_pages > 1).then(|| PagerView {
            current_page: self.current_page,
            total_pages: self.derived.total_pages,
            window: self.page_window(),
            summary: self.page_summary(),
            has_previous: self.current_page > 1,
            has_next: self.current_page < self.derived.total_pages,
        });

        TableView {
            title: self.options.title.clone(),
            description: self.options.description.clone(),
            selectable: self.options.selectable,
            page_selected: self.is_page_selected(),
            header,
            body,
            pager,
            search_term: self.search_term.clone(),
            active_filters: self.active_filter_count(),
            selected_count: self.selection.len(),
        }
    }

    // ===== Internals =====

    fn require(&self, enabled: bool, feature: Feature) -> Result<(), TableError> {
        if enabled {
            Ok(())
        } else {
            Err(TableError::FeatureDisabled(feature))
        }
    }

    fn page_indices(&self) -> &[usize] {
        &self.derived.sorted[self.derived.page.clone()]
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Row> {
        indices.iter().map(|&i| &self.rows[i]).collect()
    }

    fn recompute(&mut self) {
        let filtered = filter_indices(&self.rows, &self.columns, &self.search_term, &self.filters);
        let mut sorted = filtered.clone();
        sort_indices(&self.rows, &mut sorted, &self.sort, &self.columns);

        let (pages, page) = if self.options.pagination {
            let pages = total_pages(sorted.len(), self.options.page_size);
            self.current_page = clamp_page(self.current_page, pages);
            let range = page_range(sorted.len(), self.current_page, self.options.page_size);
            (pages, range)
        } else {
            self.current_page = 1;
            (1, 0..sorted.len())
        };

        self.derived = Derived {
            filtered,
            sorted,
            page,
            total_pages: pages,
        };
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
