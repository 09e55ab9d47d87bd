//! Sort state and cell comparators.
//!
//! The default comparator is plain lexicographic order over coerced cell
//! text, so numeric columns sort as strings ("10" before "2"). Columns opt
//! into [`Numeric`] or [`Chronological`] explicitly.

use crate::model::{find_column, ColumnDescriptor, Row};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

// ===== Direction and state =====

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    field: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort field, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Current direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header click on `key`.
    ///
    /// The current sort column flips direction; any other column becomes the
    /// sort column in ascending order.
    pub fn toggle(&mut self, key: &str) {
        if self.field.as_deref() == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }
}

// ===== Comparators =====

/// Ordering of two coerced cell values.
pub trait CellComparator: fmt::Debug + Send + Sync {
    /// Compare `a` to `b` in ascending order.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain string order by code point. Not numeric-aware.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

impl CellComparator for Lexicographic {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Numeric order for cells that parse as finite numbers.
///
/// Decimal and exponent forms (`"1e3"`) count as numbers; `"inf"`,
/// `"infinity"` and `"NaN"` do not. Cells that do not parse sort after all
/// numbers, lexicographically among themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl CellComparator for Numeric {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_parsed(a, b, |s| s.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
    }
}

/// Chronological order for RFC 3339 timestamps and `YYYY-MM-DD` dates.
///
/// Unparsable cells sort after all dates, lexicographically among
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chronological;

impl CellComparator for Chronological {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_parsed(a, b, parse_instant)
    }
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn compare_parsed<T, F>(a: &str, b: &str, parse: F) -> Ordering
where
    T: PartialOrd,
    F: Fn(&str) -> Option<T>,
{
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// ===== Sorting =====

/// Compare two rows by the active sort state.
///
/// Returns `Equal` when no sort field is set or the field is not a column.
pub fn compare_rows(a: &Row, b: &Row, sort: &SortState, columns: &[ColumnDescriptor]) -> Ordering {
    let Some(column) = sort.field().and_then(|key| find_column(columns, key)) else {
        return Ordering::Equal;
    };
    let ordering = column
        .cell_comparator()
        .compare(&a.text(column.key()), &b.text(column.key()));
    match sort.direction() {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort `indices` into `rows` in place. Stable; ties keep input order.
pub fn sort_indices(
    rows: &[Row],
    indices: &mut [usize],
    sort: &SortState,
    columns: &[ColumnDescriptor],
) {
    if sort.field().is_none() {
        return;
    }
    indices.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], sort, columns));
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
