//! Pagination: page size, page count, clamping and the visible window.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;
use thiserror::Error;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of page buttons shown at once.
pub const DEFAULT_PAGE_BUTTONS: usize = 5;

/// Page size of zero was requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Page size must be at least 1")]
pub struct InvalidPageSize;

/// Rows per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Smart constructor: rejects zero.
    pub fn new(size: usize) -> Result<Self, InvalidPageSize> {
        NonZeroUsize::new(size).map(Self).ok_or(InvalidPageSize)
    }

    /// Size as a plain integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// Number of pages for `total_rows`. Zero rows still make one (empty) page.
pub fn total_pages(total_rows: usize, page_size: PageSize) -> usize {
    total_rows.div_ceil(page_size.get()).max(1)
}

/// Clamp a 1-based page number to `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of 1-based `page`. Empty when the page is past the end.
pub fn page_range(total_rows: usize, page: usize, page_size: PageSize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(total_rows);
    let end = start.saturating_add(size).min(total_rows);
    start..end
}

/// "Showing first-last of total" numbers for the pager footer (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// Rows after filtering.
    pub total: usize,
    /// 1-based position of the first visible row, 0 when the page is empty.
    pub first: usize,
    /// 1-based position of the last visible row, 0 when the page is empty.
    pub last: usize,
}

impl PageSummary {
    /// Summary for a page occupying `range` out of `total` rows.
    pub fn new(total: usize, range: &Range<usize>) -> Self {
        if range.is_empty() {
            return Self {
                total,
                first: 0,
                last: 0,
            };
        }
        Self {
            total,
            first: range.start + 1,
            last: range.end,
        }
    }
}

/// Page numbers to offer as buttons: at most `max_buttons`, centred on
/// `current` where possible.
pub fn page_window(current: usize, total_pages: usize, max_buttons: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let count = max_buttons.clamp(1, total_pages);
    let current = clamp_page(current, total_pages);
    let first = current
        .saturating_sub(count / 2)
        .max(1)
        .min(total_pages + 1 - count);
    (first..first + count).collect()
}
