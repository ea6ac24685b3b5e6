//! Pagination metadata for list screens.
//!
//! A list screen knows its current page and page size; the collection store
//! answers with the total number of matching records. Everything a pagination
//! control needs to render is derived from those three numbers by
//! [`PageWindow::derive`]:
//!
//! - `previous_page`: `page - 1` when `page > 1`
//! - `next_page`: `page + 1` when `page * limit < total`
//! - `last_page`: `ceil(total / limit)`
//! - `page_numbers`: a contiguous run of at most `width` pages that always
//!   contains `page` (empty when there are no records)
//!
//! # Example
//!
//! ```
//! use counterdesk_core::pagination::PageWindow;
//!
//! let window = PageWindow::derive(3, 10, 25, 5);
//! assert_eq!(window.previous_page, Some(2));
//! assert_eq!(window.next_page, None);
//! assert_eq!(window.page_numbers, vec![1, 2, 3]);
//! ```

use serde::{Deserialize, Serialize};

/// Number of page links shown when nothing else is configured.
pub const DEFAULT_PAGE_WINDOW: u64 = 5;

/// Derived pagination state for one fetched page.
///
/// `next_page` and `previous_page` serialize as `0` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Current page (1-indexed)
    pub page: u64,
    /// Page size that was applied
    pub limit: u64,
    /// Total matching records reported by the store
    pub total: u64,
    /// Highest page that holds records (0 when there are none)
    pub last_page: u64,
    /// Page links to render, ascending
    pub page_numbers: Vec<u64>,
    #[serde(
        serialize_with = "crate::serde::serialize_zero_as_none",
        deserialize_with = "crate::serde::deserialize_zero_as_none"
    )]
    pub next_page: Option<u64>,
    #[serde(
        serialize_with = "crate::serde::serialize_zero_as_none",
        deserialize_with = "crate::serde::deserialize_zero_as_none"
    )]
    pub previous_page: Option<u64>,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            last_page: 0,
            page_numbers: Vec::new(),
            next_page: None,
            previous_page: None,
        }
    }
}

impl PageWindow {
    /// Derives the window for `page` of size `limit` over `total` records.
    ///
    /// `page` and `limit` are clamped to a minimum of 1 and `width` to a
    /// minimum of 1, so the result is always well formed.
    #[must_use]
    pub fn derive(page: u64, limit: u64, total: u64, width: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let width = width.max(1);

        let last_page = total.div_ceil(limit);
        let previous_page = (page > 1).then(|| page - 1);
        let next_page = (page.saturating_mul(limit) < total).then(|| page + 1);

        Self {
            page,
            limit,
            total,
            last_page,
            page_numbers: page_numbers(page, last_page, width),
            next_page,
            previous_page,
        }
    }

    /// Whether `page` is a page that holds records.
    #[must_use]
    pub fn contains(&self, page: u64) -> bool {
        (1..=self.last_page).contains(&page)
    }

    /// Whether a pagination control has anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_numbers.is_empty() && self.next_page.is_none() && self.previous_page.is_none()
    }
}

/// Computes a window of `width` pages centred on `page` where possible.
///
/// The upper bound is `max(last_page, page)` so a page the store reported
/// past the end is still part of its own window.
fn page_numbers(page: u64, last_page: u64, width: u64) -> Vec<u64> {
    if last_page == 0 {
        return Vec::new();
    }

    let upper = last_page.max(page);
    let half = width / 2;

    let mut start = page.saturating_sub(half).max(1);
    let end = start.saturating_add(width - 1).min(upper);
    // Slide left when the window hit the upper bound early.
    if end - start + 1 < width {
        start = end.saturating_sub(width - 1).max(1);
    }

    (start..=end).collect()
}
