//! Search results and pagination.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page (1-indexed, possibly out of range).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
    /// Total number of pages; zero when there are no items.
    pub total_pages: i64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. A non-positive `per_page` is treated as 1.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let total_pages = if total == 0 { 0 } else { (total - 1) / per_page + 1 };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page >= 1 && page < total_pages,
            has_prev: page > 1 && page <= total_pages,
        }
    }

    /// Whether the requested page exists.
    pub fn is_in_range(&self) -> bool {
        self.page >= 1 && self.page <= self.total_pages
    }

    /// Index range of the current page's items, `None` when out of range.
    pub fn item_range(&self) -> Option<Range<usize>> {
        if !self.is_in_range() {
            return None;
        }
        let start = usize::try_from(self.offset()).ok()?;
        let end = usize::try_from(self.end_item()).ok()?;
        Some(start..end)
    }

    /// Number of items before the current page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Whether page controls are worth showing.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), zero when the page is empty.
    pub fn start_item(&self) -> i64 {
        if self.is_in_range() {
            self.offset() + 1
        } else {
            0
        }
    }

    /// Get end item number, zero when the page is empty.
    pub fn end_item(&self) -> i64 {
        if self.is_in_range() {
            self.page.saturating_mul(self.per_page).min(self.total)
        } else {
            0
        }
    }
}

/// One page of matching items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// The items of the requested page.
    pub items: Vec<T>,
    /// Pagination info over all matches.
    pub pagination: Pagination,
    /// The normalized query that produced these results.
    pub query: String,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, pagination: Pagination, query: impl Into<String>) -> Self {
        Self {
            items,
            pagination,
            query: query.into(),
        }
    }

    /// Check if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total matches across all pages.
    pub fn total(&self) -> i64 {
        self.pagination.total
    }

    /// Summary line shown above the results.
    pub fn summary(&self) -> String {
        summary_text(self.pagination.total, &self.query)
    }
}

/// `Showing N result(s)[ for "q"]` or `No results found[ for "q"]`.
pub fn summary_text(total: i64, query: &str) -> String {
    let suffix = if query.is_empty() {
        String::new()
    } else {
        format!(" for \"{}\"", query)
    };
    if total > 0 {
        let noun = if total == 1 { "result" } else { "results" };
        format!("Showing {} {}{}", total, noun, suffix)
    } else {
        format!("No results found{}", suffix)
    }
}
