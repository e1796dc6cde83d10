//! Filter state of the search page.

use std::collections::BTreeSet;

use crate::search::Filter;

/// Lowercase `text`, collapse whitespace runs to one space and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The dimensions a search can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Category,
    Manufacturer,
    Tag,
}

impl Dimension {
    /// Query parameter holding this dimension.
    pub fn param(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Manufacturer => "manufacturer",
            Dimension::Tag => "tags",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Category => "Category",
            Dimension::Manufacturer => "Manufacturer",
            Dimension::Tag => "Tags",
        }
    }
}

/// Search and filter selection, decoded from the location on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Normalized free-text query; empty when not searching.
    pub query: String,
    pub categories: BTreeSet<String>,
    pub manufacturers: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    /// Requested page (1-indexed). Not clamped: out-of-range pages give
    /// empty results.
    pub page: i64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: BTreeSet::new(),
            manufacturers: BTreeSet::new(),
            tags: BTreeSet::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Create an empty state on page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query (normalized).
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = normalize(query);
        self
    }

    /// Add a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Add a manufacturer.
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturers.insert(manufacturer.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Set the page.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Selected values of a dimension.
    pub fn selected(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Manufacturer => &self.manufacturers,
            Dimension::Tag => &self.tags,
        }
    }

    pub(crate) fn selected_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Category => &mut self.categories,
            Dimension::Manufacturer => &mut self.manufacturers,
            Dimension::Tag => &mut self.tags,
        }
    }

    /// Whether a query or any filter value is set.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || !self.categories.is_empty()
            || !self.manufacturers.is_empty()
            || !self.tags.is_empty()
    }

    /// Predicates for the non-empty parts of the state.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if !self.query.is_empty() {
            filters.push(Filter::Text(self.query.clone()));
        }
        if !self.categories.is_empty() {
            filters.push(Filter::Categories(self.categories.clone()));
        }
        if !self.manufacturers.is_empty() {
            filters.push(Filter::Manufacturers(self.manufacturers.clone()));
        }
        if !self.tags.is_empty() {
            filters.push(Filter::AnyTag(self.tags.clone()));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  RTX\t 4090\n"), "rtx 4090");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_default_state() {
        let state = FilterState::new();
        assert_eq!(state.page, 1);
        assert!(!state.is_active());
        assert!(state.filters().is_empty());
    }

    #[test]
    fn test_builder() {
        let state = FilterState::new()
            .with_query("  Gaming  Mouse ")
            .with_category("Mouse")
            .with_tag("Wireless")
            .with_tag("Wireless")
            .with_page(3);

        assert_eq!(state.query, "gaming mouse");
        assert_eq!(state.tags.len(), 1);
        assert_eq!(state.page, 3);
        assert!(state.is_active());
        assert_eq!(state.filters().len(), 3);
    }

    #[test]
    fn test_selected_by_dimension() {
        let state = FilterState::new().with_manufacturer("Logitech");
        assert!(state.selected(Dimension::Manufacturer).contains("Logitech"));
        assert!(state.selected(Dimension::Category).is_empty());
    }
}
