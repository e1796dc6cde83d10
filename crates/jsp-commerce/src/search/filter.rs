//! Search predicates.

use std::collections::BTreeSet;

use crate::catalog::Product;

/// A predicate over products. All filters of a search are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Normalized substring of the product's search text.
    Text(String),
    /// Category is one of the values.
    Categories(BTreeSet<String>),
    /// Manufacturer is one of the values.
    Manufacturers(BTreeSet<String>),
    /// Product carries at least one of the tags.
    AnyTag(BTreeSet<String>),
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: &str) -> Self {
        Filter::Text(super::normalize(query))
    }

    /// Check a product against this filter. Empty value sets match
    /// everything.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => query.is_empty() || product.search_text().contains(query),
            Filter::Categories(values) => values.is_empty() || values.contains(&product.category),
            Filter::Manufacturers(values) => {
                values.is_empty() || values.contains(&product.manufacturer)
            }
            Filter::AnyTag(values) => {
                values.is_empty() || product.tags.iter().any(|tag| values.contains(tag))
            }
        }
    }
}
