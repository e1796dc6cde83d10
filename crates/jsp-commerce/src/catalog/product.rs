//! Product type.

use crate::money::Money;
use crate::search::normalize;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The name is the product's key: cart lines, product page URLs and template
/// data all refer to products by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique product name.
    pub name: String,
    /// Brand name.
    pub manufacturer: String,
    /// Price in rupiah.
    pub price: Money,
    /// Category name (e.g. "GPU").
    pub category: String,
    /// Tags for filtering and search, without duplicates.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Create a new product without tags.
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            name: name.into(),
            manufacturer: manufacturer.into(),
            price,
            category: category.into(),
            tags: Vec::new(),
        }
    }

    /// Builder-style tag addition.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    /// Add a tag to this product.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Check whether the product carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Normalized text matched by free-text search: name, category,
    /// manufacturer and tags.
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {} {}", self.name, self.category, self.manufacturer);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        normalize(&text)
    }

    pub(crate) fn dedup_tags(&mut self) {
        let mut seen = Vec::with_capacity(self.tags.len());
        self.tags.retain(|tag| {
            if seen.contains(tag) {
                false
            } else {
                seen.push(tag.clone());
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu() -> Product {
        Product::new("RTX 4090", "NVIDIA", "GPU", Money::new(30_000_000))
            .with_tag("Ray Tracing")
            .with_tag("24GB")
    }

    #[test]
    fn test_add_tag_ignores_duplicates() {
        let product = gpu().with_tag("24GB");
        assert_eq!(product.tags, vec!["Ray Tracing", "24GB"]);
        assert!(product.has_tag("24GB"));
        assert!(!product.has_tag("24gb"));
    }

    #[test]
    fn test_search_text_is_normalized() {
        assert_eq!(gpu().search_text(), "rtx 4090 gpu nvidia ray tracing 24gb");
    }

    #[test]
    fn test_deserialize_without_tags() {
        let json = r#"{"name":"X","manufacturer":"Y","price":100,"category":"CPU"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.tags.is_empty());
        assert_eq!(product.price, Money::new(100));
    }
}
