//! Product catalog.
//!
//! The catalog is loaded once and never mutated; pages share it behind an
//! `Arc`.

mod product;

pub use product::Product;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::CommerceError;

/// Ordered, immutable list of products with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product names.
    ///
    /// Duplicate tags within a product are dropped.
    pub fn new(mut products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &mut products {
            if !seen.insert(product.name.clone()) {
                return Err(CommerceError::DuplicateProduct(product.name.clone()));
            }
            product.dedup_tags();
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CommerceError::InvalidCatalog(e.to_string()))?;
        let catalog = Self::new(products)?;
        tracing::debug!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by exact name.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Look up a product, failing with [`CommerceError::ProductNotFound`].
    pub fn get(&self, name: &str) -> Result<&Product, CommerceError> {
        self.find(name)
            .ok_or_else(|| CommerceError::ProductNotFound(name.to_string()))
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.products.iter().map(|p| p.category.as_str()).collect();
        set.into_iter().collect()
    }

    /// Distinct manufacturers, sorted.
    pub fn manufacturers(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .products
            .iter()
            .map(|p| p.manufacturer.as_str())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct tags of each category, both levels sorted.
    pub fn tags_by_category(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for product in &self.products {
            let tags = grouped.entry(product.category.as_str()).or_default();
            tags.extend(product.tags.iter().map(String::as_str));
        }
        grouped
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    const JSON: &str = r#"[
        {"name":"Ryzen 7 7800X3D","manufacturer":"AMD","price":6500000,"category":"CPU","tags":["AM5","Gaming"]},
        {"name":"RTX 4070","manufacturer":"NVIDIA","price":9000000,"category":"GPU","tags":["Ray Tracing","Gaming","Gaming"]},
        {"name":"Core i5-13400F","manufacturer":"Intel","price":3000000,"category":"CPU","tags":["LGA1700"]}
    ]"#;

    #[test]
    fn test_from_json_keeps_order() {
        let catalog = Catalog::from_json(JSON).unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ryzen 7 7800X3D", "RTX 4070", "Core i5-13400F"]);
    }

    #[test]
    fn test_from_json_dedups_tags() {
        let catalog = Catalog::from_json(JSON).unwrap();
        assert_eq!(catalog.find("RTX 4070").unwrap().tags, vec!["Ray Tracing", "Gaming"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let products = vec![
            Product::new("A", "M", "CPU", Money::new(1)),
            Product::new("A", "N", "GPU", Money::new(2)),
        ];
        assert!(matches!(
            Catalog::new(products),
            Err(CommerceError::DuplicateProduct(name)) if name == "A"
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"name":"A","manufacturer":"M","price":-5,"category":"CPU"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::from_json(JSON).unwrap();
        assert_eq!(catalog.find("RTX 4070").unwrap().manufacturer, "NVIDIA");
        assert!(catalog.find("rtx 4070").is_none());
        assert!(matches!(
            catalog.get("Missing"),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_facet_sources_sorted() {
        let catalog = Catalog::from_json(JSON).unwrap();
        assert_eq!(catalog.categories(), vec!["CPU", "GPU"]);
        assert_eq!(catalog.manufacturers(), vec!["AMD", "Intel", "NVIDIA"]);

        let tags = catalog.tags_by_category();
        let cpu: Vec<&str> = tags["CPU"].iter().copied().collect();
        assert_eq!(cpu, vec!["AM5", "Gaming", "LGA1700"]);
        let gpu: Vec<&str> = tags["GPU"].iter().copied().collect();
        assert_eq!(gpu, vec!["Gaming", "Ray Tracing"]);
    }
}
