//! Filter panel sections.

use serde::Serialize;

use crate::catalog::Catalog;

use super::query::{Dimension, FilterState};

/// A single facet value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of catalog products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// One collapsible section of the filter panel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Facet {
    /// Stable key identifying the section across renders.
    pub key: String,
    /// Section heading.
    pub title: String,
    /// Dimension the values select on.
    #[serde(skip)]
    pub dimension: Dimension,
    /// Values in display order.
    pub values: Vec<FacetValue>,
    /// Whether the section starts expanded.
    pub open_by_default: bool,
}

impl Facet {
    /// Number of selected values, shown as the section badge.
    pub fn selected_count(&self) -> usize {
        self.values.iter().filter(|v| v.selected).count()
    }
}

/// Build the filter panel for `catalog` with the selection from `state`.
///
/// Sections are Category, Manufacturer, then one tag section per category
/// (keyed `tags:{category}`). Only the Category section starts open. A tag
/// offered under several categories is selected in all of them at once.
pub fn build_facets(catalog: &Catalog, state: &FilterState) -> Vec<Facet> {
    let mut facets = Vec::new();

    let categories = catalog
        .categories()
        .into_iter()
        .map(|category| FacetValue {
            value: category.to_string(),
            count: catalog.iter().filter(|p| p.category == category).count(),
            selected: state.categories.contains(category),
        })
        .collect();
    facets.push(Facet {
        key: Dimension::Category.param().to_string(),
        title: Dimension::Category.title().to_string(),
        dimension: Dimension::Category,
        values: categories,
        open_by_default: true,
    });

    let manufacturers = catalog
        .manufacturers()
        .into_iter()
        .map(|manufacturer| FacetValue {
            value: manufacturer.to_string(),
            count: catalog
                .iter()
                .filter(|p| p.manufacturer == manufacturer)
                .count(),
            selected: state.manufacturers.contains(manufacturer),
        })
        .collect();
    facets.push(Facet {
        key: Dimension::Manufacturer.param().to_string(),
        title: Dimension::Manufacturer.title().to_string(),
        dimension: Dimension::Manufacturer,
        values: manufacturers,
        open_by_default: false,
    });

    for (category, tags) in catalog.tags_by_category() {
        if tags.is_empty() {
            continue;
        }
        let values = tags
            .into_iter()
            .map(|tag| FacetValue {
                value: tag.to_string(),
                count: catalog
                    .iter()
                    .filter(|p| p.category == category && p.has_tag(tag))
                    .count(),
                selected: state.tags.contains(tag),
            })
            .collect();
        facets.push(Facet {
            key: format!("{}:{}", Dimension::Tag.param(), category),
            title: format!("{} {}", category, Dimension::Tag.title()),
            dimension: Dimension::Tag,
            values,
            open_by_default: false,
        });
    }

    facets
}
