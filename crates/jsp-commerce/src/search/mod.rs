//! Catalog search.
//!
//! Filter state lives in the URL ([`url_state`]); [`search`] turns it into a
//! page of products.

mod facets;
mod filter;
mod query;
mod results;
pub mod url_state;

pub use facets::{build_facets, Facet, FacetValue};
pub use filter::Filter;
pub use query::{normalize, Dimension, FilterState};
pub use results::{summary_text, Pagination, SearchResults};
pub use url_state::{apply_update, FilterUpdate};

use crate::catalog::{Catalog, Product};

/// Products per search page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Every product matching `state`, in catalog order.
pub fn filter<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Product> {
    let filters = state.filters();
    catalog
        .iter()
        .filter(|product| filters.iter().all(|f| f.matches(product)))
        .collect()
}

/// Filter the catalog and cut out the requested page.
///
/// Pages outside `1..=total_pages` give an empty page, not an error.
pub fn search<'a>(
    catalog: &'a Catalog,
    state: &FilterState,
    page_size: usize,
) -> SearchResults<&'a Product> {
    let matches = filter(catalog, state);
    let per_page = i64::try_from(page_size).unwrap_or(i64::MAX);
    let total = i64::try_from(matches.len()).unwrap_or(i64::MAX);
    let pagination = Pagination::new(state.page, per_page, total);

    let items = match pagination.item_range() {
        Some(range) => matches[range].to_vec(),
        None => Vec::new(),
    };
    tracing::debug!(
        query = %state.query,
        total,
        page = state.page,
        shown = items.len(),
        "catalog searched"
    );
    SearchResults::new(items, pagination, state.query.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    fn two_products() -> Catalog {
        Catalog::new(vec![
            Product::new("A", "AMD", "CPU", Money::new(100)),
            Product::new("B", "NVIDIA", "GPU", Money::new(200)),
        ])
        .unwrap()
    }

    fn many(count: usize) -> Catalog {
        Catalog::new(
            (0..count)
                .map(|i| Product::new(format!("P{i:02}"), "M", "CPU", Money::new(1)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_state_returns_everything_in_order() {
        let catalog = two_products();
        assert_eq!(names(&filter(&catalog, &FilterState::new())), vec!["A", "B"]);
    }

    #[test]
    fn test_unmatched_query_returns_nothing() {
        let catalog = two_products();
        let state = FilterState::new().with_query("motherboard");
        assert!(filter(&catalog, &state).is_empty());
    }

    #[test]
    fn test_category_select_then_clear() {
        let catalog = two_products();
        let url = url::Url::parse("https://jsp.store/search.html").unwrap();

        let selected = apply_update(
            &url,
            &FilterUpdate::Select {
                dimension: Dimension::Category,
                value: "CPU".into(),
                selected: true,
            },
        );
        let state = FilterState::from_url(&selected);
        assert_eq!(names(&filter(&catalog, &state)), vec!["A"]);

        let cleared = apply_update(&selected, &FilterUpdate::ClearAll);
        let state = FilterState::from_url(&cleared);
        assert_eq!(names(&filter(&catalog, &state)), vec!["A", "B"]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let catalog = two_products();
        let state = FilterState::new().with_category("CPU").with_manufacturer("NVIDIA");
        assert!(filter(&catalog, &state).is_empty());
    }

    #[test]
    fn test_search_paginates() {
        let catalog = many(25);
        let results = search(&catalog, &FilterState::new().with_page(3), DEFAULT_PAGE_SIZE);
        assert_eq!(results.len(), 5);
        assert_eq!(results.items[0].name, "P20");
        assert_eq!(results.pagination.total_pages, 3);
        assert_eq!(results.summary(), "Showing 25 results");
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let catalog = many(25);
        for page in [0, -1, 4, 100] {
            let results = search(&catalog, &FilterState::new().with_page(page), 10);
            assert!(results.is_empty(), "page {page}");
            assert_eq!(results.total(), 25);
        }
    }

    #[test]
    fn test_custom_page_size() {
        let catalog = many(25);
        let results = search(&catalog, &FilterState::new(), 20);
        assert_eq!(results.len(), 20);
        assert_eq!(results.pagination.total_pages, 2);
    }

    #[test]
    fn test_huge_page_size_is_one_page() {
        let catalog = two_products();
        let results = search(&catalog, &FilterState::new(), usize::MAX);
        assert_eq!(names(&results.items), vec!["A", "B"]);
        assert_eq!(results.pagination.total_pages, 1);

        let results = search(&catalog, &FilterState::new().with_page(2), usize::MAX);
        assert!(results.is_empty());
    }
}
