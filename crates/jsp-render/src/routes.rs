//! Site paths and link builders.

use jsp_commerce::search::FilterState;
use url::form_urlencoded;

pub const HOME: &str = "/";
pub const SEARCH: &str = "/search.html";
pub const PRODUCT: &str = "/product.html";
pub const CART: &str = "/cart.html";
pub const CHECKOUT: &str = "/checkout.html";
pub const ORDER_SUMMARY: &str = "/order-summary.html";
pub const ABOUT: &str = "/about.html";

/// Link to a product page.
pub fn product_href(name: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .finish();
    format!("{}?{}", PRODUCT, query)
}

/// Link to the search page showing `state`.
pub fn search_href(state: &FilterState) -> String {
    let query = state.to_query_string();
    if query.is_empty() {
        SEARCH.to_string()
    } else {
        format!("{}?{}", SEARCH, query)
    }
}

/// Path of a product image.
pub fn product_image(name: &str) -> String {
    format!("/assets/products/{}.webp", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_href_encodes_name() {
        assert_eq!(product_href("Corsair K100 RGB"), "/product.html?name=Corsair+K100+RGB");
    }

    #[test]
    fn test_search_href() {
        assert_eq!(search_href(&FilterState::new()), "/search.html");
        assert_eq!(
            search_href(&FilterState::new().with_category("CPU Cooler")),
            "/search.html?category=CPU-Cooler"
        );
    }
}
