//! Cart page.

use jsp_cache::KvStore;
use jsp_commerce::cart::CartLine;
use jsp_commerce::{CommerceError, Money};
use jsp_render::html::{Element, Node};
use jsp_render::routes;

use super::{clamp_amount_input, Page};
use crate::app::{page_title, Storefront};
use crate::browser::Location;

const EMPTY: &str = "Your cart is empty.";

/// Attribute tying an amount input to its cart line.
pub const DATA_PRODUCT_NAME: &str = "data-product-name";

/// Lists the stored cart. Every action writes through to the store, so the
/// view always reflects what is persisted.
#[derive(Debug)]
pub struct CartPage<'a, L, S> {
    app: &'a Storefront<L, S>,
    location: Location,
}

impl<'a, L: KvStore, S: KvStore> CartPage<'a, L, S> {
    pub fn new(app: &'a Storefront<L, S>, location: Location) -> Self {
        Self { app, location }
    }

    /// Lines whose product is still in the catalog.
    pub fn lines(&self) -> Vec<CartLine> {
        self.app
            .carts()
            .get()
            .resolved(self.app.catalog())
            .cloned()
            .collect()
    }

    /// Sum of the listed lines at their stored prices.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let subtotals = self
            .lines()
            .iter()
            .map(CartLine::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        Money::checked_sum(subtotals).ok_or(CommerceError::Overflow)
    }

    pub fn increment(&self, name: &str) -> Result<(), CommerceError> {
        match self.stored_amount(name) {
            Some(amount) => self.app.carts().set_amount(name, amount.saturating_add(1)),
            None => Ok(()),
        }
    }

    /// Decrease a line's amount. A line at 1 is left alone; use
    /// [`CartPage::remove`] to drop it.
    pub fn decrement(&self, name: &str) -> Result<(), CommerceError> {
        match self.stored_amount(name) {
            Some(amount) if amount > 1 => self.app.carts().set_amount(name, amount - 1),
            _ => Ok(()),
        }
    }

    /// Take the amount typed into a line's input.
    pub fn set_amount_input(&self, name: &str, raw: &str) -> Result<(), CommerceError> {
        self.app
            .carts()
            .set_amount(name, i64::from(clamp_amount_input(raw)))
    }

    pub fn remove(&self, name: &str) -> Result<(), CommerceError> {
        self.app.carts().remove(name)
    }

    fn stored_amount(&self, name: &str) -> Option<i64> {
        self.app
            .carts()
            .get()
            .find(name)
            .map(|line| i64::from(line.amount))
    }
}

impl<L: KvStore, S: KvStore> Page for CartPage<'_, L, S> {
    fn location(&self) -> &Location {
        &self.location
    }

    fn title(&self) -> String {
        page_title("Cart")
    }

    fn view(&self) -> Vec<Node> {
        let lines = self.lines();
        let items = Element::new("div").class("cart-items");
        let items: Node = if lines.is_empty() {
            items.child(Element::new("p").class("cart-empty").text(EMPTY)).into()
        } else {
            items.children(lines.iter().map(cart_item)).into()
        };

        let total = match self.total() {
            Ok(total) => total.display(),
            Err(e) => {
                tracing::warn!(error = %e, "cart total unavailable");
                String::new()
            }
        };
        let summary = Element::new("div")
            .class("cart-summary")
            .child(
                Element::new("div")
                    .class("total")
                    .text("Total ")
                    .child(Element::new("span").class("price").text(total)),
            )
            .child(
                Element::new("a")
                    .class("checkout")
                    .attr("href", routes::CHECKOUT)
                    .flag("hidden", lines.is_empty())
                    .text("Checkout"),
            );

        vec![
            Element::new("h1").text("Shopping Cart").into(),
            items,
            summary.into(),
        ]
    }
}

fn cart_item(line: &CartLine) -> Node {
    let subtotal = line.subtotal().map(|m| m.display()).unwrap_or_default();
    let mut controls = Element::new("div").class("amount");
    if line.amount > 1 {
        controls = controls.child(
            Element::new("button")
                .class("decrement")
                .attr("type", "button")
                .text("-"),
        );
    }
    controls = controls
        .child(
            Element::new("input")
                .attr("type", "number")
                .attr("min", "1")
                .attr(DATA_PRODUCT_NAME, line.name.as_str())
                .attr("value", line.amount.to_string()),
        )
        .child(
            Element::new("button")
                .class("increment")
                .attr("type", "button")
                .text("+"),
        );

    Element::new("div")
        .class("cart-item")
        .child(
            Element::new("a")
                .attr("href", routes::product_href(&line.name))
                .child(
                    Element::new("img")
                        .attr("src", routes::product_image(&line.name))
                        .attr("alt", line.name.as_str()),
                ),
        )
        .child(Element::new("div").class("name").text(line.name.as_str()))
        .child(Element::new("div").class("price").text(line.price.display()))
        .child(controls)
        .child(Element::new("div").class("subtotal").text(subtotal))
        .child(
            Element::new("button")
                .class("remove")
                .attr("type", "button")
                .text("Remove"),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsp_cache::MemoryStore;
    use jsp_commerce::catalog::{Catalog, Product};
    use jsp_render::html::{find_all, find_by_class};
    use std::sync::Arc;

    fn app() -> Storefront<MemoryStore, MemoryStore> {
        let catalog = Catalog::new(vec![
            Product::new("Noctua NH-D15 G2", "Noctua", "CPU Cooler", Money::new(2_500_000)),
            Product::new("WD Blue 4TB 5400RPM", "WD", "HDD", Money::new(1_200_000)),
        ])
        .unwrap();
        Storefront::new(Arc::new(catalog), MemoryStore::new(), MemoryStore::new()).unwrap()
    }

    fn cart_page(app: &Storefront<MemoryStore, MemoryStore>) -> CartPage<'_, MemoryStore, MemoryStore> {
        CartPage::new(app, app.location(routes::CART).unwrap())
    }

    #[test]
    fn test_empty_cart() {
        let app = app();
        let page = cart_page(&app);
        let nodes = page.view();
        let items = find_by_class(&nodes, "cart-items").unwrap();
        assert_eq!(find_by_class(&items.children, "cart-empty").unwrap().text_content(), EMPTY);
        assert!(find_by_class(&items.children, "cart-item").is_none());
        let total = find_by_class(&nodes, "total").unwrap();
        assert_eq!(find_by_class(&total.children, "price").unwrap().text_content(), "Rp\u{a0}0");
        assert!(find_by_class(&nodes, "checkout").unwrap().has_attr("hidden"));
    }

    #[test]
    fn test_line_controls() {
        let app = app();
        app.carts().add_to_cart("Noctua NH-D15 G2", Money::new(2_500_000), 1).unwrap();
        app.carts().add_to_cart("WD Blue 4TB 5400RPM", Money::new(1_200_000), 3).unwrap();
        let page = cart_page(&app);
        let nodes = page.view();

        let items = find_all(&nodes, |el| el.has_class("cart-item"));
        assert_eq!(items.len(), 2);
        assert!(find_by_class(&items[0].children, "decrement").is_none());
        assert!(find_by_class(&items[1].children, "decrement").is_some());

        let inputs = find_all(&nodes, |el| el.has_attr(DATA_PRODUCT_NAME));
        assert_eq!(inputs[1].get_attr(DATA_PRODUCT_NAME), Some("WD Blue 4TB 5400RPM"));
        assert_eq!(inputs[1].get_attr("value"), Some("3"));
        assert_eq!(page.total().unwrap(), Money::new(6_100_000));
    }

    #[test]
    fn test_actions_write_through() {
        let app = app();
        app.carts().add_to_cart("Noctua NH-D15 G2", Money::new(2_500_000), 1).unwrap();
        let page = cart_page(&app);

        page.decrement("Noctua NH-D15 G2").unwrap();
        assert_eq!(app.carts().item_count(), 1);
        page.increment("Noctua NH-D15 G2").unwrap();
        assert_eq!(app.carts().item_count(), 2);
        page.set_amount_input("Noctua NH-D15 G2", "-3").unwrap();
        assert_eq!(app.carts().item_count(), 1);
        page.set_amount_input("Noctua NH-D15 G2", "5").unwrap();
        assert_eq!(app.carts().item_count(), 5);
        page.remove("Noctua NH-D15 G2").unwrap();
        assert!(app.carts().get().is_empty());
    }

    #[test]
    fn test_unknown_products_skipped() {
        let app = app();
        app.carts().add_to_cart("Discontinued", Money::new(10), 2).unwrap();
        app.carts().add_to_cart("WD Blue 4TB 5400RPM", Money::new(1_200_000), 1).unwrap();
        let page = cart_page(&app);
        assert_eq!(page.lines().len(), 1);
        assert_eq!(page.total().unwrap(), Money::new(1_200_000));
        let nodes = page.view();
        assert_eq!(find_all(&nodes, |el| el.has_class("cart-item")).len(), 1);
    }
}
