//! Product detail page.

use jsp_cache::KvStore;
use jsp_commerce::catalog::Product;
use jsp_commerce::search::FilterState;
use jsp_commerce::{CommerceError, Money};
use jsp_render::html::{Element, Node};
use jsp_render::routes;

use super::{clamp_amount_input, Page};
use crate::app::{page_title, Storefront};
use crate::browser::Location;

const NOT_FOUND: &str = "Product not found!";

/// The product named by the `name` query parameter, with an amount picker.
#[derive(Debug)]
pub struct ProductPage<'a, L, S> {
    app: &'a Storefront<L, S>,
    location: Location,
    product: Option<&'a Product>,
    amount: u32,
}

impl<'a, L: KvStore, S: KvStore> ProductPage<'a, L, S> {
    pub fn new(app: &'a Storefront<L, S>, location: Location) -> Self {
        let product = location
            .param("name")
            .and_then(|name| app.catalog().find(&name));
        if product.is_none() {
            tracing::debug!(url = %location.url(), "product page for unknown product");
        }
        Self {
            app,
            location,
            product,
            amount: 1,
        }
    }

    pub fn product(&self) -> Option<&'a Product> {
        self.product
    }

    /// Units to add.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn increment(&mut self) {
        self.amount = self.amount.saturating_add(1);
    }

    /// Decrease the amount, never below 1.
    pub fn decrement(&mut self) {
        self.amount = self.amount.saturating_sub(1).max(1);
    }

    /// Take the amount typed into the input.
    pub fn set_amount_input(&mut self, raw: &str) {
        self.amount = clamp_amount_input(raw);
    }

    /// Price times amount; `None` without a product or on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.product?.price.checked_mul(self.amount)
    }

    /// Add the chosen amount to the cart and return the confirmation
    /// message.
    pub fn add_to_cart(&self) -> Result<String, CommerceError> {
        let product = self.product.ok_or_else(|| {
            CommerceError::ProductNotFound(self.location.param("name").unwrap_or_default())
        })?;
        self.app
            .carts()
            .add_to_cart(&product.name, product.price, i64::from(self.amount))?;
        Ok(format!("{}x {} added to cart!", self.amount, product.name))
    }

    fn details(&self, product: &Product) -> Node {
        let search_link = |class: &str, label: &str, state: FilterState| -> Node {
            Element::new("a")
                .class(class)
                .attr("href", routes::search_href(&state))
                .text(label)
                .into()
        };
        let tags = product.tags.iter().map(|tag| {
            search_link("tag", tag, FilterState::new().with_tag(tag.as_str()))
        });
        let subtotal = self
            .subtotal()
            .map(|m| m.display())
            .unwrap_or_default();

        let amount = Element::new("div")
            .class("amount")
            .child(
                Element::new("button")
                    .class("decrement")
                    .attr("type", "button")
                    .flag("disabled", self.amount <= 1)
                    .text("-"),
            )
            .child(
                Element::new("input")
                    .attr("type", "number")
                    .attr("min", "1")
                    .attr("value", self.amount.to_string()),
            )
            .child(
                Element::new("button")
                    .class("increment")
                    .attr("type", "button")
                    .text("+"),
            );

        Element::new("div")
            .class("product")
            .child(
                Element::new("div").class("product-image").child(
                    Element::new("img")
                        .attr("src", routes::product_image(&product.name))
                        .attr("alt", product.name.as_str()),
                ),
            )
            .child(
                Element::new("div")
                    .class("product-details")
                    .child(Element::new("h1").class("name").text(product.name.as_str()))
                    .child(search_link(
                        "category",
                        &product.category,
                        FilterState::new().with_category(product.category.as_str()),
                    ))
                    .child(search_link(
                        "manufacturer",
                        &product.manufacturer,
                        FilterState::new().with_manufacturer(product.manufacturer.as_str()),
                    ))
                    .child(Element::new("div").class("price").text(product.price.display()))
                    .child(Element::new("div").class("tags").children(tags))
                    .child(amount)
                    .child(Element::new("div").class("subtotal").text(subtotal))
                    .child(
                        Element::new("button")
                            .class("add-to-cart")
                            .attr("type", "button")
                            .text("Add to cart"),
                    ),
            )
            .into()
    }
}

impl<L: KvStore, S: KvStore> Page for ProductPage<'_, L, S> {
    fn location(&self) -> &Location {
        &self.location
    }

    fn title(&self) -> String {
        match self.product {
            Some(product) => page_title(&product.name),
            None => page_title(NOT_FOUND),
        }
    }

    fn view(&self) -> Vec<Node> {
        match self.product {
            Some(product) => vec![self.details(product)],
            None => vec![Element::new("h1").class("not-found").text(NOT_FOUND).into()],
        }
    }
}
