//! Order summary page.

use jsp_cache::KvStore;
use jsp_commerce::checkout::{load_order_summary, OrderSummary};
use jsp_render::html::{Element, Node};
use jsp_render::routes;

use super::Page;
use crate::app::{page_title, Storefront};
use crate::browser::Location;

const MISSING: &str = "No order summary found.";

/// Shows the last order placed in this session.
#[derive(Debug)]
pub struct OrderSummaryPage<'a, L, S> {
    app: &'a Storefront<L, S>,
    location: Location,
}

impl<'a, L: KvStore, S: KvStore> OrderSummaryPage<'a, L, S> {
    pub fn new(app: &'a Storefront<L, S>, location: Location) -> Self {
        Self { app, location }
    }

    pub fn summary(&self) -> Option<OrderSummary> {
        load_order_summary(self.app.session())
    }
}

impl<L: KvStore, S: KvStore> Page for OrderSummaryPage<'_, L, S> {
    fn location(&self) -> &Location {
        &self.location
    }

    fn title(&self) -> String {
        page_title("Order Summary")
    }

    fn view(&self) -> Vec<Node> {
        let Some(summary) = self.summary() else {
            return vec![Element::new("p").class("no-order").text(MISSING).into()];
        };
        vec![
            Element::new("h1").text("Thank you for your order!").into(),
            customer_view(&summary),
            items_view(&summary),
        ]
    }
}

fn detail(label: &str, value: &str) -> Node {
    Element::new("div")
        .class("detail")
        .child(Element::new("dt").text(label))
        .child(Element::new("dd").text(value))
        .into()
}

fn customer_view(summary: &OrderSummary) -> Node {
    let customer = &summary.customer;
    let mut details = Element::new("dl")
        .class("customer")
        .child(detail("Full Name", &customer.full_name))
        .child(detail("Phone Number", &customer.phone_number))
        .child(detail("Email", &customer.email))
        .child(detail("Date of Birth", &customer.dob))
        .child(detail("Address", &customer.address));
    if !customer.notes.is_empty() {
        details = details.child(detail("Notes", &customer.notes));
    }
    details.into()
}

fn items_view(summary: &OrderSummary) -> Node {
    let rows = summary.items.iter().map(|line| {
        Element::new("tr")
            .child(
                Element::new("td").child(
                    Element::new("a")
                        .attr("href", routes::product_href(&line.name))
                        .text(line.name.as_str()),
                ),
            )
            .child(Element::new("td").class("price").text(line.price.display()))
            .child(Element::new("td").class("amount").text(line.amount.to_string()))
            .child(
                Element::new("td")
                    .class("subtotal")
                    .text(line.subtotal().map(|m| m.display()).unwrap_or_default()),
            )
            .into()
    });
    Element::new("div")
        .class("order-items")
        .child(Element::new("table").children(rows))
        .child(
            Element::new("div")
                .class("total")
                .text("Total ")
                .child(Element::new("span").class("price").text(summary.total.display())),
        )
        .into()
}
