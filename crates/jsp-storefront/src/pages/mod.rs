//! Page controllers.
//!
//! Each page reads its state from the location and the stores, exposes the
//! user actions of the original page as methods, and renders its `<main>`
//! content with [`Page::view`].

mod badge;
mod cart;
mod checkout;
mod home;
mod order_summary;
mod product;
mod search;

pub use badge::CartBadge;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use home::HomePage;
pub use order_summary::OrderSummaryPage;
pub use product::ProductPage;
pub use search::SearchPage;

use jsp_render::html::Node;

use crate::browser::Location;

/// A renderable page.
pub trait Page {
    /// Where the page is.
    fn location(&self) -> &Location;

    /// Document title.
    fn title(&self) -> String;

    /// Content of `<main>`.
    fn view(&self) -> Vec<Node>;
}

/// Parse an amount typed into a number field; anything unparseable or
/// below 1 becomes 1.
pub(crate) fn clamp_amount_input(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(amount) if amount >= 1 => u32::try_from(amount).unwrap_or(u32::MAX),
        _ => 1,
    }
}
