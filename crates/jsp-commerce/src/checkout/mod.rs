//! Checkout.
//!
//! Turns the cart into an [`OrderSummary`] kept in the session store, then
//! empties the cart.

mod form;
mod order;

pub use form::CheckoutForm;
pub use order::{checkout, checkout_on, load_order_summary, OrderSummary, ORDER_SUMMARY_KEY};
