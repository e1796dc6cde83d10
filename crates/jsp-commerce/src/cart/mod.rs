//! Shopping cart.
//!
//! [`Cart`] is the persisted value; [`CartStore`] reads and writes it through
//! a [`jsp_cache::KvStore`] and announces every write on the event bus.

mod cart;
mod store;

pub use cart::{Cart, CartLine};
pub use store::{CartStore, CART_KEY};
