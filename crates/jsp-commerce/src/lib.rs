//! Storefront domain logic for JSP Store.
//!
//! This crate holds everything the pages need that is not markup:
//!
//! - **Catalog**: products loaded from JSON, lookups, facet sources
//! - **Search**: URL filter state, filtering, pagination, facets
//! - **Cart**: persisted cart with change events
//! - **Checkout**: form validation and the session order summary
//!
//! # Example
//!
//! ```rust,ignore
//! use jsp_commerce::prelude::*;
//!
//! let catalog = Catalog::from_json(include_str!("catalog.json"))?;
//! let state = FilterState::from_query("category=GPU&page=1");
//! let results = search(&catalog, &state, DEFAULT_PAGE_SIZE);
//! println!("{}", results.summary());
//!
//! let carts = CartStore::new(MemoryStore::new(), EventBus::new());
//! carts.add_to_cart("RTX 4070", Money::new(9_000_000), 1)?;
//! println!("Total: {}", carts.total()?.display());
//! ```

pub mod error;
pub mod events;
pub mod money;
pub mod sample;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use money::{format_rupiah, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::events::{drain_events, EventBus, StoreEvent};
    pub use crate::money::{format_rupiah, Money};
    pub use crate::sample::pick_random_no_dupe;

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartStore, CART_KEY};

    // Checkout
    pub use crate::checkout::{
        checkout, load_order_summary, CheckoutForm, OrderSummary, ORDER_SUMMARY_KEY,
    };

    // Search
    pub use crate::search::{
        apply_update, build_facets, filter, search, Dimension, Facet, FacetValue, FilterState,
        FilterUpdate, Pagination, SearchResults, DEFAULT_PAGE_SIZE,
    };
}
