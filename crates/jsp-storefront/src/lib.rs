//! Pages of JSP Store.
//!
//! A [`Storefront`] holds what one browser tab shares: the catalog, the
//! local store with the cart, the session store with the last order, an
//! event bus and the template registry. Page controllers in [`pages`] borrow
//! it, expose the actions a shopper can take, and render their content.
//!
//! ```rust,ignore
//! use jsp_storefront::prelude::*;
//!
//! let app = Storefront::new(catalog, FileStore::open(dir)?, MemoryStore::new())?;
//! let mut search = SearchPage::new(&app, app.history("/search.html?q=ryzen")?);
//! search.toggle(Dimension::Category, "CPU");
//! let html = app.render(&search, Some(&HttpIconSource::default())).await;
//! ```

mod app;
mod browser;
mod error;

pub mod pages;

pub use app::{page_title, Storefront, DEFAULT_ORIGIN, SITE_NAME};
pub use browser::{History, Location};
pub use error::StorefrontError;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::pages::{
        CartBadge, CartPage, CheckoutPage, HomePage, OrderSummaryPage, Page, ProductPage,
        SearchPage,
    };
    pub use crate::{History, Location, Storefront, StorefrontError};
    pub use jsp_cache::{FileStore, KvStore, MemoryStore};
    pub use jsp_commerce::search::Dimension;
    pub use jsp_render::{HttpIconSource, IconSource};
}
