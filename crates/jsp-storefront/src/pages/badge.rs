//! Cart count badge in the header.

use jsp_cache::{KvStore, StorageChange};
use jsp_commerce::cart::{CartStore, CART_KEY};
use jsp_commerce::events::{drain_events, StoreEvent};
use jsp_render::html::{Element, Node};
use jsp_render::routes;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::app::Storefront;

/// Number of units in the cart, kept current from cart events and from
/// writes to the cart key made elsewhere (another tab sharing the store).
#[derive(Debug)]
pub struct CartBadge {
    count: u64,
    events: broadcast::Receiver<StoreEvent>,
    storage: broadcast::Receiver<StorageChange>,
}

impl CartBadge {
    pub fn new<L: KvStore, S: KvStore>(app: &Storefront<L, S>) -> Self {
        Self {
            count: app.carts().item_count(),
            events: app.events().subscribe(),
            storage: app.carts().storage_changes(),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Re-read the count if anything touched the cart since the last call.
    /// Returns whether the count changed.
    pub fn refresh<L: KvStore>(&mut self, carts: &CartStore<L>) -> bool {
        let mut stale = drain_events(&mut self.events).contains(&StoreEvent::CartUpdated);
        loop {
            match self.storage.try_recv() {
                Ok(change) => stale |= change.key == CART_KEY,
                Err(TryRecvError::Lagged(_)) => stale = true,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if !stale {
            return false;
        }
        let count = carts.item_count();
        let changed = count != self.count;
        self.count = count;
        changed
    }

    /// Cart link with the count; the count is left out when zero.
    pub fn view(&self) -> Node {
        let mut link = Element::new("a").class("cart").attr("href", routes::CART);
        if self.count > 0 {
            link = link.child(
                Element::new("span")
                    .class("cart-count")
                    .text(self.count.to_string()),
            );
        }
        link.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsp_cache::{Cache, MemoryStore};
    use jsp_commerce::catalog::Catalog;
    use jsp_commerce::Money;
    use jsp_render::html::find_by_class;
    use std::sync::Arc;

    fn app(local: Arc<MemoryStore>) -> Storefront<Arc<MemoryStore>, MemoryStore> {
        let catalog = Arc::new(Catalog::new(Vec::new()).unwrap());
        Storefront::new(catalog, local, MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_refresh_on_cart_update() {
        let app = app(Arc::new(MemoryStore::new()));
        let mut badge = CartBadge::new(&app);
        assert_eq!(badge.count(), 0);
        assert!(find_by_class(&[badge.view()], "cart-count").is_none());
        assert!(!badge.refresh(app.carts()));

        app.carts().add_to_cart("Mouse", Money::new(100), 3).unwrap();
        assert!(badge.refresh(app.carts()));
        assert_eq!(badge.count(), 3);
        assert_eq!(
            find_by_class(&[badge.view()], "cart-count").unwrap().text_content(),
            "3"
        );
    }

    #[test]
    fn test_refresh_on_write_from_other_tab() {
        let shared = Arc::new(MemoryStore::new());
        let tab = app(shared.clone());
        let mut badge = CartBadge::new(&tab);

        let other_tab = app(shared);
        other_tab.carts().add_to_cart("Keyboard", Money::new(100), 2).unwrap();
        assert!(badge.refresh(tab.carts()));
        assert_eq!(badge.count(), 2);
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let shared = Arc::new(MemoryStore::new());
        let app = app(shared.clone());
        let mut badge = CartBadge::new(&app);
        Cache::new(shared).set("theme", &"dark").unwrap();
        assert!(!badge.refresh(app.carts()));
    }
}
