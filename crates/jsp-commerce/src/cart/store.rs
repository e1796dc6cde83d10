//! Persisted cart.

use jsp_cache::{Cache, KvStore, StorageChange};
use tokio::sync::broadcast;

use super::Cart;
use crate::error::CommerceError;
use crate::events::{EventBus, StoreEvent};
use crate::money::Money;

/// Storage key of the cart.
pub const CART_KEY: &str = "cart";

/// Cart persisted in a key-value store.
///
/// Every mutation reads the stored cart, changes it, writes it back in full
/// and publishes [`StoreEvent::CartUpdated`]. Concurrent writers are not
/// merged; the last write wins.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    cache: Cache<S>,
    events: EventBus,
}

impl<S: KvStore> CartStore<S> {
    /// Create a cart store over `store`, publishing on `events`.
    pub fn new(store: S, events: EventBus) -> Self {
        Self {
            cache: Cache::new(store),
            events,
        }
    }

    /// The event bus mutations are announced on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to raw writes on the underlying store, including writes
    /// made through other handles.
    pub fn storage_changes(&self) -> broadcast::Receiver<StorageChange> {
        self.cache.store().changes()
    }

    /// The stored cart. Missing, unparseable or invalid data reads as an
    /// empty cart.
    pub fn get(&self) -> Cart {
        self.cache.get_valid_or_default(CART_KEY)
    }

    /// Set a line's amount; zero or less removes the line. Does nothing when
    /// the product is not in the cart.
    pub fn set_amount(&self, name: &str, amount: i64) -> Result<(), CommerceError> {
        let mut cart = self.get();
        if !cart.set_amount(name, amount) {
            tracing::debug!(name, "set_amount on product not in cart");
            return Ok(());
        }
        self.save(&cart)
    }

    /// Remove a product's line. Does nothing when it is not in the cart.
    pub fn remove(&self, name: &str) -> Result<(), CommerceError> {
        let mut cart = self.get();
        if !cart.remove(name) {
            return Ok(());
        }
        self.save(&cart)
    }

    /// Add `amount` units of a product.
    ///
    /// An existing line is incremented and keeps its price; otherwise a new
    /// line is appended with `price`.
    pub fn add_to_cart(&self, name: &str, price: Money, amount: i64) -> Result<(), CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidAmount(amount));
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let mut cart = self.get();
        cart.add(name, price, amount);
        self.save(&cart)
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<(), CommerceError> {
        self.save(&Cart::new())
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        self.get().item_count()
    }

    /// Sum of line subtotals at stored prices.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.get().total()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(CART_KEY, cart)?;
        tracing::debug!(lines = cart.len(), items = cart.item_count(), "cart saved");
        self.events.publish(StoreEvent::CartUpdated);
        Ok(())
    }
}
