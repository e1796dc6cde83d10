//! Order summary.

use chrono::{Local, NaiveDate};
use jsp_cache::{Cache, KvStore};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartStore};
use crate::catalog::Catalog;
use crate::checkout::CheckoutForm;
use crate::error::CommerceError;
use crate::money::Money;

/// Session storage key of the last order summary.
pub const ORDER_SUMMARY_KEY: &str = "orderSummary";

/// Snapshot of a completed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    /// Customer details, serialized inline.
    #[serde(flatten)]
    pub customer: CheckoutForm,
    /// Ordered lines at their cart prices.
    pub items: Vec<CartLine>,
    /// Sum of line subtotals.
    pub total: Money,
}

impl OrderSummary {
    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.amount)).sum()
    }
}

/// Check out the current cart, validating the form against today's date.
pub fn checkout<L: KvStore, S: KvStore>(
    carts: &CartStore<L>,
    session: &Cache<S>,
    catalog: &Catalog,
    form: &CheckoutForm,
) -> Result<OrderSummary, CommerceError> {
    checkout_on(carts, session, catalog, form, Local::now().date_naive())
}

/// Check out the current cart.
///
/// Only lines whose product is still in the catalog are ordered. The summary
/// is written to the session store, then the cart is cleared.
pub fn checkout_on<L: KvStore, S: KvStore>(
    carts: &CartStore<L>,
    session: &Cache<S>,
    catalog: &Catalog,
    form: &CheckoutForm,
    today: NaiveDate,
) -> Result<OrderSummary, CommerceError> {
    let customer = form.trimmed();
    customer.validate_on(today)?;

    let cart = carts.get();
    let items: Vec<CartLine> = cart.resolved(catalog).cloned().collect();
    if items.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    let skipped = cart.len() - items.len();
    if skipped > 0 {
        tracing::warn!(skipped, "cart lines without a catalog product left out of the order");
    }

    let subtotals = items
        .iter()
        .map(CartLine::subtotal)
        .collect::<Result<Vec<_>, _>>()?;
    let total = Money::checked_sum(subtotals).ok_or(CommerceError::Overflow)?;

    let summary = OrderSummary {
        customer,
        items,
        total,
    };
    session.set(ORDER_SUMMARY_KEY, &summary)?;
    carts.clear()?;

    tracing::info!(
        items = summary.item_count(),
        total = summary.total.amount(),
        "order placed"
    );
    Ok(summary)
}

/// The last order summary of this session, if any. Corrupt data reads as
/// none.
pub fn load_order_summary<S: KvStore>(session: &Cache<S>) -> Option<OrderSummary> {
    match session.get(ORDER_SUMMARY_KEY) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable order summary");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::events::{drain_events, EventBus, StoreEvent};
    use jsp_cache::MemoryStore;
    use std::sync::Arc;

    struct Fixture {
        carts: CartStore<Arc<MemoryStore>>,
        session: Cache<Arc<MemoryStore>>,
        catalog: Catalog,
    }

    fn fixture() -> Fixture {
        Fixture {
            carts: CartStore::new(Arc::new(MemoryStore::new()), EventBus::new()),
            session: Cache::new(Arc::new(MemoryStore::new())),
            catalog: Catalog::new(vec![
                Product::new("X", "M", "CPU", Money::new(1000)),
                Product::new("Y", "M", "GPU", Money::new(5000)),
            ])
            .unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: " Siti Rahma ".into(),
            phone_number: "0812 3456 7890".into(),
            email: "siti@example.com".into(),
            dob: "2000-01-31".into(),
            address: "Jl. Sudirman 5".into(),
            notes: "Ring the bell".into(),
        }
    }

    #[test]
    fn test_checkout_snapshots_and_clears_cart() {
        let f = fixture();
        f.carts.add_to_cart("X", Money::new(1000), 2).unwrap();
        f.carts.add_to_cart("Y", Money::new(5000), 1).unwrap();
        let mut events = f.carts.events().subscribe();

        let summary = checkout_on(&f.carts, &f.session, &f.catalog, &form(), today()).unwrap();

        assert_eq!(summary.customer.full_name, "Siti Rahma");
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.total, Money::new(7000));
        assert!(f.carts.get().is_empty());
        assert_eq!(drain_events(&mut events), vec![StoreEvent::CartUpdated]);
        assert_eq!(load_order_summary(&f.session), Some(summary));
    }

    #[test]
    fn test_summary_json_shape() {
        let f = fixture();
        f.carts.add_to_cart("X", Money::new(1000), 2).unwrap();
        checkout_on(&f.carts, &f.session, &f.catalog, &form(), today()).unwrap();

        let raw = f.session.store().get(ORDER_SUMMARY_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["fullName", "phoneNumber", "email", "dob", "address", "notes", "items", "total"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["total"], 2000);
        assert_eq!(json["items"][0]["amount"], 2);
    }

    #[test]
    fn test_empty_cart_is_refused() {
        let f = fixture();
        assert!(matches!(
            checkout_on(&f.carts, &f.session, &f.catalog, &form(), today()),
            Err(CommerceError::EmptyCart)
        ));
        assert_eq!(load_order_summary(&f.session), None);
    }

    #[test]
    fn test_unresolvable_lines_are_left_out() {
        let f = fixture();
        f.carts.add_to_cart("Discontinued", Money::new(10), 1).unwrap();
        f.carts.add_to_cart("Y", Money::new(5000), 2).unwrap();

        let summary = checkout_on(&f.carts, &f.session, &f.catalog, &form(), today()).unwrap();
        assert_eq!(summary.items, vec![CartLine::new("Y", Money::new(5000), 2)]);
        assert_eq!(summary.total, Money::new(10_000));
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let f = fixture();
        f.carts.add_to_cart("X", Money::new(1000), 1).unwrap();
        let mut bad = form();
        bad.email = "nope".into();

        assert!(matches!(
            checkout_on(&f.carts, &f.session, &f.catalog, &bad, today()),
            Err(CommerceError::Validation { field: "email", .. })
        ));
        assert_eq!(f.carts.item_count(), 1);
    }

    #[test]
    fn test_corrupt_summary_loads_as_none() {
        let f = fixture();
        f.session.store().set(ORDER_SUMMARY_KEY, "{{{").unwrap();
        assert_eq!(load_order_summary(&f.session), None);
    }
}
