//! Cart and cart line types.

use jsp_cache::Validate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::money::Money;

/// One product's quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product name.
    pub name: String,
    /// Unit price at the time the product was first added.
    pub price: Money,
    /// Quantity, at least 1.
    pub amount: u32,
}

impl CartLine {
    /// Create a new line.
    pub fn new(name: impl Into<String>, price: Money, amount: u32) -> Self {
        Self {
            name: name.into(),
            price,
            amount,
        }
    }

    /// Price times amount.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_mul(self.amount)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart: lines in insertion order, at most one per product.
///
/// Persisted as a bare JSON array of lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Find the line for `name`.
    pub fn find(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.name == name)
    }

    /// Add `amount` of a product, incrementing an existing line (saturating)
    /// or appending a new one priced at `price`.
    pub fn add(&mut self, name: &str, price: Money, amount: u32) {
        if amount == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.name == name) {
            Some(line) => line.amount = line.amount.saturating_add(amount),
            None => self.lines.push(CartLine::new(name, price, amount)),
        }
    }

    /// Set the amount of an existing line; zero or less removes it.
    ///
    /// Returns false when the product is not in the cart.
    pub fn set_amount(&mut self, name: &str, amount: i64) -> bool {
        if amount <= 0 {
            return self.remove(name);
        }
        match self.lines.iter_mut().find(|l| l.name == name) {
            Some(line) => {
                line.amount = u32::try_from(amount).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.name != name);
        self.lines.len() != before
    }

    /// Total number of units.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.amount)).sum()
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let subtotals = self
            .lines
            .iter()
            .map(CartLine::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        Money::checked_sum(subtotals).ok_or(CommerceError::Overflow)
    }

    /// Lines whose product exists in `catalog`, in cart order.
    pub fn resolved<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a CartLine> {
        self.lines
            .iter()
            .filter(move |line| catalog.find(&line.name).is_some())
    }
}

impl Validate for Cart {
    fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for line in &self.lines {
            if line.amount < 1 {
                return Err(format!("line {:?} has amount {}", line.name, line.amount));
            }
            if !seen.insert(line.name.as_str()) {
                return Err(format!("line {:?} appears more than once", line.name));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
