//! Money type and rupiah formatting.
//!
//! Prices are whole rupiah, so the amount is a plain unsigned integer and
//! every arithmetic step is checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Currency prefix used by the `id-ID` locale.
pub const RUPIAH_PREFIX: &str = "Rp";

const NO_BREAK_SPACE: char = '\u{00a0}';
const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const MAX_DECIMAL_PLACES: u32 = 20;

/// A price in whole rupiah.
///
/// Serialized as a bare integer so persisted carts stay
/// `{"name": .., "price": 1000, "amount": 2}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero rupiah.
    pub const ZERO: Money = Money(0);

    /// Create a new Money value.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in rupiah.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add another amount, returning `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiply by a line amount, returning `None` on overflow.
    ///
    /// ```
    /// use jsp_commerce::money::Money;
    /// assert_eq!(Money::new(1000).checked_mul(3), Some(Money::new(3000)));
    /// assert_eq!(Money::new(u64::MAX).checked_mul(2), None);
    /// ```
    pub fn checked_mul(&self, amount: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(amount)).map(Money)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn checked_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Format as a display string (e.g. "Rp 1.500.000").
    pub fn display(&self) -> String {
        format_rupiah(self.0 as f64, 0)
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Money(amount)
    }
}

impl Sum for Money {
    /// Saturating sum; use [`Money::checked_sum`] where overflow matters.
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format a number as Indonesian rupiah.
///
/// Produces `Rp`, a no-break space, the integer part grouped by `.`, and
/// exactly `decimal_places` fraction digits after a `,`. Negative values get a
/// leading `-`. Non-finite input yields an empty string.
///
/// ```
/// use jsp_commerce::money::format_rupiah;
/// assert_eq!(format_rupiah(1500000.0, 0), "Rp\u{a0}1.500.000");
/// assert_eq!(format_rupiah(1234.5, 2), "Rp\u{a0}1.234,50");
/// ```
pub fn format_rupiah(amount: f64, decimal_places: u32) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    let places = decimal_places.min(MAX_DECIMAL_PLACES);
    let scale = 10_u128.pow(places);
    // `as` saturates for values beyond u128.
    let scaled = (amount.abs() * scale as f64).round() as u128;
    let integer = scaled / scale;
    let fraction = scaled % scale;

    let mut out = String::new();
    if amount < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(RUPIAH_PREFIX);
    out.push(NO_BREAK_SPACE);
    out.push_str(&group_thousands(integer));
    if places > 0 {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(&format!("{:0width$}", fraction, width = places as usize));
    }
    out
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_rupiah() {
        assert_eq!(format_rupiah(0.0, 0), "Rp\u{a0}0");
        assert_eq!(format_rupiah(999.0, 0), "Rp\u{a0}999");
        assert_eq!(format_rupiah(1000.0, 0), "Rp\u{a0}1.000");
        assert_eq!(format_rupiah(12_345_678.0, 0), "Rp\u{a0}12.345.678");
    }

    #[test]
    fn test_format_with_decimals() {
        assert_eq!(format_rupiah(1000.0, 2), "Rp\u{a0}1.000,00");
        assert_eq!(format_rupiah(0.5, 1), "Rp\u{a0}0,5");
        assert_eq!(format_rupiah(1.005, 3), "Rp\u{a0}1,005");
    }

    #[test]
    fn test_format_rounds() {
        assert_eq!(format_rupiah(1499.6, 0), "Rp\u{a0}1.500");
        assert_eq!(format_rupiah(999.999, 2), "Rp\u{a0}1.000,00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_rupiah(-2500.0, 0), "-Rp\u{a0}2.500");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_rupiah(f64::NAN, 0), "");
        assert_eq!(format_rupiah(f64::INFINITY, 2), "");
        assert_eq!(format_rupiah(f64::NEG_INFINITY, 0), "");
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1_500_000).display(), "Rp\u{a0}1.500.000");
        assert_eq!(Money::new(1_500_000).to_string(), "Rp\u{a0}1.500.000");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let price = Money::new(2_000);
        assert_eq!(price.checked_mul(3), Some(Money::new(6_000)));
        assert_eq!(price.checked_add(Money::new(500)), Some(Money::new(2_500)));
        assert_eq!(Money::new(u64::MAX).checked_add(Money::new(1)), None);
    }

    #[test]
    fn test_money_checked_sum() {
        let total = Money::checked_sum([Money::new(100), Money::new(250)]);
        assert_eq!(total, Some(Money::new(350)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::ZERO));
        assert_eq!(
            Money::checked_sum([Money::new(u64::MAX), Money::new(1)]),
            None
        );
    }

    #[test]
    fn test_money_serializes_as_integer() {
        let json = serde_json::to_string(&Money::new(1000)).unwrap();
        assert_eq!(json, "1000");
        let parsed: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(parsed, Money::new(2500));
        assert!(serde_json::from_str::<Money>("-1").is_err());
    }
}
