//! Exact price representation using decimal arithmetic.
//!
//! Prices come from the backend as JSON numbers or strings and are shown
//! exactly as supplied: no rounding, no fixed number of decimals. Sums are
//! exact, so a cart total never picks up floating point noise.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price in rupees.
///
/// Displays as the bare amount (`999`, `49.5`); templates add the `Rs`
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price, the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Lossy conversion for numeric scoring; out-of-range values become 0.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_integer_json() {
        let price: Price = serde_json::from_str("999").unwrap();
        assert_eq!(price.to_string(), "999");
    }

    #[test]
    fn test_price_from_fractional_json() {
        let price: Price = serde_json::from_str("49.5").unwrap();
        assert_eq!(price.to_string(), "49.5");
    }

    #[test]
    fn test_price_from_string_json() {
        let price: Price = serde_json::from_str("\"120.50\"").unwrap();
        assert_eq!(price.to_string(), "120.50");
    }

    #[test]
    fn test_price_sum_is_exact() {
        let prices: Vec<Price> = ["0.1", "0.2"]
            .iter()
            .map(|s| serde_json::from_str(&format!("\"{s}\"")).unwrap())
            .collect();
        let total: Price = prices.iter().sum();
        assert_eq!(total.to_string(), "0.3");
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Price = Vec::<Price>::new().into_iter().sum();
        assert_eq!(total, Price::ZERO);
        assert_eq!(total.to_string(), "0");
    }

    #[test]
    fn test_negative_price_accepted() {
        let price: Price = serde_json::from_str("-5").unwrap();
        assert_eq!(price, Price::from(-5_i64));
    }

    #[test]
    fn test_to_f64() {
        assert!((Price::from(250_i64).to_f64() - 250.0).abs() < f64::EPSILON);
    }
}
