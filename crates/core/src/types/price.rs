//! Type-safe price representation using decimal arithmetic.
//!
//! All shop prices are in Algerian dinars (DZD) and are entered as whole
//! units, but arithmetic stays in [`Decimal`] so that line totals and order
//! totals never go through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest price the admin may enter for a product or a shipping zone.
pub const MAX_PRICE_UNITS: i64 = 100_000_000;

/// Why an entered price cannot be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    /// Zero or negative.
    #[error("price must be greater than zero")]
    NonPositive,
    /// Has a fractional part.
    #[error("price must be a whole number of dinars")]
    Fractional,
    /// Above [`MAX_PRICE_UNITS`].
    #[error("price must not exceed {} dinars", MAX_PRICE_UNITS)]
    TooHigh,
}

/// A price in dinars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dinars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from whole dinars.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Whether the price is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check a price entered through the admin forms: a positive whole
    /// number of dinars no larger than [`MAX_PRICE_UNITS`].
    ///
    /// # Errors
    ///
    /// Returns the first [`PriceError`] that applies.
    pub fn validate_listing(self) -> Result<Self, PriceError> {
        if !self.is_positive() {
            return Err(PriceError::NonPositive);
        }
        if !self.0.is_integer() {
            return Err(PriceError::Fractional);
        }
        if self.0 > Decimal::from(MAX_PRICE_UNITS) {
            return Err(PriceError::TooHigh);
        }
        Ok(self)
    }

    /// Price of `quantity` units at this unit price, saturating at the
    /// largest representable amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

/// Saturating addition.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} د.ج", self.0.normalize())
    }
}
