//! Fixed-point limit prices.
//!
//! Prices are held as an integer number of cents so that ordering and
//! equality are exact; the text form always carries two decimals.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::BookError;

/// Decimal places carried by a [`Price`].
pub const PRICE_SCALE: u32 = 2;

/// A non-negative limit price in cents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || BookError::InvalidPrice(raw.to_string());

        let value = Decimal::from_str(raw).map_err(|_| invalid())?;
        if value < Decimal::ZERO || value.normalize().scale() > PRICE_SCALE {
            return Err(invalid());
        }

        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_u64())
            .map(Price)
            .ok_or_else(invalid)
    }
}
