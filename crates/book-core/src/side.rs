//! Side (Buy / Sell) for orders and top-of-book.

use std::fmt;
use std::str::FromStr;

use crate::error::BookError;

/// Order side: Buy or Sell.
///
/// A closed set; anything else is rejected when parsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Single-char representation (`'B'` / `'S'`).
    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("Buy"),
            Side::Sell => f.write_str("Sell"),
        }
    }
}

/// Accepts `buy`, `sell`, `b`, `s` in any case.
impl FromStr for Side {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("buy") || t.eq_ignore_ascii_case("b") {
            Ok(Side::Buy)
        } else if t.eq_ignore_ascii_case("sell") || t.eq_ignore_ascii_case("s") {
            Ok(Side::Sell)
        } else {
            Err(BookError::InvalidSide(t.to_string()))
        }
    }
}
