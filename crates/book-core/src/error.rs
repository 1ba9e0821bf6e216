//! Error types for the order book core.
//!
//! Matching and cancelling are infallible: a zero-quantity submit is a
//! no-op and an unknown cancel id is a normal `None`. Errors arise when
//! turning untyped input into the core's value types, and when the id
//! counter runs out.

use thiserror::Error;

/// Rejections raised while constructing orders from raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Side outside {Buy, Sell}.
    #[error("invalid side: {0:?} (expected buy or sell)")]
    InvalidSide(String),

    /// Price that is negative, malformed, or finer than a cent.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    /// Quantity that is negative or not an integer.
    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// The book's id counter reached `u64::MAX`.
    #[error("order ids exhausted")]
    OrderIdsExhausted,
}
