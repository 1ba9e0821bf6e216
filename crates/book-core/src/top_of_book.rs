//! Helper types for representing top-of-book state.
//!
//! Kept separate from the [`OutputMessage::TopOfBook`](crate::messages::OutputMessage)
//! event so the engine can compare snapshots cheaply when deciding
//! whether to emit a change.

use crate::price::Price;

/// Best bid and best ask prices; `None` when that side is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestPrices {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
}

/// Aggregate of one price level: the price and the total resting quantity.
///
/// The total is `u64` since several `u32` orders can share a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: Price,
    pub quantity: u64,
}

/// A snapshot of the best level on each side.
///
/// Used to:
/// - answer best-price queries with depth at the touch,
/// - compare against previous state to decide whether a `TopOfBook`
///   event should be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBookSnapshot {
    pub bid: Option<LevelSummary>,
    pub ask: Option<LevelSummary>,
}
