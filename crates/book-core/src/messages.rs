//! Message types used by the order book core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what the engine consumes.
//! - [`OutputMessage`]: what the engine produces.
//! - [`Trade`]: the match event produced by [`OrderBook::submit`](crate::OrderBook::submit).
//!
//! Text encoders live in the `book-protocol` crate; this module is
//! purely logical.

use crate::error::BookError;
use crate::order::{Order, OrderId, Quantity};
use crate::price::Price;
use crate::side::Side;
use crate::top_of_book::{BestPrices, LevelSummary};

/// A request into the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// New limit order. The engine mints its id.
    NewOrder(NewOrder),

    /// Cancel a resting order by id.
    Cancel(Cancel),

    /// Ask for the current best bid / best ask.
    QueryBestPrices,

    /// Ask for every resting order, sorted by id.
    ListResting,

    /// Drop all resting orders. Ids keep counting.
    Flush,
}

/// An event emitted by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// New order accepted and assigned `order_id`.
    Ack(Ack),

    /// New order with zero quantity: id consumed, book untouched.
    Ignored { order_id: OrderId },

    /// New order that could not be created (no id was assigned).
    Rejected(BookError),

    /// One match between the incoming order and a resting order.
    Trade(Trade),

    /// Unfilled remainder inserted into the book.
    Rested {
        order_id: OrderId,
        remaining_qty: Quantity,
    },

    /// Outcome of a cancel request.
    CancelAck(CancelAck),

    /// Best level on one side changed. `level == None` means the side
    /// is now empty.
    TopOfBook {
        side: Side,
        level: Option<LevelSummary>,
    },

    /// Answer to [`InputMessage::QueryBestPrices`].
    BestPrices(BestPrices),

    /// Answer to [`InputMessage::ListResting`].
    RestingOrders(Vec<Order>),
}

/// New order request (input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

/// Cancel request (input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancel {
    pub order_id: OrderId,
}

/// Acknowledgement of a new order (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

/// Outcome of a cancel request (output).
///
/// `found == false` is a normal answer for unknown or already removed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelAck {
    pub order_id: OrderId,
    pub found: bool,
}

/// A match between an incoming (taker) and a resting (maker) order.
///
/// Executes at the maker's limit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub taker_order_id: OrderId,
    pub maker_order_id: OrderId,

    /// Side of the incoming order.
    pub taker_side: Side,

    pub price: Price,
    pub quantity: Quantity,
}

impl Trade {
    pub fn buy_order_id(&self) -> OrderId {
        match self.taker_side {
            Side::Buy => self.taker_order_id,
            Side::Sell => self.maker_order_id,
        }
    }

    pub fn sell_order_id(&self) -> OrderId {
        match self.taker_side {
            Side::Buy => self.maker_order_id,
            Side::Sell => self.taker_order_id,
        }
    }
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl OutputMessage {
    /// Convenience constructor for an Ack event.
    pub fn ack(order: &Order) -> Self {
        OutputMessage::Ack(Ack {
            order_id: order.id,
            side: order.side,
            price: order.price,
            quantity: order.quantity,
        })
    }

    /// Convenience constructor for a CancelAck event.
    pub fn cancel_ack(order_id: OrderId, found: bool) -> Self {
        OutputMessage::CancelAck(CancelAck { order_id, found })
    }

    /// Convenience constructor for a top-of-book change.
    pub fn top_of_book(side: Side, level: Option<LevelSummary>) -> Self {
        OutputMessage::TopOfBook { side, level }
    }
}
