//! Internal order representation used inside the order book.
//!
//! An `Order` is a value: everything but `remaining_qty` is fixed at
//! creation. Orders are moved into the book's price levels and only the
//! book mutates the remaining quantity. Fields are crate-private so a
//! caller can read an order but never forge or edit one.

use std::fmt;

use crate::price::Price;
use crate::side::Side;

/// Order quantity in whole units.
pub type Quantity = u32;

/// Book-assigned order identifier. Never reused within a book.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single order in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub(crate) id: OrderId,
    pub(crate) side: Side,

    /// Worst price at which the order is willing to trade.
    pub(crate) price: Price,

    pub(crate) quantity: Quantity,      // original quantity
    pub(crate) remaining_qty: Quantity, // remaining unfilled quantity
}

impl Order {
    /// Build an order with its full quantity remaining.
    ///
    /// Crate-private: ids are minted by
    /// [`OrderBook::create_order`](crate::OrderBook::create_order).
    pub(crate) fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Order {
            id,
            side,
            price,
            quantity,
            remaining_qty: quantity,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Quantity requested at creation.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn remaining_qty(&self) -> Quantity {
        self.remaining_qty
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    /// Fill the order by up to `qty` units.
    ///
    /// Returns the quantity that was actually filled (which will be
    /// `<= qty` and `<= remaining_qty`).
    pub(crate) fn fill(&mut self, qty: Quantity) -> Quantity {
        let filled = qty.min(self.remaining_qty);
        self.remaining_qty -= filled;
        filled
    }

    /// Whether this order, as the incoming side, may trade at `resting_price`.
    pub fn crosses(&self, resting_price: Price) -> bool {
        match self.side {
            Side::Buy => self.price >= resting_price,
            Side::Sell => self.price <= resting_price,
        }
    }
}
