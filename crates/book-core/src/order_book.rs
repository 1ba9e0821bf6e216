//! Limit order book with price-time priority.
//!
//! - Bids: descending by price (best = highest).
//! - Asks: ascending by price (best = lowest).
//! - FIFO (time-priority) within each price level.
//!
//! Every resident order is also indexed by id -> (side, price), so a
//! cancel goes straight to its price level. Inside a level the queue is
//! scanned linearly, which is O(orders at that price).

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::error::BookError;
use crate::messages::Trade;
use crate::order::{Order, OrderId, Quantity};
use crate::price::Price;
use crate::side::Side;
use crate::top_of_book::{BestPrices, LevelSummary, TopOfBookSnapshot};

type Levels = BTreeMap<Price, VecDeque<Order>>;

/// Single-instrument order book.
///
/// Owns its id counter, so independent books never share id state.
#[derive(Debug)]
pub struct OrderBook {
    /// Bids: price -> FIFO queue of orders at that price.
    ///
    /// `BTreeMap` keys are sorted ascending; the highest key is the best bid.
    bids: Levels,

    /// Asks: price -> FIFO queue of orders at that price.
    ///
    /// `BTreeMap` keys are sorted ascending; the lowest key is the best ask.
    asks: Levels,

    /// Resident order id -> (side, price level).
    index: HashMap<OrderId, (Side, Price)>,

    /// Minted by this book and not yet submitted.
    pending: HashSet<OrderId>,

    /// Next id handed out by [`OrderBook::create_order`].
    next_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        OrderBook::new()
    }
}

impl OrderBook {
    /// Create an empty book whose first minted id is `1`.
    pub fn new() -> Self {
        OrderBook::with_first_order_id(1)
    }

    /// Create an empty book whose first minted id is `first_id`.
    pub fn with_first_order_id(first_id: u64) -> Self {
        OrderBook {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::new(),
            pending: HashSet::new(),
            next_id: first_id,
        }
    }

    /// The id the next [`create_order`](Self::create_order) call will assign.
    pub fn next_order_id(&self) -> OrderId {
        OrderId(self.next_id)
    }

    /// Mint a new order with a fresh id.
    ///
    /// The id is consumed whatever happens to the order afterwards,
    /// including zero-quantity orders that `submit` ignores. `u64::MAX`
    /// is never handed out; reaching it fails with
    /// [`BookError::OrderIdsExhausted`].
    pub fn create_order(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Order, BookError> {
        let id = OrderId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(BookError::OrderIdsExhausted)?;
        self.pending.insert(id);
        Ok(Order::new(id, side, price, quantity))
    }

    /// Cross `order` against the opposite side, then rest any remainder.
    ///
    /// Returns the match events in execution order. Each executes at the
    /// resting order's price.
    ///
    /// Each order minted by [`create_order`](Self::create_order) is taken
    /// once. Anything else is a no-op: a second submit of the same id, an
    /// order handed back by [`cancel`](Self::cancel), a clone of a resting
    /// order, or an id this book has not minted. A zero-quantity order is
    /// taken and discarded.
    pub fn submit(&mut self, mut order: Order) -> Vec<Trade> {
        if !self.pending.remove(&order.id) || order.remaining_qty == 0 {
            return Vec::new();
        }

        let trades = self.match_order(&mut order);

        if order.remaining_qty > 0 {
            self.add_to_book(order);
        }

        trades
    }

    /// Remove a resting order by id.
    ///
    /// Returns the removed order, or `None` if no resident order has that
    /// id (never existed, already filled, or already cancelled).
    pub fn cancel(&mut self, id: OrderId) -> Option<Order> {
        let (side, price) = self.index.remove(&id)?;
        let levels = self.levels_mut(side);

        let queue = levels.get_mut(&price)?;
        let pos = queue.iter().position(|o| o.id == id)?;
        let removed = queue.remove(pos);

        if queue.is_empty() {
            levels.remove(&price);
        }

        removed
    }

    /// Best bid and best ask prices.
    pub fn best_prices(&self) -> BestPrices {
        BestPrices {
            bid: self.best_bid_price(),
            ask: self.best_ask_price(),
        }
    }

    /// Highest resting bid price, if any.
    pub fn best_bid_price(&self) -> Option<Price> {
        best_level_price(&self.bids, Side::Buy)
    }

    /// Lowest resting ask price, if any.
    pub fn best_ask_price(&self) -> Option<Price> {
        best_level_price(&self.asks, Side::Sell)
    }

    /// Best level on each side with its total resting quantity.
    pub fn top_of_book(&self) -> TopOfBookSnapshot {
        TopOfBookSnapshot {
            bid: self.best_level(Side::Buy),
            ask: self.best_level(Side::Sell),
        }
    }

    /// Best level of one side, aggregated.
    pub fn best_level(&self, side: Side) -> Option<LevelSummary> {
        let levels = self.levels(side);
        let price = best_level_price(levels, side)?;
        levels.get(&price).map(|orders| LevelSummary {
            price,
            quantity: total_quantity_at_price(orders),
        })
    }

    /// Aggregated price levels of one side, best first.
    pub fn depth(&self, side: Side) -> Vec<LevelSummary> {
        let summarize = |(price, orders): (&Price, &VecDeque<Order>)| LevelSummary {
            price: *price,
            quantity: total_quantity_at_price(orders),
        };

        match side {
            Side::Buy => self.bids.iter().rev().map(summarize).collect(),
            Side::Sell => self.asks.iter().map(summarize).collect(),
        }
    }

    /// All resident orders, sorted by id (presentation order, not priority).
    pub fn list_resting(&self) -> Vec<Order> {
        let mut all: Vec<Order> = self
            .bids
            .values()
            .chain(self.asks.values())
            .flat_map(|orders| orders.iter().cloned())
            .collect();
        all.sort_by_key(|o| o.id);
        all
    }

    /// Look up a resident order.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        let (side, price) = self.index.get(&id)?;
        self.levels(*side)
            .get(price)?
            .iter()
            .find(|o| o.id == id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of resident orders on both sides.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Drop every resting order. The id counter keeps its value.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.index.clear();
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Match an incoming order against the opposite side of the book.
    ///
    /// Walks price levels best first and FIFO within a level, stopping at
    /// the first level that fails the price test. Any remaining quantity
    /// is left in `order` for the caller to rest.
    fn match_order(&mut self, order: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        let resting_side = order.side.opposite();
        let OrderBook {
            bids, asks, index, ..
        } = self;
        let levels = match resting_side {
            Side::Buy => bids,
            Side::Sell => asks,
        };

        while order.remaining_qty > 0 {
            let best_price = match best_level_price(levels, resting_side) {
                Some(p) => p,
                None => break,
            };

            if !order.crosses(best_price) {
                break;
            }

            if let Some(queue) = levels.get_mut(&best_price) {
                while order.remaining_qty > 0 {
                    let maker = match queue.front_mut() {
                        Some(o) => o,
                        None => break,
                    };

                    let trade_qty = order.remaining_qty.min(maker.remaining_qty);
                    order.fill(trade_qty);
                    maker.fill(trade_qty);

                    // Maker price.
                    trades.push(Trade {
                        taker_order_id: order.id,
                        maker_order_id: maker.id,
                        taker_side: order.side,
                        price: maker.price,
                        quantity: trade_qty,
                    });

                    if maker.is_filled() {
                        if let Some(done) = queue.pop_front() {
                            index.remove(&done.id);
                        }
                    }
                }

                if queue.is_empty() {
                    levels.remove(&best_price);
                }
            }
        }

        trades
    }

    /// Add a remaining order to the back of its price level.
    fn add_to_book(&mut self, order: Order) {
        self.index.insert(order.id, (order.side, order.price));
        self.levels_mut(order.side)
            .entry(order.price)
            .or_default()
            .push_back(order);
    }

    fn levels(&self, side: Side) -> &Levels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn levels_mut(&mut self, side: Side) -> &mut Levels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

/// Best key of a side: highest for bids, lowest for asks.
fn best_level_price(levels: &Levels, side: Side) -> Option<Price> {
    match side {
        Side::Buy => levels.keys().next_back().copied(),
        Side::Sell => levels.keys().next().copied(),
    }
}

/// Sum of remaining_qty across all orders at one price level.
///
/// Summed as `u64`: a level can hold more than `u32::MAX` in total.
fn total_quantity_at_price(orders: &VecDeque<Order>) -> u64 {
    orders.iter().map(|o| u64::from(o.remaining_qty)).sum()
}
