//! Message-driven front for a single [`OrderBook`].
//!
//! - Mints ids for new orders through the book's own counter.
//! - Routes input messages to the book.
//! - Emits acks, trades, rest notices and top-of-book changes.
//!
//! Top-of-book changes are detected by comparing against the snapshot
//! taken after the previous message, per side, on both price and
//! quantity at the best level.

use crate::messages::{Cancel, InputMessage, NewOrder, OutputMessage};
use crate::order_book::OrderBook;
use crate::side::Side;
use crate::top_of_book::TopOfBookSnapshot;

/// Single-book matching engine.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    book: OrderBook,

    /// Cache of previous top-of-book for change detection.
    prev_top: TopOfBookSnapshot,
}

impl MatchingEngine {
    /// Create an engine over an empty book whose ids start at `1`.
    pub fn new() -> Self {
        MatchingEngine::default()
    }

    /// Create an engine over an existing (possibly pre-seeded) book.
    pub fn with_book(book: OrderBook) -> Self {
        let prev_top = book.top_of_book();
        MatchingEngine { book, prev_top }
    }

    /// Process a single input message and return any output events.
    pub fn process_message(&mut self, msg: InputMessage) -> Vec<OutputMessage> {
        match msg {
            InputMessage::NewOrder(new) => self.process_new_order(new),
            InputMessage::Cancel(cancel) => self.process_cancel(cancel),
            InputMessage::QueryBestPrices => {
                vec![OutputMessage::BestPrices(self.book.best_prices())]
            }
            InputMessage::ListResting => {
                vec![OutputMessage::RestingOrders(self.book.list_resting())]
            }
            InputMessage::Flush => self.process_flush(),
        }
    }

    /// Read access for queries and tests.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn process_new_order(&mut self, msg: NewOrder) -> Vec<OutputMessage> {
        let order = match self.book.create_order(msg.side, msg.price, msg.quantity) {
            Ok(order) => order,
            Err(err) => return vec![OutputMessage::Rejected(err)],
        };
        let order_id = order.id();

        if msg.quantity == 0 {
            // Taken and discarded by the book.
            self.book.submit(order);
            return vec![OutputMessage::Ignored { order_id }];
        }

        let mut outputs = vec![OutputMessage::ack(&order)];

        let trades = self.book.submit(order);
        // Bounded by msg.quantity, so this cannot overflow.
        let filled: u32 = trades.iter().map(|t| t.quantity).sum();
        outputs.extend(trades.into_iter().map(OutputMessage::Trade));

        if filled < msg.quantity {
            outputs.push(OutputMessage::Rested {
                order_id,
                remaining_qty: msg.quantity - filled,
            });
        }

        outputs.extend(self.check_top_of_book_changes());
        outputs
    }

    fn process_cancel(&mut self, msg: Cancel) -> Vec<OutputMessage> {
        let found = self.book.cancel(msg.order_id).is_some();

        let mut outputs = vec![OutputMessage::cancel_ack(msg.order_id, found)];

        // Only a real removal can move the top of book.
        if found {
            outputs.extend(self.check_top_of_book_changes());
        }

        outputs
    }

    fn process_flush(&mut self) -> Vec<OutputMessage> {
        self.book.clear();
        self.prev_top = TopOfBookSnapshot::default();

        // No output messages for flush.
        Vec::new()
    }

    /// Emit a `TopOfBook` event for every side whose best level changed.
    fn check_top_of_book_changes(&mut self) -> Vec<OutputMessage> {
        let mut outputs = Vec::new();
        let current = self.book.top_of_book();

        if current.bid != self.prev_top.bid {
            outputs.push(OutputMessage::top_of_book(Side::Buy, current.bid));
        }
        if current.ask != self.prev_top.ask {
            outputs.push(OutputMessage::top_of_book(Side::Sell, current.ask));
        }

        self.prev_top = current;
        outputs
    }
}
