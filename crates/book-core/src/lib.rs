//! book-core
//!
//! Pure limit order book logic:
//! - side, price and order representation
//! - single-instrument order book with price-time priority
//! - message-driven matching engine front

pub mod side;
pub mod price;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod matching_engine;
pub mod error;
pub mod top_of_book;

pub use side::Side;
pub use price::Price;

pub use messages::{
    Ack,
    Cancel,
    CancelAck,
    InputMessage,
    NewOrder,
    OutputMessage,
    Trade,
};

pub use order::{Order, OrderId, Quantity};
pub use order_book::OrderBook;
pub use matching_engine::MatchingEngine;
pub use error::BookError;
pub use top_of_book::{BestPrices, LevelSummary, TopOfBookSnapshot};
