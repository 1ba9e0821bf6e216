//! Demo book contents.

use book_core::{BookError, OrderBook, Price, Quantity, Side};

/// Orders loaded by `--seed-demo`, in submission order.
pub const DEMO_ORDERS: [(Side, Price, Quantity); 5] = [
    (Side::Buy, Price::from_cents(20_00), 100),
    (Side::Sell, Price::from_cents(25_00), 200),
    (Side::Buy, Price::from_cents(23_00), 50),
    (Side::Buy, Price::from_cents(23_00), 70),
    (Side::Sell, Price::from_cents(28_00), 100),
];

/// Position in [`DEMO_ORDERS`] of the order cancelled after seeding.
pub const DEMO_CANCELLED: usize = 2;

/// A book holding the demo orders, minus the cancelled one.
///
/// Fails if `first_order_id` leaves no room for the demo ids.
pub fn seeded_book(first_order_id: u64) -> Result<OrderBook, BookError> {
    let mut book = OrderBook::with_first_order_id(first_order_id);

    let mut ids = Vec::with_capacity(DEMO_ORDERS.len());
    for (side, price, quantity) in DEMO_ORDERS {
        let order = book.create_order(side, price, quantity)?;
        ids.push(order.id());
        book.submit(order);
    }

    if let Some(&id) = ids.get(DEMO_CANCELLED) {
        book.cancel(id);
    }

    Ok(book)
}
