// crates/book-core/tests/properties.rs
//
// Randomised checks of the book invariants.

use book_core::{OrderBook, OrderId, Price, Quantity, Side};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Submit { side: Side, cents: u64, qty: Quantity },
    Cancel { back: usize },
    Resubmit { back: usize },
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// Mostly small sizes, with some at the top of the `u32` range.
fn qty() -> impl Strategy<Value = Quantity> {
    prop_oneof![
        4 => 0u32..50,
        1 => (u32::MAX - 100)..=u32::MAX,
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (side(), 95u64..=105, qty()).prop_map(|(side, cents, qty)| Op::Submit { side, cents, qty }),
        1 => (0usize..20).prop_map(|back| Op::Cancel { back }),
        1 => (0usize..20).prop_map(|back| Op::Resubmit { back }),
    ]
}

/// Brute-force best price over the resident orders.
fn expected_best(book: &OrderBook, side: Side) -> Option<Price> {
    let prices = book
        .list_resting()
        .into_iter()
        .filter(|o| o.side() == side)
        .map(|o| o.price());
    match side {
        Side::Buy => prices.max(),
        Side::Sell => prices.min(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 1..80)) {
        let mut book = OrderBook::new();
        let mut issued: Vec<OrderId> = Vec::new();

        for op in ops {
            match op {
                Op::Submit { side, cents, qty } => {
                    let order = book.create_order(side, Price::from_cents(cents), qty).unwrap();
                    let id = order.id();
                    issued.push(id);

                    let before: Vec<_> = book.list_resting();
                    let best_opposite = match side {
                        Side::Buy => book.best_ask_price(),
                        Side::Sell => book.best_bid_price(),
                    };
                    let trades = book.submit(order);

                    // Quantity conservation for the incoming order.
                    let traded: Quantity = trades.iter().map(|t| t.quantity).sum();
                    let rested = book.get(id).map(|o| o.remaining_qty()).unwrap_or(0);
                    prop_assert_eq!(traded + rested, qty);

                    for t in &trades {
                        // Crossing threshold; maker price.
                        match side {
                            Side::Buy => prop_assert!(t.price <= Price::from_cents(cents)),
                            Side::Sell => prop_assert!(t.price >= Price::from_cents(cents)),
                        }
                        let maker = before.iter().find(|o| o.id() == t.maker_order_id);
                        prop_assert!(maker.is_some());
                        if let Some(maker) = maker {
                            prop_assert_eq!(maker.price(), t.price);
                            let after = book.get(maker.id()).map(|o| o.remaining_qty()).unwrap_or(0);
                            prop_assert_eq!(maker.remaining_qty() - after, t.quantity);
                        }
                    }

                    // First trade is always at the best opposite price.
                    if let Some(first) = trades.first() {
                        prop_assert_eq!(Some(first.price), best_opposite);
                    }
                }
                Op::Cancel { back } => {
                    if let Some(&id) = issued.iter().rev().nth(back) {
                        let was_resident = book.contains(id);
                        prop_assert_eq!(book.cancel(id).is_some(), was_resident);
                        prop_assert!(book.cancel(id).is_none());
                    }
                }
                Op::Resubmit { back } => {
                    // A cancelled order handed back never rests again.
                    if let Some(&id) = issued.iter().rev().nth(back) {
                        if let Some(removed) = book.cancel(id) {
                            prop_assert!(book.submit(removed).is_empty());
                            prop_assert!(!book.contains(id));
                        }
                    }
                }
            }

            // No zero-quantity residents; book never crossed.
            for o in book.list_resting() {
                prop_assert!(o.remaining_qty() > 0);
            }
            prop_assert_eq!(book.best_bid_price(), expected_best(&book, Side::Buy));
            prop_assert_eq!(book.best_ask_price(), expected_best(&book, Side::Sell));
            if let (Some(bid), Some(ask)) = (book.best_bid_price(), book.best_ask_price()) {
                prop_assert!(bid < ask);
            }
        }
    }

    #[test]
    fn equal_price_makers_fill_in_submission_order(qtys in prop::collection::vec(1u32..20, 2..8), take in 1u32..100) {
        let mut book = OrderBook::new();
        let price = Price::from_cents(2300);
        let makers: Vec<OrderId> = qtys
            .iter()
            .map(|&q| {
                let o = book.create_order(Side::Buy, price, q).unwrap();
                let id = o.id();
                book.submit(o);
                id
            })
            .collect();

        let taker = book.create_order(Side::Sell, price, take).unwrap();
        let trades = book.submit(taker);

        // Makers hit form a prefix of the queue, in order.
        let hit: Vec<OrderId> = trades.iter().map(|t| t.maker_order_id).collect();
        prop_assert_eq!(&hit[..], &makers[..hit.len()]);

        // Every maker before the last one hit is fully consumed.
        if hit.len() > 1 {
            for id in &hit[..hit.len() - 1] {
                prop_assert!(!book.contains(*id));
            }
        }
    }
}
