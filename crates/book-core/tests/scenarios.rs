// crates/book-core/tests/scenarios.rs
use book_core::{InputMessage, MatchingEngine, OrderBook, OrderId, OutputMessage, Price, Side};
use book_protocol::{format_output_lines, parse_input_line};

const INPUT: &str = include_str!("data/scenarios.txt");
const EXPECTED: &str = include_str!("data/scenarios.expected");

fn replay(engine: &mut MatchingEngine, lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        let msg = parse_input_line(line).expect("scenario lines must parse");
        if let Some(msg) = msg {
            for o in engine.process_message(msg) {
                out.extend(format_output_lines(&o));
            }
        }
    }
    out
}

fn px(s: &str) -> Price {
    s.parse().unwrap()
}

#[test]
fn full_input_matches_reference_output() {
    let mut engine = MatchingEngine::new();
    let lines: Vec<&str> = INPUT.lines().collect();
    let actual = replay(&mut engine, &lines);

    let expected: Vec<&str> = EXPECTED.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn individual_scenarios_conserve_quantity() {
    // Split on `#name:` headers and run each block in a fresh engine.
    let mut scenarios: Vec<(String, Vec<&str>)> = Vec::new();
    for line in INPUT.lines() {
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push((name.trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = scenarios.last_mut() {
            body.push(line);
        }
    }
    assert_eq!(scenarios.len(), 7);

    for (name, lines) in scenarios {
        let mut engine = MatchingEngine::new();
        for line in lines {
            let msg = match parse_input_line(line).unwrap() {
                Some(msg) => msg,
                None => continue,
            };
            let requested = match &msg {
                InputMessage::NewOrder(n) => Some(n.quantity),
                _ => None,
            };

            let outputs = engine.process_message(msg);

            if let Some(requested) = requested {
                let traded: u32 = outputs
                    .iter()
                    .filter_map(|o| match o {
                        OutputMessage::Trade(t) => Some(t.quantity),
                        _ => None,
                    })
                    .sum();
                let rested: u32 = outputs
                    .iter()
                    .filter_map(|o| match o {
                        OutputMessage::Rested { remaining_qty, .. } => Some(*remaining_qty),
                        _ => None,
                    })
                    .sum();
                assert_eq!(traded + rested, requested, "scenario {:?}", name);
            }
        }
    }
}

#[test]
fn scenario_book_states() {
    let mut book = OrderBook::new();

    // 1. no match
    let b1 = book.create_order(Side::Buy, px("20.00"), 100).unwrap();
    let s1 = book.create_order(Side::Sell, px("25.00"), 200).unwrap();
    let s1_id = s1.id();
    assert!(book.submit(b1).is_empty());
    assert!(book.submit(s1).is_empty());

    // 2. buy 26.00 x 150 takes 150 from the 25.00 ask
    let b2 = book.create_order(Side::Buy, px("26.00"), 150).unwrap();
    let b2_id = b2.id();
    let trades = book.submit(b2);
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, px("25.00"));
    assert_eq!(trades[0].maker_order_id, s1_id);
    assert_eq!(book.get(s1_id).map(|o| o.remaining_qty()), Some(50));
    assert!(!book.contains(b2_id));

    // 3. sell 22.00 does not reach the 20.00 bid
    let s2 = book.create_order(Side::Sell, px("22.00"), 60).unwrap();
    assert!(book.submit(s2).is_empty());
    assert_eq!(book.best_ask_price(), Some(px("22.00")));
    assert_eq!(book.best_bid_price(), Some(px("20.00")));

    // 4. the filled buy was never resident
    assert!(book.cancel(b2_id).is_none());
    assert!(book.cancel(OrderId(10_000)).is_none());

    // A cancelled order stays out even if handed back.
    let resting = book.list_resting();
    let first_bid = resting[0].id();
    let removed = book.cancel(first_bid).unwrap();
    assert!(book.submit(removed).is_empty());
    assert!(!book.contains(first_bid));
}
