//! Comma-separated text codec.
//!
//! Input format (lines -> `InputMessage`):
//!
//! - New order:
//!   `N, side(buy|sell|b|s), price(decimal), qty(int)`
//!
//! - Cancel:
//!   `C, orderId(int)`
//!
//! - Best prices:
//!   `P`
//!
//! - List resting orders:
//!   `L`
//!
//! - Flush:
//!   `F`
//!
//! Output format (`OutputMessage` -> line):
//!
//! - Ack:               `A, orderId, side, price, qty`
//! - Ignored (qty 0):   `X, orderId`
//! - Rejected:          `E, reason`
//! - Trade:             `T, takerId, makerId, buyId, sellId, price, qty`
//! - Rested:            `R, orderId, remaining`
//! - CancelAck:         `C, orderId, found|not-found`
//! - TopOfBook:         `B, side(B/S), price, totalQuantity`
//! - TopOfBook (empty): `B, side(B/S), -, -`
//! - Best prices:       `P, bid|-, ask|-`
//! - Resting order:     `O, orderId, side, price, remaining` (one per order,
//!   or `O, -` for an empty book)

use std::num::ParseIntError;

use book_core::{
    BookError, Cancel, InputMessage, NewOrder, Order, OrderId, OutputMessage, Price, Quantity,
    Side,
};
use thiserror::Error;

/// Why an input line could not be turned into a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("command {command} takes {expected} field(s), got {found}")]
    FieldCount {
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("invalid order id: {0:?}")]
    InvalidOrderId(String),

    #[error(transparent)]
    Book(#[from] BookError),
}

/// Parse a single line into an `InputMessage`.
///
/// Returns `Ok(None)` for blank lines or comments (starting with `#`).
pub fn parse_input_line(line: &str) -> Result<Option<InputMessage>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = split_and_trim(trimmed, ',');

    let msg_type = match tokens[0].as_str() {
        t if t.len() == 1 => t.chars().next().unwrap_or('\0').to_ascii_uppercase(),
        other => return Err(ProtocolError::UnknownCommand(other.to_string())),
    };

    let msg = match msg_type {
        'N' => parse_new_order(&tokens)?,
        'C' => parse_cancel(&tokens)?,
        'P' => {
            expect_fields('P', &tokens, 1)?;
            InputMessage::QueryBestPrices
        }
        'L' => {
            expect_fields('L', &tokens, 1)?;
            InputMessage::ListResting
        }
        'F' => {
            expect_fields('F', &tokens, 1)?;
            InputMessage::Flush
        }
        _ => return Err(ProtocolError::UnknownCommand(tokens[0].clone())),
    };

    Ok(Some(msg))
}

fn parse_new_order(tokens: &[String]) -> Result<InputMessage, ProtocolError> {
    // N, side, price, qty
    expect_fields('N', tokens, 4)?;

    let side: Side = tokens[1].parse()?;
    let price: Price = tokens[2].parse()?;
    let quantity = parse_quantity(&tokens[3])?;

    Ok(InputMessage::NewOrder(NewOrder {
        side,
        price,
        quantity,
    }))
}

fn parse_cancel(tokens: &[String]) -> Result<InputMessage, ProtocolError> {
    // C, orderId
    expect_fields('C', tokens, 2)?;

    let id = tokens[1]
        .parse::<u64>()
        .map_err(|_| ProtocolError::InvalidOrderId(tokens[1].clone()))?;

    Ok(InputMessage::Cancel(Cancel {
        order_id: OrderId(id),
    }))
}

/// Format an `OutputMessage` as one or more lines.
///
/// Only `RestingOrders` spans several lines.
pub fn format_output_lines(msg: &OutputMessage) -> Vec<String> {
    match msg {
        OutputMessage::RestingOrders(orders) if orders.is_empty() => vec!["O, -".to_string()],
        OutputMessage::RestingOrders(orders) => orders.iter().map(format_resting).collect(),
        other => vec![format_output(other)],
    }
}

/// Format an `OutputMessage` as a single line.
///
/// `RestingOrders` lines are joined with `\n`.
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::Ack(a) => format!(
            "A, {}, {}, {}, {}",
            a.order_id, a.side, a.price, a.quantity
        ),
        OutputMessage::Ignored { order_id } => format!("X, {}", order_id),
        OutputMessage::Rejected(err) => format!("E, {}", err),
        OutputMessage::Trade(t) => format!(
            "T, {}, {}, {}, {}, {}, {}",
            t.taker_order_id,
            t.maker_order_id,
            t.buy_order_id(),
            t.sell_order_id(),
            t.price,
            t.quantity
        ),
        OutputMessage::Rested {
            order_id,
            remaining_qty,
        } => format!("R, {}, {}", order_id, remaining_qty),
        OutputMessage::CancelAck(c) => format!(
            "C, {}, {}",
            c.order_id,
            if c.found { "found" } else { "not-found" }
        ),
        OutputMessage::TopOfBook { side, level } => match level {
            Some(l) => format!("B, {}, {}, {}", side.as_char(), l.price, l.quantity),
            None => format!("B, {}, -, -", side.as_char()),
        },
        OutputMessage::BestPrices(best) => {
            format!("P, {}, {}", price_or_dash(best.bid), price_or_dash(best.ask))
        }
        OutputMessage::RestingOrders(_) => format_output_lines(msg).join("\n"),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn format_resting(order: &Order) -> String {
    format!(
        "O, {}, {}, {}, {}",
        order.id(),
        order.side(),
        order.price(),
        order.remaining_qty()
    )
}

fn price_or_dash(price: Option<Price>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

fn expect_fields(command: char, tokens: &[String], expected: usize) -> Result<(), ProtocolError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::FieldCount {
            command,
            expected,
            found: tokens.len(),
        })
    }
}

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn parse_quantity(s: &str) -> Result<Quantity, ProtocolError> {
    parse_u32(s).map_err(|_| BookError::InvalidQuantity(s.to_string()).into())
}

fn parse_u32(s: &str) -> Result<u32, ParseIntError> {
    s.parse::<u32>()
}
