//! Central engine loop.
//!
//! This task owns the `MatchingEngine` and processes every
//! `EngineRequest` in arrival order, so the book only ever has a single
//! writer. Each request's outputs go back on its own reply channel.

use book_core::{MatchingEngine, OutputMessage};
use tracing::{debug, info, warn};

use crate::types::{EngineRequest, EngineRx};

/// Run the engine processing loop until every sender is dropped.
///
/// Returns the engine so the caller can inspect the final book.
pub async fn run_engine_loop(mut engine_rx: EngineRx, mut engine: MatchingEngine) -> MatchingEngine {
    while let Some(req) = engine_rx.recv().await {
        let EngineRequest { msg, reply } = req;
        debug!(?msg, "processing request");

        let outputs = engine.process_message(msg);
        for out in &outputs {
            log_output(out);
        }

        if reply.send(outputs).is_err() {
            debug!("requester went away before the reply");
        }
    }

    info!(
        resting = engine.book().len(),
        "engine loop shutting down (engine_rx closed)"
    );
    engine
}

fn log_output(out: &OutputMessage) {
    match out {
        OutputMessage::Trade(t) => info!(
            taker = %t.taker_order_id,
            maker = %t.maker_order_id,
            price = %t.price,
            quantity = t.quantity,
            "trade"
        ),
        OutputMessage::Ack(a) => debug!(order_id = %a.order_id, side = %a.side, "order accepted"),
        OutputMessage::Ignored { order_id } => {
            debug!(%order_id, "zero-quantity order ignored")
        }
        OutputMessage::Rejected(err) => warn!(%err, "order rejected"),
        OutputMessage::CancelAck(c) => debug!(order_id = %c.order_id, found = c.found, "cancel"),
        _ => {}
    }
}
