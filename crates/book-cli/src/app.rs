//! Top-level wiring.
//!
//! - Builds the book (optionally seeded).
//! - Spawns the single engine task that owns it.
//! - Runs the line session against the given input/output.
//! - Waits for the engine task to drain before returning.

use anyhow::{Context, Result};
use book_core::{MatchingEngine, OrderBook};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::engine_task;
use crate::seed;
use crate::session::{self, SessionOptions};
use crate::types::{EngineHandle, EngineRx, EngineTx, SessionStats};

/// Run one session with the given configuration.
pub async fn run<R, W>(config: &Config, input: R, output: &mut W) -> Result<SessionStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    config.validate()?;

    let book = if config.seed_demo {
        let book = seed::seeded_book(config.first_order_id).context("seeding demo orders")?;
        info!(resting = book.len(), "seeded demo orders");
        book
    } else {
        OrderBook::with_first_order_id(config.first_order_id)
    };

    // Channel from session -> engine task.
    let (engine_tx, engine_rx): (EngineTx, EngineRx) = mpsc::channel(config.channel_capacity);

    // Spawn the central engine task.
    let engine_join = tokio::spawn(engine_task::run_engine_loop(
        engine_rx,
        MatchingEngine::with_book(book),
    ));

    let handle = EngineHandle::new(engine_tx);
    let options = SessionOptions {
        echo_best_prices: config.echo_best_prices,
    };
    let result = session::run_session(BufReader::new(input), output, &handle, options).await;

    // Dropping the last sender lets the engine loop finish.
    drop(handle);
    let engine = engine_join.await.context("engine task panicked")?;
    info!(resting = engine.book().len(), "session finished");

    result
}
