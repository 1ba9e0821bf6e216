//! Shared types for the driver.
//!
//! This module defines:
//! - `EngineRequest`: a message plus the channel its answer goes back on
//! - channel aliases between the session and the engine task
//! - `EngineHandle`: the only way to reach the engine from outside its task

use anyhow::{anyhow, Context, Result};
use book_core::{InputMessage, OutputMessage};
use tokio::sync::{mpsc, oneshot};

/// Message flowing from the session into the engine task.
#[derive(Debug)]
pub struct EngineRequest {
    pub msg: InputMessage,
    pub reply: oneshot::Sender<Vec<OutputMessage>>,
}

/// Channel from session -> engine task.
pub type EngineTx = mpsc::Sender<EngineRequest>;
pub type EngineRx = mpsc::Receiver<EngineRequest>;

/// Cloneable sender side of the engine task.
///
/// Requests are processed one at a time, in the order they were queued.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: EngineTx,
}

impl EngineHandle {
    pub fn new(tx: EngineTx) -> Self {
        EngineHandle { tx }
    }

    /// Send one request and wait for its outputs.
    pub async fn request(&self, msg: InputMessage) -> Result<Vec<OutputMessage>> {
        let (reply, answer) = oneshot::channel();
        self.tx
            .send(EngineRequest { msg, reply })
            .await
            .map_err(|_| anyhow!("engine task has stopped"))?;
        answer.await.context("engine task dropped the request")
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines that parsed into a message.
    pub commands: u64,
    /// Lines rejected by the parser.
    pub rejected: u64,
    /// Trades reported back to the user.
    pub trades: u64,
}
