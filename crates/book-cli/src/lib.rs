//! book-cli
//!
//! Interactive driver for the order book: text commands in, text
//! results out, with the book owned by a single engine task.

pub mod app;
pub mod config;
pub mod seed;
pub mod session;
pub mod types;

// internal module, not re-exported
mod engine_task;
