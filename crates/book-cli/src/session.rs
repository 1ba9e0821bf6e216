//! Line-oriented session over any async reader/writer pair.
//!
//! Each line is parsed with the text codec and sent to the engine task;
//! the outputs are written back one line each. Parse failures are
//! reported as `E, <reason>` and the session carries on. End of input
//! or a quit command (`Q`, `quit`, `exit`) ends it.

use anyhow::{Context, Result};
use book_core::{InputMessage, OutputMessage};
use book_protocol::{format_output_lines, parse_input_line};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::types::{EngineHandle, SessionStats};

/// Options that change what a session prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Follow every new order and cancel with the best prices.
    pub echo_best_prices: bool,
}

/// Drive the engine from `reader` until EOF or a quit command.
pub async fn run_session<R, W>(
    reader: R,
    writer: &mut W,
    engine: &EngineHandle,
    options: SessionOptions,
) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = SessionStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("reading input")? {
        if is_quit(&line) {
            debug!("quit requested");
            break;
        }

        let msg = match parse_input_line(&line) {
            Ok(Some(msg)) => msg,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = line.trim(), %err, "rejected input line");
                stats.rejected += 1;
                write_line(writer, &format!("E, {}", err)).await?;
                continue;
            }
        };
        stats.commands += 1;

        let changes_book = matches!(msg, InputMessage::NewOrder(_) | InputMessage::Cancel(_));

        let mut outputs = engine.request(msg).await?;
        if changes_book && options.echo_best_prices {
            outputs.extend(engine.request(InputMessage::QueryBestPrices).await?);
        }

        for out in &outputs {
            if let OutputMessage::Trade(_) = out {
                stats.trades += 1;
            }
            for text in format_output_lines(out) {
                write_line(writer, &text).await?;
            }
        }
        writer.flush().await.context("flushing output")?;
    }

    Ok(stats)
}

fn is_quit(line: &str) -> bool {
    let t = line.trim();
    t.eq_ignore_ascii_case("q") || t.eq_ignore_ascii_case("quit") || t.eq_ignore_ascii_case("exit")
}

async fn write_line<W>(writer: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(format!("{}\n", text).as_bytes())
        .await
        .context("writing output")
}
