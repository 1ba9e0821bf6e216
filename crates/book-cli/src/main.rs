//! Interactive order book over stdin/stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use book_cli::app;
use book_cli::config::Config;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "order-book")]
#[command(about = "Limit order book with price-time matching, driven by text commands")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First order id the book assigns
    #[arg(long)]
    first_order_id: Option<u64>,

    /// Pre-load the demo orders
    #[arg(long)]
    seed_demo: bool,

    /// Print best prices after every new order or cancel
    #[arg(long)]
    echo_best: bool,

    /// Log filter, e.g. "debug" or "book_cli=trace"
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    /// Defaults < file < environment < flags.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?.with_env()?;

        if let Some(id) = self.first_order_id {
            config.first_order_id = id;
        }
        if self.seed_demo {
            config.seed_demo = true;
        }
        if self.echo_best {
            config.echo_best_prices = true;
        }
        if let Some(log) = &self.log {
            config.log = log.clone();
        }

        Ok(config)
    }
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("bad log filter {:?}", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(&config.log)?;

    info!(
        first_order_id = config.first_order_id,
        seed_demo = config.seed_demo,
        "starting order book session"
    );
    eprintln!("Commands: N,side,price,qty | C,id | P | L | F | Q");

    let mut stdout = tokio::io::stdout();
    let stats = app::run(&config, tokio::io::stdin(), &mut stdout).await?;

    info!(
        commands = stats.commands,
        rejected = stats.rejected,
        trades = stats.trades,
        "exiting"
    );
    Ok(())
}
