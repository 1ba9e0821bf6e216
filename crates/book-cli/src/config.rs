//! Configuration for the order book driver.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. environment variables:
//!    - `BOOK_FIRST_ORDER_ID`   (default: 1)
//!    - `BOOK_SEED_DEMO`        (default: false)
//!    - `BOOK_ECHO_BEST`        (default: false)
//!    - `BOOK_CHANNEL_CAPACITY` (default: 1024)
//!    - `BOOK_LOG`              (default: "info")
//! 4. command-line flags (applied by `main`).

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// First id the book mints.
    pub first_order_id: u64,

    /// Pre-load the demo orders before reading input.
    pub seed_demo: bool,

    /// Print best prices after every new order or cancel.
    pub echo_best_prices: bool,

    /// Bound of the request queue into the engine task.
    pub channel_capacity: usize,

    /// `tracing` filter directive, e.g. `"info"` or `"book_cli=debug"`.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            first_order_id: 1,
            seed_demo: false,
            echo_best_prices: false,
            channel_capacity: 1024,
            log: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Config::from_toml_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Config::default()),
        }
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay the `BOOK_*` environment variables.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| env::var(key).ok())
    }

    /// Overlay variables from an arbitrary lookup.
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.first_order_id = read_var_or(&lookup, "BOOK_FIRST_ORDER_ID", self.first_order_id)?;
        self.seed_demo = read_var_or(&lookup, "BOOK_SEED_DEMO", self.seed_demo)?;
        self.echo_best_prices = read_var_or(&lookup, "BOOK_ECHO_BEST", self.echo_best_prices)?;
        self.channel_capacity =
            read_var_or(&lookup, "BOOK_CHANNEL_CAPACITY", self.channel_capacity)?;
        if let Some(log) = lookup("BOOK_LOG") {
            self.log = log;
        }
        Ok(self)
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            bail!("channel_capacity must be at least 1");
        }
        // u64::MAX is never minted, so that start leaves no ids at all.
        if self.first_order_id == u64::MAX {
            bail!("first_order_id must be below {}", u64::MAX);
        }
        Ok(())
    }
}

fn read_var_or<F, T>(lookup: &F, key: &str, current: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value {:?} for {}", val, key)),
        None => Ok(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = Config::from_toml_str("first_order_id = 6\nseed_demo = true\n").unwrap();
        assert_eq!(config.first_order_id, 6);
        assert!(config.seed_demo);
        assert_eq!(config.channel_capacity, 1024);
        assert_eq!(config.log, "info");
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(Config::from_toml_str("port = 9000\n").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let vars: HashMap<&str, &str> = [("BOOK_FIRST_ORDER_ID", "100"), ("BOOK_LOG", "debug")]
            .into_iter()
            .collect();
        let config = Config::default()
            .with_vars(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.first_order_id, 100);
        assert_eq!(config.log, "debug");
        assert!(!config.echo_best_prices);
    }

    #[test]
    fn env_reports_bad_values() {
        let err = Config::default()
            .with_vars(|k| (k == "BOOK_SEED_DEMO").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("BOOK_SEED_DEMO"));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let config = Config {
            channel_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn first_order_id_must_leave_room() {
        let config = Config {
            first_order_id: u64::MAX,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            first_order_id: u64::MAX - 1,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
