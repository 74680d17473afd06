//! Process-wide settings, read once at startup from the environment
//! (and a `.env` file when present).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::guard_core::DEFAULT_API_BASE;

pub static DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Key for the completion API
    pub api_key: String,
    pub api_base: String,
    pub listen_addr: SocketAddr,
    /// Host and port the browser uses to reach the LiveView websocket
    pub reachable_addr: String,
    /// Deadline for a single completion call
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("XAI_API_KEY").context("XAI_API_KEY is not set")?;

        let api_base = get("XAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        let listen_addr = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("LISTEN_ADDR is not a socket address: {listen_addr}"))?;

        let reachable_addr = get("REACHABLE_ADDR")
            .unwrap_or_else(|| format!("localhost:{}", listen_addr.port()));

        let timeout_secs = match get("GUARD_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("GUARD_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("GUARD_TIMEOUT_SECS must be positive");
        }

        let config = Config {
            api_key,
            api_base,
            listen_addr,
            reachable_addr,
            timeout: Duration::from_secs(timeout_secs),
        };
        tracing::debug!(
            api_base = %config.api_base,
            listen_addr = %config.listen_addr,
            reachable_addr = %config.reachable_addr,
            timeout = ?config.timeout,
            "config loaded"
        );
        Ok(config)
    }
}
