use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::JustifyStrategy;

const DEFAULT_DATABASE_URL: &str = "sqlite://personnel.db?mode=rwc";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` serves a local file database.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// How often visits from previous days are purged.
    pub visit_cleanup_interval: Duration,
    pub justify_strategy: JustifyStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let cleanup_secs = env_or("VISIT_CLEANUP_INTERVAL_SECS", "3600")
            .parse::<u64>()
            .context("VISIT_CLEANUP_INTERVAL_SECS must be a whole number of seconds")?;
        if cleanup_secs == 0 {
            anyhow::bail!("VISIT_CLEANUP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            port: env_or("PORT", "3002")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            visit_cleanup_interval: Duration::from_secs(cleanup_secs),
            justify_strategy: env_or("JUSTIFY_STRATEGY", "exact")
                .parse::<JustifyStrategy>()
                .map_err(anyhow::Error::msg)
                .context("JUSTIFY_STRATEGY is invalid")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
