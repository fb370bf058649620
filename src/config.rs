//! Environment configuration.
//!
//! Loaded once at startup; `.env` support comes from dotenvy in `main`.

use std::env;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_TTL_MINUTES: u64 = 12 * 60;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL of the external booking backend
    pub api_base_url: String,
    /// How long a signed-in session stays valid
    pub session_ttl: Duration,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let bind_addr = var_or("STUDIOBOOK_BIND", DEFAULT_BIND_ADDR);
        let api_base_url =
            env::var("BOOKING_API_URL").context("BOOKING_API_URL must be set")?;

        let session_ttl_minutes = match env::var("SESSION_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("SESSION_TTL_MINUTES must be a number of minutes")?,
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            bind_addr,
            api_base_url,
            session_ttl: Duration::from_secs(session_ttl_minutes * 60),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}
