//! Runtime configuration from environment variables.

use std::env;
use std::time::Duration;

/// Configuration for the demo runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// Bound on each confirmation wait.
    pub confirmation_timeout: Duration,

    /// Simulated confirmation latency of the in-memory ledger.
    pub confirmation_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            confirmation_timeout: Duration::from_secs(30),
            confirmation_delay: Duration::from_millis(150),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHAINVOTE_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CHAINVOTE_CONFIRMATION_TIMEOUT_MS`: Confirmation wait bound (default: 30000)
    /// - `CHAINVOTE_CONFIRMATION_DELAY_MS`: Simulated ledger latency (default: 150)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("CHAINVOTE_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            confirmation_timeout: env::var("CHAINVOTE_CONFIRMATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.confirmation_timeout),

            confirmation_delay: env::var("CHAINVOTE_CONFIRMATION_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.confirmation_delay),
        }
    }
}
