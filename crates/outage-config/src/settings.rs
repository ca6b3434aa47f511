//! Validated agent configuration

use crate::schema::RawConfig;
use std::time::Duration;

/// Polling window the alerting latency is derived from
pub const BASELINE_POLL_WINDOW_SECS: u64 = 15 * 60;

/// Default TTL for newly tracked assets.
///
/// Assets are declared dead after two TTLs, so halving the poll window
/// makes the first alert arrive no later than one full window.
pub const DEFAULT_ASSET_EXPIRATION_SECS: u64 = BASELINE_POLL_WINDOW_SECS / 2;

/// Default period between dead-set evaluations
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Validated configuration ready for use by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// TTL in seconds assigned to assets tracked from now on
    pub default_expiry_secs: u64,

    /// Period between dead-set evaluations
    pub check_interval: Duration,

    /// Emit per-update cache diagnostics
    pub verbose: bool,
}

impl AgentConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let agent = raw.agent;
        Self {
            default_expiry_secs: agent
                .default_expiry_seconds
                .unwrap_or(DEFAULT_ASSET_EXPIRATION_SECS),
            check_interval: agent
                .check_interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CHECK_INTERVAL),
            verbose: agent.verbose,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_expiry_secs: DEFAULT_ASSET_EXPIRATION_SECS,
            check_interval: DEFAULT_CHECK_INTERVAL,
            verbose: false,
        }
    }
}
