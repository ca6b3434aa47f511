//! Configuration validation

use crate::schema::RawConfig;
use crate::settings::{AgentConfig, DEFAULT_ASSET_EXPIRATION_SECS, DEFAULT_CHECK_INTERVAL};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default_expiry_seconds must be greater than zero")]
    ZeroDefaultExpiry,

    #[error("check_interval_seconds must be greater than zero")]
    ZeroCheckInterval,

    #[error(
        "check_interval_seconds ({interval}s) exceeds the alert window of 2 x default_expiry_seconds ({window}s)"
    )]
    CheckIntervalTooLong { interval: u64, window: u64 },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let agent = &config.agent;
    check_agent_values(
        agent
            .default_expiry_seconds
            .unwrap_or(DEFAULT_ASSET_EXPIRATION_SECS),
        agent
            .check_interval_seconds
            .unwrap_or(DEFAULT_CHECK_INTERVAL.as_secs()),
    )
}

/// Validate a resolved configuration, e.g. after command-line overrides
pub fn validate_agent_config(config: &AgentConfig) -> Vec<ValidationError> {
    check_agent_values(config.default_expiry_secs, config.check_interval.as_secs())
}

fn check_agent_values(expiry: u64, interval: u64) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if expiry == 0 {
        errors.push(ValidationError::ZeroDefaultExpiry);
    }

    if interval == 0 {
        errors.push(ValidationError::ZeroCheckInterval);
    }

    // Only meaningful when both values are usable
    let window = expiry.saturating_mul(2);
    if expiry > 0 && interval > window {
        errors.push(ValidationError::CheckIntervalTooLong { interval, window });
    }

    errors
}
