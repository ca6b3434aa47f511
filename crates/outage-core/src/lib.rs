//! Liveness cache and outage detection for the outage agent
//!
//! This crate contains:
//! - Per-asset expiration records (minimum TTL, last-seen time)
//! - The asset cache fed by decoded metric and asset events
//! - The outage monitor turning dead-set changes into alert events
//!
//! Deadness is never stored: an asset is dead when
//! `last_seen + 2 * ttl <= now` at the moment of the query.

mod cache;
mod events;
mod expiration;
mod monitor;

pub use cache::*;
pub use events::*;
pub use expiration::*;
pub use monitor::*;
