//! Protocol types for the outage agent
//!
//! This crate defines the values exchanged with the messaging layer:
//! - Decoded inbound events (metric observations, asset lifecycle notifications)
//! - Attribute keys understood by the agent
//! - Outbound outage alerts
//! - Versioning

mod events;
mod types;

pub use events::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
