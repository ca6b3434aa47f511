//! Shared utilities for the outage agent
//!
//! This crate provides:
//! - The asset identifier type (AssetName)
//! - Clock abstraction (system clock, manual clock for tests)
//! - Error types
//! - Default paths for the configuration file

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
