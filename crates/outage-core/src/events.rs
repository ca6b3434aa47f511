//! Core events emitted by the monitor

use outage_util::AssetName;

/// Events emitted by the outage monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// Asset missed its expiration instant
    OutageRaised {
        asset: AssetName,
        expired_at: u64,
    },

    /// Previously dead asset reports again or stopped being tracked
    OutageResolved {
        asset: AssetName,
    },
}
