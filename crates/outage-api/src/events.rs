//! Alert types emitted by the agent

use chrono::{DateTime, Utc};
use outage_util::AssetName;
use serde::{Deserialize, Serialize};

use crate::API_VERSION;

/// Alert envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub api_version: u32,
    pub timestamp: DateTime<Utc>,
    pub payload: AlertPayload,
}

impl Alert {
    pub fn new(payload: AlertPayload) -> Self {
        Self {
            api_version: API_VERSION,
            timestamp: outage_util::now(),
            payload,
        }
    }

    pub fn asset(&self) -> &AssetName {
        match &self.payload {
            AlertPayload::OutageRaised { asset, .. } => asset,
            AlertPayload::OutageResolved { asset } => asset,
        }
    }
}

/// All alerts the agent can publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertPayload {
    /// Asset stopped reporting
    OutageRaised {
        asset: AssetName,
        /// Epoch seconds at which the asset was due
        expired_at: u64,
    },

    /// Asset reports again, or is no longer monitored
    OutageResolved { asset: AssetName },
}
