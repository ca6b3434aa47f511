//! Per-asset expiration record

use outage_api::AssetEvent;

/// Liveness state of one tracked asset
#[derive(Debug, Clone)]
pub struct ExpirationRecord {
    /// Smallest TTL advertised by any metric of this asset, in seconds
    ttl_secs: u64,

    /// Largest accepted observation time, in epoch seconds
    last_seen_secs: u64,

    /// Asset notification that started tracking, used for topology queries
    snapshot: AssetEvent,
}

impl ExpirationRecord {
    /// Create a record that takes ownership of the asset notification
    pub fn new(default_ttl_secs: u64, snapshot: AssetEvent) -> Self {
        Self {
            ttl_secs: default_ttl_secs,
            last_seen_secs: 0,
            snapshot,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn last_seen_secs(&self) -> u64 {
        self.last_seen_secs
    }

    pub fn snapshot(&self) -> &AssetEvent {
        &self.snapshot
    }

    /// Move the last-seen time forward, never backward.
    ///
    /// Metrics averaged over long windows carry a `time` far in the past
    /// (a 24h average arriving at 03:33 is stamped 00:00). Accepting it
    /// would pull the expiration instant behind `now` and raise a false
    /// outage.
    pub fn update_last_seen(&mut self, candidate_secs: u64) {
        if candidate_secs > self.last_seen_secs {
            self.last_seen_secs = candidate_secs;
        }
    }

    /// Keep the tightest TTL any metric stream has committed to.
    pub fn update_ttl(&mut self, candidate_secs: u64) {
        if candidate_secs < self.ttl_secs {
            self.ttl_secs = candidate_secs;
        }
    }

    /// Instant after which the asset counts as not responding.
    ///
    /// Two TTLs are allowed to pass before that, to absorb reporting jitter.
    pub fn expiration_instant(&self) -> u64 {
        self.last_seen_secs
            .saturating_add(self.ttl_secs.saturating_mul(2))
    }

    pub fn is_expired(&self, now_secs: u64) -> bool {
        self.expiration_instant() <= now_secs
    }
}
