//! Asset liveness cache

use outage_api::{AssetEvent, Event, MetricEvent};
use outage_config::DEFAULT_ASSET_EXPIRATION_SECS;
use outage_util::{format_epoch_secs, AssetName, Clock, SystemClock};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{debug, info};

use crate::ExpirationRecord;

/// What `AssetCache::put` did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// Metric applied to a tracked asset
    Refreshed { name: AssetName },

    /// Metric stamped after `now`; its TTL was applied, its time dropped
    FutureTimestamp { name: AssetName, time: u64, now: u64 },

    /// Metric for an asset that is not tracked
    Untracked,

    /// New asset is now tracked
    Tracked { name: AssetName },

    /// Asset was already tracked; the notification was dropped
    AlreadyTracked { name: AssetName },

    /// Delete or retire notification
    Removed { name: AssetName, existed: bool },

    /// Asset kind whose liveness is not tracked
    Ignored,
}

impl PutOutcome {
    pub fn asset(&self) -> Option<&AssetName> {
        match self {
            PutOutcome::Refreshed { name }
            | PutOutcome::FutureTimestamp { name, .. }
            | PutOutcome::Tracked { name }
            | PutOutcome::AlreadyTracked { name }
            | PutOutcome::Removed { name, .. } => Some(name),
            PutOutcome::Untracked | PutOutcome::Ignored => None,
        }
    }
}

/// In-memory map from asset name to its expiration record.
///
/// Not an asset registry: metrics only affect assets that were first
/// announced by an asset notification of a tracked kind. All access must be
/// serialized by the owner; there is no internal locking.
pub struct AssetCache {
    assets: HashMap<AssetName, ExpirationRecord>,
    default_expiry_secs: u64,
    verbose: bool,
    clock: Arc<dyn Clock>,
}

impl AssetCache {
    /// Create an empty cache on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            assets: HashMap::new(),
            default_expiry_secs: DEFAULT_ASSET_EXPIRATION_SECS,
            verbose: false,
            clock,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// TTL in seconds given to newly tracked assets
    pub fn default_expiry(&self) -> u64 {
        self.default_expiry_secs
    }

    /// Change the TTL for assets tracked from now on.
    /// Records already in the cache keep their TTL.
    pub fn set_default_expiry(&mut self, expiry_secs: u64) {
        self.default_expiry_secs = expiry_secs;
    }

    /// Ingest a decoded event, taking ownership of it
    pub fn put(&mut self, event: Event) -> PutOutcome {
        match event {
            Event::Metric(metric) => self.put_metric(metric),
            Event::Asset(asset) => self.put_asset(asset),
        }
    }

    fn put_metric(&mut self, metric: MetricEvent) -> PutOutcome {
        let Some(record) = self.assets.get_mut(metric.source.as_str()) else {
            return PutOutcome::Untracked;
        };

        record.update_ttl(metric.ttl);
        if self.verbose {
            debug!(asset = %metric.source, ttl_secs = record.ttl_secs(), "TTL updated");
        }

        let now = self.clock.now_secs();
        let time = metric.time_or(now);
        if time > now {
            info!(
                asset = %metric.source,
                quantity = %metric.quantity,
                time,
                now,
                "Metric from the future, ignoring its timestamp"
            );
            return PutOutcome::FutureTimestamp {
                name: metric.source,
                time,
                now,
            };
        }

        record.update_last_seen(time);
        if self.verbose {
            debug!(
                asset = %metric.source,
                last_seen_secs = record.last_seen_secs(),
                expires_at = record.expiration_instant(),
                "Last seen updated"
            );
        }

        PutOutcome::Refreshed {
            name: metric.source,
        }
    }

    fn put_asset(&mut self, asset: AssetEvent) -> PutOutcome {
        if self.verbose {
            debug!(asset = %asset.name, operation = %asset.operation, "Asset notification");
        }

        if asset.is_removal() {
            let existed = self.delete(asset.name.as_str());
            return PutOutcome::Removed {
                name: asset.name,
                existed,
            };
        }

        if !asset.is_tracked_kind() {
            return PutOutcome::Ignored;
        }

        match self.assets.entry(asset.name.clone()) {
            // The first notification wins; later ones do not refresh the snapshot
            Entry::Occupied(_) => PutOutcome::AlreadyTracked { name: asset.name },
            Entry::Vacant(slot) => {
                let now = self.clock.now_secs();
                let name = asset.name.clone();
                let mut record = ExpirationRecord::new(self.default_expiry_secs, asset);
                record.update_last_seen(now);

                if self.verbose {
                    debug!(
                        asset = %name,
                        now,
                        expires_at = %format_epoch_secs(record.expiration_instant()),
                        "Asset added"
                    );
                }

                slot.insert(record);
                PutOutcome::Tracked { name }
            }
        }
    }

    /// Stop tracking an asset. Returns whether it was tracked.
    pub fn delete(&mut self, name: &str) -> bool {
        let existed = self.assets.remove(name).is_some();
        if existed && self.verbose {
            debug!(asset = %name, "Asset removed");
        }
        existed
    }

    /// Names of the sensors attached to `port` of device `parent_name`.
    ///
    /// Order is unspecified.
    pub fn get_sensors(&self, port: &str, parent_name: &str) -> Vec<AssetName> {
        self.assets
            .values()
            .map(ExpirationRecord::snapshot)
            .filter(|snapshot| snapshot.port() == port && snapshot.parent_name(1) == parent_name)
            .map(|snapshot| snapshot.name.clone())
            .collect()
    }

    /// Names of the assets whose expiration instant has passed.
    ///
    /// All records are judged against a single `now`. Order is unspecified.
    pub fn get_dead(&self) -> Vec<AssetName> {
        let now = self.clock.now_secs();
        if self.verbose {
            debug!(now, "Evaluating dead assets");
        }

        self.assets
            .iter()
            .filter(|(name, record)| {
                if self.verbose {
                    debug!(
                        asset = %name,
                        ttl_secs = record.ttl_secs(),
                        expires_at = record.expiration_instant(),
                        "Checking asset"
                    );
                }
                record.is_expired(now)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Expiration instant of a tracked asset
    pub fn expiration_of(&self, name: &str) -> Option<u64> {
        self.assets.get(name).map(ExpirationRecord::expiration_instant)
    }

    pub fn record(&self, name: &str) -> Option<&ExpirationRecord> {
        self.assets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Current time as seen by this cache
    pub fn now_secs(&self) -> u64 {
        self.clock.now_secs()
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}
