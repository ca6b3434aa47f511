//! Outage monitor: turns dead-set changes into alert events

use outage_api::Event;
use outage_config::AgentConfig;
use outage_util::{AssetName, Clock};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{AssetCache, CoreEvent, PutOutcome};

/// Owns the asset cache and remembers which assets currently have an
/// outage alert, so each transition is reported exactly once.
pub struct OutageMonitor {
    cache: AssetCache,
    active_outages: HashSet<AssetName>,
}

impl OutageMonitor {
    /// Create a new monitor
    pub fn new(config: &AgentConfig, clock: Arc<dyn Clock>) -> Self {
        let mut cache = AssetCache::with_clock(clock);
        cache.set_default_expiry(config.default_expiry_secs);
        cache.set_verbose(config.verbose);

        info!(
            default_expiry_secs = config.default_expiry_secs,
            verbose = config.verbose,
            "Outage monitor initialized"
        );

        Self {
            cache,
            active_outages: HashSet::new(),
        }
    }

    /// Feed a decoded event into the cache
    pub fn handle_event(&mut self, event: Event) -> PutOutcome {
        self.cache.put(event)
    }

    /// Evaluate the dead set and report what changed since the last tick
    pub fn tick(&mut self) -> Vec<CoreEvent> {
        let mut dead = self.cache.get_dead();
        dead.sort();

        let mut recovered: Vec<AssetName> = {
            let dead_set: HashSet<&AssetName> = dead.iter().collect();
            self.active_outages
                .iter()
                .filter(|asset| !dead_set.contains(asset))
                .cloned()
                .collect()
        };
        recovered.sort();

        let mut events = Vec::new();

        for asset in recovered {
            self.active_outages.remove(&asset);
            info!(asset = %asset, tracked = self.cache.contains(asset.as_str()), "Outage resolved");
            events.push(CoreEvent::OutageResolved { asset });
        }

        for asset in dead {
            if self.active_outages.contains(&asset) {
                continue;
            }

            let expired_at = self.cache.expiration_of(asset.as_str()).unwrap_or_default();
            warn!(asset = %asset, expired_at, "Asset is not responding");

            self.active_outages.insert(asset.clone());
            events.push(CoreEvent::OutageRaised { asset, expired_at });
        }

        events
    }

    /// Assets with an outage alert currently raised
    pub fn active_outages(&self) -> &HashSet<AssetName> {
        &self.active_outages
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut AssetCache {
        &mut self.cache
    }
}
