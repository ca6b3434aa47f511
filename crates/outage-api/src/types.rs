//! Decoded inbound events

use outage_util::AssetName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Asset attribute holding the asset type (e.g. "device")
pub const ATTR_TYPE: &str = "type";
/// Asset attribute holding the device subtype (e.g. "ups")
pub const ATTR_SUBTYPE: &str = "subtype";
/// Asset attribute holding the lifecycle status (e.g. "active", "retired")
pub const ATTR_STATUS: &str = "status";
/// Extended asset attribute holding the port a sensor is plugged into
pub const ATTR_PORT: &str = "port";
/// Prefix of the parent chain attributes: `parent_name.1` is the direct parent
pub const ATTR_PARENT_NAME_PREFIX: &str = "parent_name.";

pub const ASSET_TYPE_DEVICE: &str = "device";
pub const STATUS_RETIRED: &str = "retired";

/// Device subtypes whose liveness is tracked
pub const TRACKED_SUBTYPES: [&str; 3] = ["ups", "epdu", "sensor"];

/// A decoded message handed to the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Metric(MetricEvent),
    Asset(AssetEvent),
}

impl From<MetricEvent> for Event {
    fn from(metric: MetricEvent) -> Self {
        Event::Metric(metric)
    }
}

impl From<AssetEvent> for Event {
    fn from(asset: AssetEvent) -> Self {
        Event::Asset(asset)
    }
}

/// A single metric observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEvent {
    /// Asset the metric was measured on
    pub source: AssetName,
    /// Metric type, e.g. "realpower.default"
    pub quantity: String,
    pub value: String,
    pub unit: String,
    /// Seconds until the next observation of this metric is expected
    pub ttl: u64,
    /// Declared observation time in epoch seconds, if the producer set one
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub aux: BTreeMap<String, String>,
}

impl MetricEvent {
    pub fn new(
        source: impl Into<AssetName>,
        quantity: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
        ttl: u64,
    ) -> Self {
        Self {
            source: source.into(),
            quantity: quantity.into(),
            value: value.into(),
            unit: unit.into(),
            ttl,
            time: None,
            aux: BTreeMap::new(),
        }
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aux.insert(key.into(), value.into());
        self
    }

    /// Observation time, falling back to `default` when none was declared
    pub fn time_or(&self, default: u64) -> u64 {
        self.time.unwrap_or(default)
    }
}

/// Operation carried by an asset notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetOperation {
    Create,
    Update,
    Delete,
    Retire,
    Inventory,
    Other(String),
}

impl AssetOperation {
    pub fn as_str(&self) -> &str {
        match self {
            AssetOperation::Create => "create",
            AssetOperation::Update => "update",
            AssetOperation::Delete => "delete",
            AssetOperation::Retire => "retire",
            AssetOperation::Inventory => "inventory",
            AssetOperation::Other(op) => op,
        }
    }
}

impl From<String> for AssetOperation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "create" => AssetOperation::Create,
            "update" => AssetOperation::Update,
            "delete" => AssetOperation::Delete,
            "retire" => AssetOperation::Retire,
            "inventory" => AssetOperation::Inventory,
            _ => AssetOperation::Other(s),
        }
    }
}

impl From<&str> for AssetOperation {
    fn from(s: &str) -> Self {
        AssetOperation::from(s.to_string())
    }
}

impl From<AssetOperation> for String {
    fn from(op: AssetOperation) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for AssetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset lifecycle notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEvent {
    pub name: AssetName,
    pub operation: AssetOperation,
    /// Core attributes: type, subtype, status, parent chain
    #[serde(default)]
    pub aux: BTreeMap<String, String>,
    /// Extended attributes, e.g. the port of a sensor
    #[serde(default)]
    pub ext: BTreeMap<String, String>,
}

impl AssetEvent {
    pub fn new(name: impl Into<AssetName>, operation: impl Into<AssetOperation>) -> Self {
        Self {
            name: name.into(),
            operation: operation.into(),
            aux: BTreeMap::new(),
            ext: BTreeMap::new(),
        }
    }

    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.aux.insert(key.into(), value.into());
        self
    }

    pub fn with_ext(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ext.insert(key.into(), value.into());
        self
    }

    /// Aux attribute, or "" when absent
    pub fn aux_str(&self, key: &str) -> &str {
        self.aux.get(key).map(String::as_str).unwrap_or("")
    }

    /// Ext attribute, or "" when absent
    pub fn ext_str(&self, key: &str) -> &str {
        self.ext.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn asset_type(&self) -> &str {
        self.aux_str(ATTR_TYPE)
    }

    pub fn subtype(&self) -> &str {
        self.aux_str(ATTR_SUBTYPE)
    }

    pub fn status(&self) -> &str {
        self.aux_str(ATTR_STATUS)
    }

    pub fn port(&self) -> &str {
        self.ext_str(ATTR_PORT)
    }

    /// Name of the parent `level` steps up the topology (1 = direct parent)
    pub fn parent_name(&self, level: u32) -> &str {
        self.aux
            .get(&format!("{}{}", ATTR_PARENT_NAME_PREFIX, level))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether this notification removes the asset from monitoring
    pub fn is_removal(&self) -> bool {
        self.operation == AssetOperation::Delete || self.status() == STATUS_RETIRED
    }

    /// Whether this is a device whose liveness the agent tracks
    pub fn is_tracked_kind(&self) -> bool {
        self.asset_type() == ASSET_TYPE_DEVICE && TRACKED_SUBTYPES.contains(&self.subtype())
    }
}
