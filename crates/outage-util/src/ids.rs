//! Strongly-typed identifiers for the outage agent

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique name of a monitored asset (device or sensor)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetName(String);

impl AssetName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// Lets maps keyed by AssetName be queried with a plain &str.
impl Borrow<str> for AssetName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AssetName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AssetName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn asset_name_equality() {
        let a = AssetName::new("ups-1");
        let b = AssetName::from("ups-1");
        let c = AssetName::from("epdu-1".to_string());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "ups-1");
    }

    #[test]
    fn asset_name_serializes_as_plain_string() {
        let name = AssetName::new("sensor-7");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"sensor-7\"");

        let parsed: AssetName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, name);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(AssetName::new("UPS4"), 1);
        assert_eq!(map.get("UPS4"), Some(&1));
        assert!(map.get("UPS3").is_none());
    }
}
