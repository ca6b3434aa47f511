//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Agent settings
    #[serde(default)]
    pub agent: RawAgentConfig,
}

/// Agent-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAgentConfig {
    /// TTL given to newly tracked assets before any metric narrows it
    pub default_expiry_seconds: Option<u64>,

    /// How often the dead set is evaluated
    pub check_interval_seconds: Option<u64>,

    /// Emit per-update cache diagnostics
    #[serde(default)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_agent_table() {
        let toml_str = r#"
            config_version = 1

            [agent]
            default_expiry_seconds = 300
            check_interval_seconds = 5
            verbose = true
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.default_expiry_seconds, Some(300));
        assert_eq!(config.agent.check_interval_seconds, Some(5));
        assert!(config.agent.verbose);
    }

    #[test]
    fn agent_table_is_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.agent.default_expiry_seconds.is_none());
        assert!(!config.agent.verbose);
    }
}
