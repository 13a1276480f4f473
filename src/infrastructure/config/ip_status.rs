//! Whitelist/blacklist gate configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::gate::GateSettings;

/// `[ip_status]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IpStatusConfig {
    pub min_whitelist_count: usize,
    /// Lenient mode: an empty whitelist idles instead of refusing to start.
    pub allow_start_when_empty: bool,
    pub whitelist_monitoring: bool,
    /// Seconds.
    pub whitelist_monitoring_interval: u64,
}

impl IpStatusConfig {
    #[must_use]
    pub fn monitoring_interval(&self) -> Duration {
        Duration::from_secs(self.whitelist_monitoring_interval)
    }
}

impl Default for IpStatusConfig {
    fn default() -> Self {
        Self {
            min_whitelist_count: 1,
            allow_start_when_empty: true,
            whitelist_monitoring: true,
            whitelist_monitoring_interval: 60,
        }
    }
}

impl From<&IpStatusConfig> for GateSettings {
    fn from(config: &IpStatusConfig) -> Self {
        Self {
            min_whitelist_count: config.min_whitelist_count,
            allow_start_when_empty: config.allow_start_when_empty,
            whitelist_monitoring: config.whitelist_monitoring,
            monitoring_interval: config.monitoring_interval(),
        }
    }
}
