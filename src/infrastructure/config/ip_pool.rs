//! Local IP pool configuration.

use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionStrategy;

/// `[local_ip_pool]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalIpPoolConfig {
    /// IPv4 addresses to use. Empty means auto-detect.
    pub ips: Vec<String>,
    pub selection_strategy: SelectionStrategy,
    pub health_check_enabled: bool,
    /// Seconds.
    pub health_check_interval: u64,
    /// Seconds.
    pub health_check_timeout: u64,
    pub max_failures: u32,
    /// Seconds.
    pub recovery_check_interval: u64,
}

impl Default for LocalIpPoolConfig {
    fn default() -> Self {
        Self {
            ips: Vec::new(),
            selection_strategy: SelectionStrategy::RoundRobin,
            health_check_enabled: true,
            health_check_interval: 60,
            health_check_timeout: 5,
            max_failures: 3,
            recovery_check_interval: 300,
        }
    }
}
