//! Lock-protected whitelist/blacklist gate.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::domain::ip_status::IpStatus;
use crate::error::GateError;
use crate::port::inbound::gate::IpStatusGate;

/// Runtime-adjustable gate parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSettings {
    pub min_whitelist_count: usize,
    pub allow_start_when_empty: bool,
    pub whitelist_monitoring: bool,
    pub monitoring_interval: Duration,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            min_whitelist_count: 1,
            allow_start_when_empty: true,
            whitelist_monitoring: true,
            monitoring_interval: Duration::from_secs(60),
        }
    }
}

/// Point-in-time view of the gate, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateSnapshot {
    pub whitelist_count: usize,
    pub blacklist_count: usize,
    pub min_whitelist_count: usize,
    pub allow_start_when_empty: bool,
    pub whitelist_monitoring: bool,
    pub monitoring_interval_secs: u64,
    pub healthy: bool,
}

#[derive(Debug, Default)]
struct GateState {
    whitelist: HashSet<String>,
    blacklist: HashMap<String, String>,
    settings: GateSettings,
}

impl GateState {
    fn health(&self) -> Result<(), GateError> {
        if self.whitelist.is_empty() && !self.settings.allow_start_when_empty {
            return Err(GateError::EmptyWhitelist);
        }
        Ok(())
    }
}

/// Whitelist/blacklist gate shared by crawl workers, the monitor, and the
/// orchestrator.
///
/// All state lives behind one `RwLock`; each operation takes it exactly once,
/// so every call is serializable against every other.
#[derive(Debug, Default)]
pub struct StatusGate {
    state: RwLock<GateState>,
}

impl StatusGate {
    #[must_use]
    pub fn new(settings: GateSettings) -> Self {
        Self {
            state: RwLock::new(GateState {
                settings,
                ..GateState::default()
            }),
        }
    }

    /// Reason recorded for a blacklisted IP.
    #[must_use]
    pub fn blacklist_reason(&self, ip: &str) -> Option<String> {
        self.state.read().blacklist.get(ip).cloned()
    }

    #[must_use]
    pub fn blacklist_count(&self) -> usize {
        self.state.read().blacklist.len()
    }

    #[must_use]
    pub fn settings(&self) -> GateSettings {
        self.state.read().settings
    }

    #[must_use]
    pub fn snapshot(&self) -> GateSnapshot {
        let state = self.state.read();
        GateSnapshot {
            whitelist_count: state.whitelist.len(),
            blacklist_count: state.blacklist.len(),
            min_whitelist_count: state.settings.min_whitelist_count,
            allow_start_when_empty: state.settings.allow_start_when_empty,
            whitelist_monitoring: state.settings.whitelist_monitoring,
            monitoring_interval_secs: state.settings.monitoring_interval.as_secs(),
            healthy: state.health().is_ok(),
        }
    }
}

impl IpStatusGate for StatusGate {
    fn add_to_whitelist(&self, ip: &str) {
        let mut state = self.state.write();
        state.blacklist.remove(ip);
        state.whitelist.insert(ip.to_string());
    }

    fn remove_from_whitelist(&self, ip: &str, reason: &str) {
        let removed = self.state.write().whitelist.remove(ip);
        if removed {
            debug!(ip, reason, "Removed from whitelist");
        }
    }

    fn add_to_blacklist(&self, ip: &str, reason: &str) {
        {
            let mut state = self.state.write();
            state.whitelist.remove(ip);
            state.blacklist.insert(ip.to_string(), reason.to_string());
        }
        debug!(ip, reason, "Blacklisted");
    }

    fn status(&self, ip: &str) -> IpStatus {
        let state = self.state.read();
        if state.whitelist.contains(ip) {
            IpStatus::Whitelisted
        } else if state.blacklist.contains_key(ip) {
            IpStatus::Blacklisted
        } else {
            IpStatus::Unknown
        }
    }

    fn whitelist_ips(&self) -> HashSet<String> {
        self.state.read().whitelist.clone()
    }

    fn whitelist_count(&self) -> usize {
        self.state.read().whitelist.len()
    }

    fn check_system_health(&self) -> Result<(), GateError> {
        self.state.read().health()
    }

    fn set_min_whitelist_count(&self, count: usize) {
        self.state.write().settings.min_whitelist_count = count;
    }

    fn set_allow_start_when_empty(&self, allow: bool) {
        self.state.write().settings.allow_start_when_empty = allow;
    }

    fn set_whitelist_monitoring(&self, enabled: bool) {
        self.state.write().settings.whitelist_monitoring = enabled;
    }

    fn set_whitelist_monitoring_interval(&self, interval: Duration) {
        self.state.write().settings.monitoring_interval = interval;
    }
}
