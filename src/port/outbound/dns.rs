//! Domain DNS monitor port.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ModuleError;

/// Construction parameters for a domain monitor.
///
/// `target_domains` comes from the `[ip_pool_test]` section; every other
/// field comes from `[domaindns]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSpec {
    pub target_domains: Vec<String>,
    pub ipinfo_token: Option<String>,
    /// `None` means the monitor's bundled server list.
    pub dns_server_file: Option<PathBuf>,
    /// Zero means every known server.
    pub max_servers: usize,
    pub dns_servers: Vec<String>,
    pub refresh_interval: Duration,
    pub query_timeout: Duration,
}

/// Background monitor that keeps the resolved addresses of target domains
/// up to date.
pub trait DomainMonitor: Send + Sync {
    /// Begin the background refresh loop. The first refresh runs immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Dns`] if the loop cannot be scheduled.
    fn start(&self) -> Result<(), ModuleError>;

    /// Halt the refresh loop. Resources owned by the monitor are left alone.
    fn stop(&self);

    fn is_running(&self) -> bool;
}

pub trait DomainMonitorFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModuleError::Dns`] if the monitor cannot be constructed.
    fn create(&self, spec: &MonitorSpec) -> Result<Box<dyn DomainMonitor>, ModuleError>;
}
