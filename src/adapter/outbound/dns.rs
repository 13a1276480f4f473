//! Domain monitor backed by the system resolver.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ModuleError;
use crate::port::outbound::dns::{DomainMonitor, DomainMonitorFactory, MonitorSpec};

/// Port used when resolving a bare domain name.
const LOOKUP_PORT: u16 = 443;

#[derive(Debug, Default)]
struct Resolved {
    addresses: HashMap<String, Vec<IpAddr>>,
    last_refresh: Option<DateTime<Utc>>,
}

/// Periodically resolves target domains and keeps the latest addresses.
///
/// Queries go through the operating system resolver; the configured server
/// list is kept for reporting only.
#[derive(Debug)]
pub struct ResolverMonitor {
    domains: Vec<String>,
    servers: Vec<String>,
    ipinfo_token: Option<String>,
    refresh_interval: Duration,
    query_timeout: Duration,
    resolved: Arc<RwLock<Resolved>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ResolverMonitor {
    #[must_use]
    pub fn new(spec: &MonitorSpec, servers: Vec<String>) -> Self {
        Self {
            domains: spec.target_domains.clone(),
            servers,
            ipinfo_token: spec.ipinfo_token.clone(),
            refresh_interval: spec.refresh_interval,
            query_timeout: spec.query_timeout,
            resolved: Arc::new(RwLock::new(Resolved::default())),
            task: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    #[must_use]
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    #[must_use]
    pub fn has_ipinfo_token(&self) -> bool {
        self.ipinfo_token.is_some()
    }

    /// Latest addresses resolved for `domain`.
    #[must_use]
    pub fn addresses(&self, domain: &str) -> Vec<IpAddr> {
        self.resolved
            .read()
            .addresses
            .get(domain)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.resolved.read().last_refresh
    }
}

impl DomainMonitor for ResolverMonitor {
    fn start(&self) -> Result<(), ModuleError> {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Ok(());
        }

        let runtime = Handle::try_current()
            .map_err(|_| ModuleError::Dns("no async runtime to run the monitor on".into()))?;
        *task = Some(runtime.spawn(refresh_loop(
            self.domains.clone(),
            self.refresh_interval,
            self.query_timeout,
            Arc::clone(&self.resolved),
        )));
        Ok(())
    }

    fn stop(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ResolverMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn refresh_loop(
    domains: Vec<String>,
    refresh_interval: Duration,
    query_timeout: Duration,
    resolved: Arc<RwLock<Resolved>>,
) {
    // The first tick completes immediately.
    let mut interval = tokio::time::interval(refresh_interval);

    loop {
        interval.tick().await;
        for domain in &domains {
            let lookup = tokio::net::lookup_host((domain.as_str(), LOOKUP_PORT));
            match tokio::time::timeout(query_timeout, lookup).await {
                Ok(Ok(addrs)) => {
                    let mut ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
                    ips.sort_unstable();
                    ips.dedup();
                    debug!(domain = %domain, count = ips.len(), "Resolved domain");
                    resolved.write().addresses.insert(domain.clone(), ips);
                }
                Ok(Err(e)) => warn!(domain = %domain, error = %e, "DNS lookup failed"),
                Err(_) => warn!(domain = %domain, "DNS lookup timed out"),
            }
        }
        resolved.write().last_refresh = Some(Utc::now());
    }
}

/// Configured servers plus those listed in the optional JSON server file,
/// deduplicated and capped at `max_servers`.
fn known_servers(spec: &MonitorSpec) -> Result<Vec<String>, ModuleError> {
    let mut servers = spec.dns_servers.clone();
    if let Some(path) = &spec.dns_server_file {
        let content = fs::read_to_string(path)
            .map_err(|e| ModuleError::Dns(format!("cannot read {}: {e}", path.display())))?;
        let listed: Vec<String> = serde_json::from_str(&content)
            .map_err(|e| ModuleError::Dns(format!("cannot parse {}: {e}", path.display())))?;
        servers.extend(listed);
    }

    let mut seen = HashSet::new();
    servers.retain(|server| seen.insert(server.clone()));
    if spec.max_servers > 0 {
        servers.truncate(spec.max_servers);
    }
    Ok(servers)
}

/// Builds [`ResolverMonitor`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolverMonitorFactory;

impl DomainMonitorFactory for ResolverMonitorFactory {
    fn create(&self, spec: &MonitorSpec) -> Result<Box<dyn DomainMonitor>, ModuleError> {
        if spec.refresh_interval.is_zero() {
            return Err(ModuleError::Dns("refresh interval must be positive".into()));
        }

        let servers = known_servers(spec)?;
        Ok(Box::new(ResolverMonitor::new(spec, servers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MonitorSpec {
        MonitorSpec {
            target_domains: vec!["localhost".into()],
            ipinfo_token: None,
            dns_server_file: None,
            max_servers: 0,
            dns_servers: vec!["8.8.8.8".into(), "1.1.1.1".into()],
            refresh_interval: Duration::from_secs(300),
            query_timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn start_without_runtime_is_an_error() {
        let monitor = ResolverMonitor::new(&spec(), Vec::new());
        assert!(matches!(monitor.start(), Err(ModuleError::Dns(_))));
        assert!(!monitor.is_running());
    }

    #[tokio::test]
    async fn start_and_stop_toggle_running() {
        let monitor = ResolverMonitor::new(&spec(), Vec::new());
        monitor.start().unwrap();
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn factory_merges_server_file_and_caps_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("servers.json");
        fs::write(&path, r#"["1.1.1.1", "9.9.9.9", "208.67.222.222"]"#).unwrap();

        let mut spec = spec();
        spec.dns_server_file = Some(path);
        spec.max_servers = 3;

        let servers = known_servers(&spec).unwrap();
        assert_eq!(servers, vec!["8.8.8.8", "1.1.1.1", "9.9.9.9"]);

        let monitor = ResolverMonitorFactory.create(&spec).unwrap();
        assert!(!monitor.is_running());
    }

    #[test]
    fn factory_rejects_missing_server_file() {
        let mut spec = spec();
        spec.dns_server_file = Some("/nonexistent/servers.json".into());

        let result = ResolverMonitorFactory.create(&spec);
        assert!(matches!(result, Err(ModuleError::Dns(_))));
    }
}
