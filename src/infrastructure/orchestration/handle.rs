//! Handles owned by the orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::gate::StatusGate;
use crate::error::ModuleError;
use crate::infrastructure::bootstrap::fingerprint::FingerprintProfile;
use crate::port::outbound::certs::{Certificate, CertificateManager};
use crate::port::outbound::conn_pool::{
    DialSettings, QuicPool, TcpPool, TcpPoolFactory, TcpPoolSettings,
};
use crate::port::outbound::dns::DomainMonitor;
use crate::port::outbound::ip_pool::LocalIpPool;
use crate::port::outbound::logger::Logger;

/// Lifecycle phase of a connection pool handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Settings validated; nothing dialed yet.
    Configured,
    /// At least one live pool exists.
    Materialized,
}

impl PoolState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::Materialized => "materialized",
        }
    }
}

/// TCP pool handle: validated settings at boot, one pool per destination once
/// a destination is known.
pub struct TcpPoolHandle {
    settings: TcpPoolSettings,
    pools: Mutex<HashMap<String, Arc<dyn TcpPool>>>,
}

impl std::fmt::Debug for TcpPoolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpPoolHandle")
            .field("settings", &self.settings)
            .field("destinations", &self.destinations())
            .finish()
    }
}

impl TcpPoolHandle {
    #[must_use]
    pub fn configured(settings: TcpPoolSettings) -> Self {
        Self {
            settings,
            pools: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &TcpPoolSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> PoolState {
        if self.pools.lock().is_empty() {
            PoolState::Configured
        } else {
            PoolState::Materialized
        }
    }

    /// Destinations with a live pool, sorted.
    #[must_use]
    pub fn destinations(&self) -> Vec<String> {
        let mut destinations: Vec<String> = self.pools.lock().keys().cloned().collect();
        destinations.sort();
        destinations
    }

    /// Return the pool for `destination`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns the factory's error when the pool cannot be built.
    pub fn materialize(
        &self,
        factory: &dyn TcpPoolFactory,
        destination: &str,
        dial: &DialSettings,
    ) -> Result<Arc<dyn TcpPool>, ModuleError> {
        let mut pools = self.pools.lock();
        if let Some(pool) = pools.get(destination) {
            return Ok(Arc::clone(pool));
        }
        let pool: Arc<dyn TcpPool> = Arc::from(factory.create(destination, &self.settings, dial)?);
        pools.insert(destination.to_string(), Arc::clone(&pool));
        Ok(pool)
    }

    /// Close every materialized pool, attempting all of them.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Pool`] naming each destination that failed.
    pub fn close(&self) -> Result<(), ModuleError> {
        let pools: Vec<(String, Arc<dyn TcpPool>)> = self.pools.lock().drain().collect();
        let failed: Vec<String> = pools
            .into_iter()
            .filter_map(|(destination, pool)| {
                pool.close().err().map(|e| format!("{destination} ({e})"))
            })
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ModuleError::Pool(format!(
                "failed to close: {}",
                failed.join(", ")
            )))
        }
    }
}

/// Certificate manager plus the certificate obtained at boot, if any.
pub struct CertificateHandle {
    pub manager: Box<dyn CertificateManager>,
    pub server_domain: String,
    pub certificate: Option<Certificate>,
}

impl std::fmt::Debug for CertificateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateHandle")
            .field("server_domain", &self.server_domain)
            .field("certificate", &self.certificate)
            .finish_non_exhaustive()
    }
}

/// Everything `initialize` built, one slot per module.
///
/// A slot is filled as soon as its initializer returns, so a failed boot
/// still leaves earlier handles here for `close` to release.
#[derive(Default)]
pub struct ModuleHandles {
    pub(crate) logger: Option<Arc<dyn Logger>>,
    pub(crate) fingerprint: Option<FingerprintProfile>,
    pub(crate) dns_monitor: Option<Box<dyn DomainMonitor>>,
    pub(crate) local_ip_pool: Option<Box<dyn LocalIpPool>>,
    pub(crate) certificates: Option<CertificateHandle>,
    pub(crate) gate: Option<Arc<StatusGate>>,
    pub(crate) conn: Option<DialSettings>,
    pub(crate) tcp_pool: Option<TcpPoolHandle>,
    pub(crate) quic_pool: Option<Box<dyn QuicPool>>,
}

impl std::fmt::Debug for ModuleHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHandles")
            .field("logger", &self.logger.is_some())
            .field("fingerprint", &self.fingerprint)
            .field("dns_monitor", &self.dns_monitor.is_some())
            .field("local_ip_pool", &self.local_ip_pool.is_some())
            .field("certificates", &self.certificates)
            .field("gate", &self.gate.is_some())
            .field("conn", &self.conn.is_some())
            .field("tcp_pool", &self.tcp_pool)
            .field("quic_pool", &self.quic_pool.is_some())
            .finish()
    }
}

impl ModuleHandles {
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn Logger>> {
        self.logger.as_ref()
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&FingerprintProfile> {
        self.fingerprint.as_ref()
    }

    #[must_use]
    pub fn dns_monitor(&self) -> Option<&dyn DomainMonitor> {
        self.dns_monitor.as_deref()
    }

    #[must_use]
    pub fn local_ip_pool(&self) -> Option<&dyn LocalIpPool> {
        self.local_ip_pool.as_deref()
    }

    #[must_use]
    pub fn certificates(&self) -> Option<&CertificateHandle> {
        self.certificates.as_ref()
    }

    #[must_use]
    pub fn gate(&self) -> Option<&Arc<StatusGate>> {
        self.gate.as_ref()
    }

    #[must_use]
    pub fn conn(&self) -> Option<&DialSettings> {
        self.conn.as_ref()
    }

    #[must_use]
    pub fn tcp_pool(&self) -> Option<&TcpPoolHandle> {
        self.tcp_pool.as_ref()
    }

    #[must_use]
    pub fn quic_pool(&self) -> Option<&dyn QuicPool> {
        self.quic_pool.as_deref()
    }

    /// True when no slot holds a handle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logger.is_none()
            && self.fingerprint.is_none()
            && self.dns_monitor.is_none()
            && self.local_ip_pool.is_none()
            && self.certificates.is_none()
            && self.gate.is_none()
            && self.conn.is_none()
            && self.tcp_pool.is_none()
            && self.quic_pool.is_none()
    }
}
