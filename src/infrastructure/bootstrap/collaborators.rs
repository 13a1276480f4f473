//! The set of collaborator factories the boot sequence consumes.

use std::sync::Arc;

use crate::adapter::outbound::certs::LocalCertificateStoreFactory;
use crate::adapter::outbound::conn_pool::{DialingTcpPoolFactory, QuicClientPoolFactory};
use crate::adapter::outbound::dns::ResolverMonitorFactory;
use crate::adapter::outbound::ip_pool::DetectingIpPoolFactory;
use crate::adapter::outbound::logging::TracingLoggerFactory;
use crate::port::outbound::certs::CertificateManagerFactory;
use crate::port::outbound::conn_pool::{QuicPoolFactory, TcpPoolFactory};
use crate::port::outbound::dns::DomainMonitorFactory;
use crate::port::outbound::ip_pool::LocalIpPoolFactory;
use crate::port::outbound::logger::LoggerFactory;

/// Factories for every external collaborator the boot sequence consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub logger: Arc<dyn LoggerFactory>,
    pub dns: Arc<dyn DomainMonitorFactory>,
    pub ip_pool: Arc<dyn LocalIpPoolFactory>,
    pub certs: Arc<dyn CertificateManagerFactory>,
    pub tcp_pool: Arc<dyn TcpPoolFactory>,
    pub quic_pool: Arc<dyn QuicPoolFactory>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            logger: Arc::new(TracingLoggerFactory),
            dns: Arc::new(ResolverMonitorFactory),
            ip_pool: Arc::new(DetectingIpPoolFactory),
            certs: Arc::new(LocalCertificateStoreFactory),
            tcp_pool: Arc::new(DialingTcpPoolFactory),
            quic_pool: Arc::new(QuicClientPoolFactory),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
