//! Boot sequencing and ownership of module handles.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use super::handle::ModuleHandles;
use super::{health, shutdown};
use crate::application::gate::StatusGate;
use crate::domain::health::HealthReport;
use crate::domain::module::{ModuleKind, BOOT_ORDER};
use crate::domain::record::{InitRecord, RecordBuilder};
use crate::domain::shutdown::ShutdownReport;
use crate::error::{Error, ModuleError, Result};
use crate::infrastructure::bootstrap::collaborators::Collaborators;
use crate::infrastructure::bootstrap::{
    certs, conn, dns, fingerprint, ip_pool, ip_status, logging, quic_pool, tcp_pool,
};
use crate::infrastructure::config::settings::SystemConfig;
use crate::port::inbound::gate::IpStatusGate;
use crate::port::outbound::conn_pool::TcpPool;

/// Brings the nine modules up in [`BOOT_ORDER`] and tears them down again.
///
/// `initialize` is fail-fast: the first failing module aborts the sequence.
/// Handles built before the failure stay owned here, and `close` (or drop)
/// releases them.
pub struct Orchestrator {
    collaborators: Collaborators,
    boot_id: Uuid,
    records: Vec<InitRecord>,
    handles: ModuleHandles,
    attempted: bool,
    initialized: bool,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("boot_id", &self.boot_id)
            .field("records", &self.records.len())
            .field("handles", &self.handles)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Collaborators::default())
    }
}

impl Orchestrator {
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            boot_id: Uuid::new_v4(),
            records: Vec::new(),
            handles: ModuleHandles::default(),
            attempted: false,
            initialized: false,
        }
    }

    /// Identifier attached to every boot log line.
    #[must_use]
    pub fn boot_id(&self) -> Uuid {
        self.boot_id
    }

    /// Run every module initializer in boot order.
    ///
    /// Each initializer sees only its own section of `config`; the DNS
    /// initializer also receives `ip_pool_test.target_domains`.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyInitialized`] on a second call, whatever the first
    ///   call's outcome
    /// - [`Error::ModuleInit`] naming the first module that failed
    pub fn initialize(&mut self, config: &SystemConfig) -> Result<()> {
        if self.attempted {
            return Err(Error::AlreadyInitialized);
        }
        self.attempted = true;

        let span = info_span!("boot", boot_id = %self.boot_id);
        let _entered = span.enter();
        let started = Instant::now();
        let collaborators = self.collaborators.clone();

        let logger = run_step(&mut self.records, ModuleKind::Logging, |record| {
            logging::initialize(collaborators.logger.as_ref(), &config.logs, record)
        })?;
        self.handles.logger = Some(Arc::clone(&logger));
        let logger = logger.as_ref();

        self.handles.fingerprint = Some(run_step(
            &mut self.records,
            ModuleKind::Fingerprint,
            |record| fingerprint::initialize(&config.fingerprint, logger, record),
        )?);

        self.handles.dns_monitor = run_step(&mut self.records, ModuleKind::DomainDns, |record| {
            dns::initialize(
                collaborators.dns.as_ref(),
                &config.domain_dns,
                &config.ip_pool_test.target_domains,
                logger,
                record,
            )
        })?;

        self.handles.local_ip_pool = Some(run_step(
            &mut self.records,
            ModuleKind::LocalIpPool,
            |record| {
                ip_pool::initialize(
                    collaborators.ip_pool.as_ref(),
                    &config.local_ip_pool,
                    logger,
                    record,
                )
            },
        )?);

        self.handles.certificates = Some(run_step(
            &mut self.records,
            ModuleKind::Certificates,
            |record| {
                certs::initialize(
                    collaborators.certs.as_ref(),
                    &config.certificate,
                    logger,
                    record,
                )
            },
        )?);

        self.handles.gate = Some(run_step(&mut self.records, ModuleKind::IpStatus, |record| {
            Ok(ip_status::initialize(&config.ip_status, logger, record))
        })?);

        self.handles.conn = Some(run_step(&mut self.records, ModuleKind::Conn, |record| {
            Ok(conn::initialize(&config.conn, logger, record))
        })?);

        self.handles.tcp_pool = Some(run_step(&mut self.records, ModuleKind::TcpPool, |record| {
            tcp_pool::initialize(&config.netconnpool, logger, record)
        })?);

        self.handles.quic_pool = Some(run_step(
            &mut self.records,
            ModuleKind::QuicPool,
            |record| {
                quic_pool::initialize(collaborators.quic_pool.as_ref(), &config.quic, logger, record)
            },
        )?);

        self.initialized = true;
        info!(
            modules = BOOT_ORDER.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "All modules initialized"
        );
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// One record per initializer that ran, including a failed one.
    #[must_use]
    pub fn records(&self) -> &[InitRecord] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, module: ModuleKind) -> Option<&InitRecord> {
        self.records.iter().find(|record| record.module == module)
    }

    #[must_use]
    pub fn handles(&self) -> &ModuleHandles {
        &self.handles
    }

    /// The whitelist/blacklist gate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before the gate is built.
    pub fn gate(&self) -> Result<Arc<StatusGate>> {
        self.handles
            .gate()
            .cloned()
            .ok_or(Error::NotInitialized(ModuleKind::IpStatus))
    }

    /// The gate's startup predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gate`] when the whitelist is empty in strict mode, or
    /// [`Error::NotInitialized`] before the gate is built.
    pub fn check_system_health(&self) -> Result<()> {
        let gate = self
            .handles
            .gate()
            .ok_or(Error::NotInitialized(ModuleKind::IpStatus))?;
        gate.check_system_health()?;
        Ok(())
    }

    #[must_use]
    pub fn readiness(&self) -> HealthReport {
        health::readiness(&self.handles, self.initialized)
    }

    /// Next local source address, picked with the pool's selection strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before the local IP pool exists.
    pub fn next_source_ipv4(&self) -> Result<Option<Ipv4Addr>> {
        let pool = self
            .handles
            .local_ip_pool()
            .ok_or(Error::NotInitialized(ModuleKind::LocalIpPool))?;
        Ok(pool.next_ipv4())
    }

    /// TCP pool for `destination`, created on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before the TCP pool and connection
    /// defaults exist, or [`Error::Module`] when the pool cannot be built.
    pub fn tcp_pool_for(&self, destination: &str) -> Result<Arc<dyn TcpPool>> {
        let handle = self
            .handles
            .tcp_pool()
            .ok_or(Error::NotInitialized(ModuleKind::TcpPool))?;
        let conn = self
            .handles
            .conn()
            .ok_or(Error::NotInitialized(ModuleKind::Conn))?;

        let pool = handle.materialize(self.collaborators.tcp_pool.as_ref(), destination, conn)?;
        Ok(pool)
    }

    /// Release every handle, best-effort, in reverse boot order.
    ///
    /// Handles are moved out first, so a second call releases nothing.
    pub fn close(&mut self) -> ShutdownReport {
        let handles = std::mem::take(&mut self.handles);
        self.initialized = false;

        let span = info_span!("shutdown", boot_id = %self.boot_id);
        let _entered = span.enter();
        shutdown::release(handles)
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        let report = self.close();
        if !report.is_clean() {
            warn!(failed = ?report.failed(), "Orchestrator dropped with release failures");
        }
    }
}

/// Run one initializer inside a span carrying its module name, and record
/// the outcome. Errors are wrapped with the module identity.
fn run_step<T>(
    records: &mut Vec<InitRecord>,
    module: ModuleKind,
    init: impl FnOnce(&mut RecordBuilder) -> std::result::Result<T, ModuleError>,
) -> Result<T> {
    let span = info_span!("init", module = module.as_str());
    let _entered = span.enter();

    let mut builder = RecordBuilder::start(module);
    match init(&mut builder) {
        Ok(handle) => {
            let record = builder.finish();
            info!(
                outcome = record.outcome.as_str(),
                elapsed_ms = record.elapsed.as_millis() as u64,
                warnings = record.warnings.len(),
                "{}",
                record.summary
            );
            records.push(record);
            Ok(handle)
        }
        Err(source) => {
            error!(error = %source, "Module initialization failed");
            records.push(builder.fail(&source));
            Err(Error::ModuleInit { module, source })
        }
    }
}
