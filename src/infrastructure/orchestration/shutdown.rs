//! Best-effort teardown in reverse boot order.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::handle::ModuleHandles;
use crate::domain::module::ModuleKind;
use crate::domain::shutdown::{ReleaseOutcome, ShutdownReport, ShutdownStep};
use crate::error::ModuleError;

/// Teardown order: the reverse of acquisition for resources that need an
/// explicit release, then the stateless modules.
pub const SHUTDOWN_ORDER: [ModuleKind; 9] = [
    ModuleKind::QuicPool,
    ModuleKind::TcpPool,
    ModuleKind::DomainDns,
    ModuleKind::LocalIpPool,
    ModuleKind::Certificates,
    ModuleKind::Conn,
    ModuleKind::IpStatus,
    ModuleKind::Fingerprint,
    ModuleKind::Logging,
];

/// Release every handle in [`SHUTDOWN_ORDER`]. A failure is logged and
/// recorded; later steps still run.
pub(crate) fn release(handles: ModuleHandles) -> ShutdownReport {
    let ModuleHandles {
        logger,
        fingerprint,
        dns_monitor,
        local_ip_pool,
        certificates,
        gate,
        conn,
        tcp_pool,
        quic_pool,
    } = handles;

    let mut report = ShutdownReport::default();

    step(&mut report, ModuleKind::QuicPool, || {
        quic_pool.map(|pool| {
            pool.close();
            Ok(ReleaseOutcome::Released)
        })
    });
    step(&mut report, ModuleKind::TcpPool, || {
        tcp_pool.map(|handle| handle.close().map(|()| ReleaseOutcome::Released))
    });
    step(&mut report, ModuleKind::DomainDns, || {
        dns_monitor.map(|monitor| {
            monitor.stop();
            Ok(ReleaseOutcome::Stopped)
        })
    });
    step(&mut report, ModuleKind::LocalIpPool, || {
        local_ip_pool.map(|pool| pool.close().map(|()| ReleaseOutcome::Released))
    });
    step(&mut report, ModuleKind::Certificates, || {
        certificates.map(|_| Ok(ReleaseOutcome::Dropped))
    });
    step(&mut report, ModuleKind::Conn, || conn.map(|_| Ok(ReleaseOutcome::Dropped)));
    step(&mut report, ModuleKind::IpStatus, || gate.map(|_| Ok(ReleaseOutcome::Dropped)));
    step(&mut report, ModuleKind::Fingerprint, || {
        fingerprint.map(|_| Ok(ReleaseOutcome::Dropped))
    });
    step(&mut report, ModuleKind::Logging, || logger.map(|_| Ok(ReleaseOutcome::Dropped)));

    let failed = report.failed().len();
    if failed == 0 {
        info!("Shutdown complete");
    } else {
        warn!(failed, "Shutdown complete with failures");
    }
    report
}

type ReleaseResult = std::result::Result<ReleaseOutcome, ModuleError>;

/// Run one release action; `None` means the module had no handle.
fn step(
    report: &mut ShutdownReport,
    module: ModuleKind,
    release: impl FnOnce() -> Option<ReleaseResult>,
) {
    let started = Instant::now();
    let (outcome, error) = match release() {
        None => (ReleaseOutcome::Absent, None),
        Some(Ok(outcome)) => (outcome, None),
        Some(Err(e)) => {
            warn!(module = module.as_str(), error = %e, "Failed to release module");
            (ReleaseOutcome::Failed, Some(e.to_string()))
        }
    };
    debug!(module = module.as_str(), outcome = outcome.as_str(), "Shutdown step");
    report.steps.push(ShutdownStep {
        module,
        outcome,
        error,
        elapsed: started.elapsed(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_order_reverses_resource_acquisition() {
        let pos = |kind| SHUTDOWN_ORDER.iter().position(|k| *k == kind).unwrap();
        assert!(pos(ModuleKind::QuicPool) < pos(ModuleKind::TcpPool));
        assert!(pos(ModuleKind::TcpPool) < pos(ModuleKind::DomainDns));
        assert!(pos(ModuleKind::DomainDns) < pos(ModuleKind::LocalIpPool));
        assert_eq!(SHUTDOWN_ORDER.last(), Some(&ModuleKind::Logging));
    }

    #[test]
    fn empty_handles_release_nothing() {
        let report = release(ModuleHandles::default());

        let modules: Vec<_> = report.steps.iter().map(|s| s.module).collect();
        assert_eq!(modules, SHUTDOWN_ORDER.to_vec());
        assert!(report
            .steps
            .iter()
            .all(|s| s.outcome == ReleaseOutcome::Absent));
        assert!(report.into_result().is_ok());
    }
}
