//! Readiness reporting.

use super::handle::ModuleHandles;
use crate::domain::health::{HealthCheck, HealthReport, HealthStatus};
use crate::port::inbound::gate::IpStatusGate;

/// Evaluate readiness from the handles the orchestrator holds.
///
/// `initialized` and `whitelist` are critical; the rest only inform.
pub fn readiness(handles: &ModuleHandles, initialized: bool) -> HealthReport {
    let mut checks = Vec::new();

    checks.push(HealthCheck::new(
        "initialized",
        true,
        if initialized {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy("initialization did not complete".to_string())
        },
    ));

    checks.push(HealthCheck::new(
        "whitelist",
        true,
        match handles.gate() {
            Some(gate) => match gate.check_system_health() {
                Ok(()) => HealthStatus::Healthy,
                Err(e) => HealthStatus::Unhealthy(e.to_string()),
            },
            None => HealthStatus::Unhealthy("gate not initialized".to_string()),
        },
    ));

    checks.push(HealthCheck::new(
        "dns_monitor",
        false,
        match handles.dns_monitor() {
            Some(monitor) if monitor.is_running() => HealthStatus::Healthy,
            Some(_) => HealthStatus::Unhealthy("monitor stopped".to_string()),
            None => HealthStatus::Unhealthy("not running".to_string()),
        },
    ));

    checks.push(HealthCheck::new(
        "tcp_pool",
        false,
        match handles.tcp_pool() {
            Some(_) => HealthStatus::Healthy,
            None => HealthStatus::Unhealthy("not configured".to_string()),
        },
    ));

    checks.push(HealthCheck::new(
        "certificates",
        false,
        match handles.certificates() {
            Some(handle) if handle.certificate.is_some() => HealthStatus::Healthy,
            Some(_) => HealthStatus::Unhealthy("pending, requested on first use".to_string()),
            None => HealthStatus::Unhealthy("manager not initialized".to_string()),
        },
    ));

    HealthReport::new(checks)
}
