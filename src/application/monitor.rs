//! Periodic whitelist watchdog.
//!
//! Re-reads the gate's monitoring settings every cycle, so runtime changes to
//! the interval or the enabled flag take effect on the next tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::gate::StatusGate;

/// Lower bound on the sleep between cycles.
const MIN_CYCLE: Duration = Duration::from_millis(10);

/// Result of one monitoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitelistCheck {
    pub whitelist_count: usize,
    pub min_whitelist_count: usize,
    pub healthy: bool,
}

impl WhitelistCheck {
    #[must_use]
    pub const fn below_minimum(&self) -> bool {
        self.whitelist_count < self.min_whitelist_count
    }
}

/// Evaluate the gate once, logging anything worth an operator's attention.
///
/// Every field comes from one snapshot, so the count and the health verdict
/// always agree.
pub fn check_whitelist(gate: &StatusGate) -> WhitelistCheck {
    let snapshot = gate.snapshot();
    let check = WhitelistCheck {
        whitelist_count: snapshot.whitelist_count,
        min_whitelist_count: snapshot.min_whitelist_count,
        healthy: snapshot.healthy,
    };

    if check.below_minimum() {
        warn!(
            whitelist_count = check.whitelist_count,
            min_whitelist_count = check.min_whitelist_count,
            "Whitelist below minimum"
        );
    }
    if !check.healthy {
        warn!("Whitelist is empty and empty start is not allowed");
    }
    check
}

#[derive(Debug, Default)]
struct MonitorStats {
    checks: AtomicU64,
    last: Mutex<Option<WhitelistCheck>>,
}

/// Background task that keeps an eye on whitelist size.
#[derive(Debug)]
pub struct WhitelistMonitor {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
    stats: Arc<MonitorStats>,
}

impl WhitelistMonitor {
    /// Spawn the monitor on the current tokio runtime.
    #[must_use]
    pub fn spawn(gate: Arc<StatusGate>) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = Arc::new(MonitorStats::default());
        let handle = tokio::spawn(monitor_task(gate, stop_rx, Arc::clone(&stats)));
        Self {
            stop_tx,
            handle,
            stats,
        }
    }

    /// Number of completed monitoring passes.
    #[must_use]
    pub fn checks_run(&self) -> u64 {
        self.stats.checks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_check(&self) -> Option<WhitelistCheck> {
        *self.stats.last.lock()
    }

    /// Signal the task to exit and wait for it.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Whitelist monitor task ended abnormally");
        }
    }
}

async fn monitor_task(
    gate: Arc<StatusGate>,
    mut stop_rx: watch::Receiver<bool>,
    stats: Arc<MonitorStats>,
) {
    debug!("Whitelist monitor started");

    loop {
        let settings = gate.settings();
        let cycle = settings.monitoring_interval.max(MIN_CYCLE);

        tokio::select! {
            _ = tokio::time::sleep(cycle) => {}
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
                continue;
            }
        }

        if !gate.settings().whitelist_monitoring {
            continue;
        }

        let check = check_whitelist(&gate);
        *stats.last.lock() = Some(check);
        stats.checks.fetch_add(1, Ordering::Relaxed);
    }

    debug!("Whitelist monitor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gate::GateSettings;
    use crate::port::inbound::gate::IpStatusGate;

    fn fast_gate(monitoring: bool, allow_empty: bool) -> Arc<StatusGate> {
        Arc::new(StatusGate::new(GateSettings {
            min_whitelist_count: 2,
            allow_start_when_empty: allow_empty,
            whitelist_monitoring: monitoring,
            monitoring_interval: Duration::from_millis(10),
        }))
    }

    #[test]
    fn check_reports_below_minimum_and_health() {
        let gate = fast_gate(true, false);
        gate.add_to_whitelist("10.0.0.1");

        let check = check_whitelist(&gate);
        assert_eq!(check.whitelist_count, 1);
        assert!(check.below_minimum());
        assert!(check.healthy);
    }

    #[test]
    fn check_agrees_with_itself_under_concurrent_writes() {
        let gate = fast_gate(true, false);
        let writer = {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    gate.add_to_whitelist("10.0.0.1");
                    gate.remove_from_whitelist("10.0.0.1", "rotated");
                }
            })
        };

        for _ in 0..2_000 {
            let check = check_whitelist(&gate);
            assert_eq!(check.healthy, check.whitelist_count > 0);
        }
        writer.join().unwrap();
    }

    #[tokio::test]
    async fn monitor_runs_checks_until_stopped() {
        let gate = fast_gate(true, false);
        let monitor = WhitelistMonitor::spawn(Arc::clone(&gate));

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(monitor.checks_run() > 0);
        let last = monitor.last_check().unwrap();
        assert_eq!(last.whitelist_count, 0);
        assert!(!last.healthy);

        monitor.stop().await;
    }

    #[tokio::test]
    async fn disabled_monitor_idles() {
        let gate = fast_gate(false, true);
        let monitor = WhitelistMonitor::spawn(Arc::clone(&gate));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(monitor.checks_run(), 0);
        assert!(monitor.last_check().is_none());

        // Enabling at runtime is picked up on a later cycle.
        gate.set_whitelist_monitoring(true);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(monitor.checks_run() > 0);

        monitor.stop().await;
    }
}
