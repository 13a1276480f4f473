//! Runtime operator implementation.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::monitor::WhitelistMonitor;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::SystemConfig;
use crate::infrastructure::orchestration::orchestrator::Orchestrator;
use crate::port::inbound::gate::IpStatusGate;
use crate::port::inbound::operator::runtime::{
    AbortedRun, RunRequest, RunSession, RunStart, RunStartupSnapshot, RunStopped, RunningSystem,
    RuntimeOperator,
};

use super::{entry::Operator, shared};

#[async_trait]
impl RuntimeOperator for Operator {
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot> {
        let config = Self::load_run_config(request)?;
        Ok(RunStartupSnapshot {
            source: request.config.describe(),
            uses_defaults: request.config.uses_defaults(),
            log_level: config.logs.level,
            log_format: config.logs.format,
            server_address: config.server.listen_address,
            strict_whitelist: !config.ip_status.allow_start_when_empty,
        })
    }

    async fn start_run(&self, request: &RunRequest) -> Result<RunStart> {
        let config = Self::load_run_config(request)?;
        Ok(self.start_with(&config, &request.whitelist))
    }
}

impl Operator {
    fn load_run_config(request: &RunRequest) -> Result<SystemConfig> {
        let mut config = shared::load_config(&request.config)?;
        Self::apply_run_overrides(&mut config, request)?;
        Ok(config)
    }

    fn apply_run_overrides(config: &mut SystemConfig, request: &RunRequest) -> Result<()> {
        if let Some(level) = &request.log_level {
            config.logs.level = level.trim().to_ascii_lowercase();
        }
        if request.json_logs {
            config.logs.format = "json".to_string();
        }
        if request.allow_empty_whitelist {
            config.ip_status.allow_start_when_empty = true;
        }
        for ip in &request.whitelist {
            if ip.parse::<IpAddr>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "whitelist",
                    reason: format!("'{ip}' is not an IP address"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Boot, seed the whitelist, and apply the startup predicate. Must run
    /// inside a tokio runtime: the whitelist monitor is spawned on it.
    fn start_with(&self, config: &SystemConfig, whitelist: &[String]) -> RunStart {
        let mut orchestrator = self.orchestrator();
        if let Err(error) = orchestrator.initialize(config) {
            return RunStart::Aborted(abort(orchestrator, error));
        }
        let gate = match orchestrator.gate() {
            Ok(gate) => gate,
            Err(error) => return RunStart::Aborted(abort(orchestrator, error)),
        };
        for ip in whitelist {
            gate.add_to_whitelist(ip);
        }
        if let Err(error) = orchestrator.check_system_health() {
            warn!(boot_id = %orchestrator.boot_id(), error = %error, "Refusing to start");
            return RunStart::Aborted(abort(orchestrator, error));
        }

        let source_ipv4 = orchestrator.next_source_ipv4().ok().flatten();
        let whitelist_count = gate.whitelist_count();
        let monitor = WhitelistMonitor::spawn(Arc::clone(&gate));
        info!(
            boot_id = %orchestrator.boot_id(),
            whitelisted = whitelist_count,
            "Crawler system running"
        );

        RunStart::Running(RunningSystem {
            boot_id: orchestrator.boot_id(),
            records: orchestrator.records().to_vec(),
            whitelist_count,
            source_ipv4,
            readiness: orchestrator.readiness(),
            session: Box::new(Session {
                orchestrator,
                monitor,
            }),
        })
    }
}

fn abort(mut orchestrator: Orchestrator, error: Error) -> AbortedRun {
    let shutdown = orchestrator.close();
    AbortedRun {
        boot_id: orchestrator.boot_id(),
        records: orchestrator.records().to_vec(),
        shutdown,
        error,
    }
}

#[derive(Debug)]
struct Session {
    orchestrator: Orchestrator,
    monitor: WhitelistMonitor,
}

#[async_trait]
impl RunSession for Session {
    async fn stop(self: Box<Self>) -> RunStopped {
        let Session {
            mut orchestrator,
            monitor,
        } = *self;

        let whitelist_checks = monitor.checks_run();
        monitor.stop().await;
        info!(whitelist_checks, "Whitelist monitor stopped");

        RunStopped {
            whitelist_checks,
            shutdown: orchestrator.close(),
        }
    }
}
