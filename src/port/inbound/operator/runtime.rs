//! Runtime use-cases for `run`.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use uuid::Uuid;

use super::configuration::ConfigInput;
use crate::domain::health::HealthReport;
use crate::domain::record::InitRecord;
use crate::domain::shutdown::ShutdownReport;
use crate::error::{Error, Result};

/// Request model for starting the crawler system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub config: ConfigInput,
    pub log_level: Option<String>,
    pub json_logs: bool,
    pub allow_empty_whitelist: bool,
    /// IPs added to the whitelist before the startup predicate runs.
    pub whitelist: Vec<String>,
}

/// Startup snapshot shown before boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStartupSnapshot {
    pub source: String,
    pub uses_defaults: bool,
    pub log_level: String,
    pub log_format: String,
    pub server_address: String,
    pub strict_whitelist: bool,
}

/// Everything up and the whitelist monitor running.
#[derive(Debug)]
pub struct RunningSystem {
    pub boot_id: Uuid,
    pub records: Vec<InitRecord>,
    pub whitelist_count: usize,
    /// First address the local IP pool hands out, when it has any.
    pub source_ipv4: Option<Ipv4Addr>,
    pub readiness: HealthReport,
    pub session: Box<dyn RunSession>,
}

/// Boot failed or the whitelist predicate refused to start. Whatever was
/// built has already been released.
#[derive(Debug)]
pub struct AbortedRun {
    pub boot_id: Uuid,
    pub records: Vec<InitRecord>,
    pub shutdown: ShutdownReport,
    pub error: Error,
}

impl AbortedRun {
    /// True when boot succeeded but the strict whitelist predicate failed.
    #[must_use]
    pub fn refused(&self) -> bool {
        matches!(self.error, Error::Gate(_))
    }
}

#[derive(Debug)]
pub enum RunStart {
    Running(RunningSystem),
    Aborted(AbortedRun),
}

/// What stopping a running system did.
#[derive(Debug)]
pub struct RunStopped {
    pub whitelist_checks: u64,
    pub shutdown: ShutdownReport,
}

/// A started system, owned by the adapter until it decides to stop.
#[async_trait]
pub trait RunSession: Send + std::fmt::Debug {
    /// Stop background monitoring, then release every module.
    async fn stop(self: Box<Self>) -> RunStopped;
}

/// Runtime use-cases exposed to operator-facing adapters.
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Resolve the effective run configuration without booting anything.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed configuration or an invalid override.
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot>;

    /// Boot every module, seed the whitelist, and apply the startup predicate.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be resolved; boot
    /// failures and refusals come back as [`RunStart::Aborted`].
    async fn start_run(&self, request: &RunRequest) -> Result<RunStart>;
}
