//! Diagnostic projections for operator-facing adapters.

use uuid::Uuid;

use super::configuration::ConfigInput;
use crate::domain::certificate::CertificateProvider;
use crate::domain::health::HealthReport;
use crate::domain::record::InitRecord;
use crate::domain::shutdown::ShutdownReport;
use crate::error::Result;

/// Summary output for `check config`.
#[derive(Debug, Clone)]
pub struct ConfigCheckReport {
    pub source: String,
    pub uses_defaults: bool,
    pub log_level: String,
    pub log_format: String,
    pub target_domains: Vec<String>,
    pub certificate_provider: CertificateProvider,
    pub server_domain: String,
    pub strict_whitelist: bool,
    pub ipinfo_configured: bool,
}

/// One boot/teardown cycle as run by `check startup`.
#[derive(Debug)]
pub struct StartupCheck {
    pub boot_id: Uuid,
    pub initialized: bool,
    pub records: Vec<InitRecord>,
    /// Readiness taken after boot, before teardown.
    pub readiness: HealthReport,
    pub shutdown: ShutdownReport,
    /// First failure of initialization, the whitelist predicate, or shutdown.
    pub outcome: Result<()>,
}

/// Diagnostic use-cases exposed to operator-facing adapters.
pub trait DiagnosticOperator: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or fails validation.
    fn check_config(&self, input: &ConfigInput) -> Result<ConfigCheckReport>;

    /// Initialize every module, evaluate readiness, and shut down again.
    ///
    /// # Errors
    ///
    /// Returns an error only when the configuration cannot be loaded; boot
    /// and shutdown failures land in [`StartupCheck::outcome`].
    fn check_startup(&self, input: &ConfigInput) -> Result<StartupCheck>;
}
