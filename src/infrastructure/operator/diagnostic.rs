//! Diagnostic operator implementation.

use tracing::info;

use crate::error::Result;
use crate::infrastructure::config::settings::SystemConfig;
use crate::port::inbound::operator::configuration::ConfigInput;
use crate::port::inbound::operator::diagnostic::{
    ConfigCheckReport, DiagnosticOperator, StartupCheck,
};

use super::{entry::Operator, shared};

impl DiagnosticOperator for Operator {
    fn check_config(&self, input: &ConfigInput) -> Result<ConfigCheckReport> {
        let config = shared::load_config(input)?;
        Ok(ConfigCheckReport {
            source: input.describe(),
            uses_defaults: input.uses_defaults(),
            log_level: config.logs.level.clone(),
            log_format: config.logs.format.clone(),
            target_domains: config.ip_pool_test.target_domains.clone(),
            certificate_provider: config.certificate.provider,
            server_domain: config.certificate.server_domain.clone(),
            strict_whitelist: !config.ip_status.allow_start_when_empty,
            ipinfo_configured: config.domain_dns.ipinfo_token().is_some(),
        })
    }

    fn check_startup(&self, input: &ConfigInput) -> Result<StartupCheck> {
        let config = shared::load_config(input)?;
        Ok(self.startup_cycle(&config))
    }
}

impl Operator {
    /// One boot/teardown cycle. The first error wins: initialization, then
    /// the whitelist predicate, then shutdown failures.
    fn startup_cycle(&self, config: &SystemConfig) -> StartupCheck {
        let mut orchestrator = self.orchestrator();
        let booted = orchestrator.initialize(config);
        let readiness = orchestrator.readiness();
        let health = if booted.is_ok() {
            orchestrator.check_system_health()
        } else {
            Ok(())
        };
        let shutdown = orchestrator.close();

        let initialized = booted.is_ok();
        let outcome = booted
            .and(health)
            .and_then(|()| shutdown.clone().into_result());
        info!(
            boot_id = %orchestrator.boot_id(),
            initialized,
            ready = readiness.is_healthy(),
            "Startup check finished"
        );

        StartupCheck {
            boot_id: orchestrator.boot_id(),
            initialized,
            records: orchestrator.records().to_vec(),
            readiness,
            shutdown,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::{ModuleKind, BOOT_ORDER};
    use crate::domain::shutdown::ReleaseOutcome;
    use crate::error::Error;
    use crate::testkit;
    use crate::testkit::fakes::Faults;
    use crate::testkit::journal::Journal;

    fn operator(journal: &Journal, faults: &Faults) -> Operator {
        Operator::new(testkit::fakes::collaborators(journal, faults))
    }

    #[test]
    fn healthy_boot_closes_everything() {
        let journal = Journal::default();
        let dir = tempfile::tempdir().unwrap();

        let check = operator(&journal, &Faults::default())
            .startup_cycle(&testkit::config::test_config(dir.path()));

        assert!(check.outcome.is_ok());
        assert!(check.initialized);
        assert!(check.readiness.is_healthy());
        assert_eq!(check.records.len(), BOOT_ORDER.len());
        assert_eq!(
            check.shutdown.step(ModuleKind::QuicPool).unwrap().outcome,
            ReleaseOutcome::Released
        );
        assert!(journal.contains("close quic_pool"));
    }

    #[test]
    fn strict_empty_whitelist_fails_after_closing() {
        let journal = Journal::default();
        let dir = tempfile::tempdir().unwrap();
        let mut config = testkit::config::test_config(dir.path());
        config.ip_status.allow_start_when_empty = false;

        let check = operator(&journal, &Faults::default()).startup_cycle(&config);

        assert!(check.initialized);
        assert!(!check.readiness.is_healthy());
        assert!(matches!(check.outcome, Err(Error::Gate(_))));
        assert!(journal.contains("close local_ip_pool"));
    }

    #[test]
    fn init_failure_is_reported_before_release_failures() {
        let dir = tempfile::tempdir().unwrap();
        let faults = Faults::default()
            .fail_create(ModuleKind::QuicPool)
            .fail_release(ModuleKind::LocalIpPool);

        let check = operator(&Journal::default(), &faults)
            .startup_cycle(&testkit::config::test_config(dir.path()));

        assert!(!check.initialized);
        assert_eq!(check.shutdown.failed(), vec![ModuleKind::LocalIpPool]);
        assert_eq!(
            check.outcome.unwrap_err().failed_module(),
            Some(ModuleKind::QuicPool)
        );
    }

    #[test]
    fn config_check_summarizes_the_effective_file() {
        let input = ConfigInput::found(
            "config.toml",
            "[ip_pool_test]\ntarget_domains = [\"example.com\"]\n\n[ip_status]\nallow_start_when_empty = false\n",
        );

        let report = Operator::default().check_config(&input).unwrap();

        assert_eq!(report.source, "config.toml");
        assert!(!report.uses_defaults);
        assert_eq!(report.target_domains, vec!["example.com"]);
        assert!(report.strict_whitelist);
        assert_eq!(report.log_level, SystemConfig::default().logs.level);
    }

    #[test]
    fn config_errors_surface_before_any_boot() {
        let journal = Journal::default();
        let input = ConfigInput::found("config.toml", "[logs\n");

        let result = operator(&journal, &Faults::default()).check_startup(&input);

        assert!(matches!(result, Err(Error::Config(_))));
        assert!(journal.entries().is_empty());
    }
}
