//! Domain DNS monitor initializer.

use std::path::PathBuf;
use std::time::Duration;

use super::shared::{join_or_none, warn};
use crate::domain::record::{InitOutcome, RecordBuilder};
use crate::error::ModuleError;
use crate::infrastructure::config::dns::{DomainDnsConfig, IPINFO_TOKEN_ENV};
use crate::port::outbound::dns::{DomainMonitor, DomainMonitorFactory, MonitorSpec};
use crate::port::outbound::logger::Logger;

/// Build the monitor spec from `[domaindns]` plus the connectivity test target domains.
#[must_use]
pub fn monitor_spec(config: &DomainDnsConfig, target_domains: &[String]) -> MonitorSpec {
    let dns_server_file = match config.dns_server_file.trim() {
        "" => None,
        path => Some(PathBuf::from(path)),
    };
    MonitorSpec {
        target_domains: target_domains.to_vec(),
        ipinfo_token: config.ipinfo_token().map(str::to_string),
        dns_server_file,
        max_servers: config.max_servers,
        dns_servers: config.dns_servers.clone(),
        refresh_interval: Duration::from_secs(config.refresh_interval),
        query_timeout: Duration::from_secs(config.timeout),
    }
}

/// Construct and start the DNS monitor.
///
/// Returns `Ok(None)` with a `skipped` outcome when there are no target
/// domains to watch.
///
/// # Errors
///
/// Returns the factory's error, or the monitor's error when its refresh loop
/// cannot be started.
pub fn initialize(
    factory: &dyn DomainMonitorFactory,
    config: &DomainDnsConfig,
    target_domains: &[String],
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<Option<Box<dyn DomainMonitor>>, ModuleError> {
    if target_domains.is_empty() {
        warn(
            logger,
            record,
            "no target domains in [ip_pool_test]; DNS monitoring skipped",
        );
        record
            .outcome(InitOutcome::Skipped)
            .summary("skipped, no target domains");
        return Ok(None);
    }

    let spec = monitor_spec(config, target_domains);
    if spec.ipinfo_token.is_none() {
        warn(
            logger,
            record,
            format!("{IPINFO_TOKEN_ENV} not set; IP geolocation lookups are limited"),
        );
    }

    let monitor = factory.create(&spec)?;
    monitor.start()?;

    record
        .detail("domains", join_or_none(&spec.target_domains))
        .detail("dns_servers", spec.dns_servers.len())
        .detail("refresh_interval", format!("{}s", spec.refresh_interval.as_secs()))
        .summary(format!(
            "watching {} domain(s), refresh every {}s",
            spec.target_domains.len(),
            spec.refresh_interval.as_secs()
        ));
    logger.info(&format!(
        "DNS monitor started for {} domain(s)",
        spec.target_domains.len()
    ));
    Ok(Some(monitor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::testkit::fakes::{FakeDnsFactory, Faults};
    use crate::testkit::journal::Journal;
    use crate::testkit::logger::RecordingLogger;

    fn domains() -> Vec<String> {
        vec!["example.com".into()]
    }

    #[test]
    fn spec_takes_optional_fields_from_config() {
        let config = DomainDnsConfig {
            ipinfo_token: "  ".into(),
            dns_server_file: "servers.json".into(),
            ..DomainDnsConfig::default()
        };
        let spec = monitor_spec(&config, &domains());

        assert_eq!(spec.ipinfo_token, None);
        assert_eq!(spec.dns_server_file, Some(PathBuf::from("servers.json")));
        assert_eq!(spec.query_timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_domain_list_skips_without_creating() {
        let journal = Journal::default();
        let factory = FakeDnsFactory::new(journal.clone(), Faults::default());
        let logger = RecordingLogger::default();
        let mut record = RecordBuilder::start(ModuleKind::DomainDns);

        let monitor =
            initialize(&factory, &DomainDnsConfig::default(), &[], &logger, &mut record).unwrap();
        let record = record.finish();

        assert!(monitor.is_none());
        assert_eq!(record.outcome, InitOutcome::Skipped);
        assert_eq!(record.warnings.len(), 1);
        assert!(journal.entries().is_empty());
        assert_eq!(logger.lines_at("warn").len(), 1);
    }

    #[test]
    fn monitor_is_started_immediately() {
        let journal = Journal::default();
        let factory = FakeDnsFactory::new(journal.clone(), Faults::default());
        let config = DomainDnsConfig {
            ipinfo_token: "token".into(),
            ..DomainDnsConfig::default()
        };
        let mut record = RecordBuilder::start(ModuleKind::DomainDns);

        let monitor = initialize(
            &factory,
            &config,
            &domains(),
            &RecordingLogger::default(),
            &mut record,
        )
        .unwrap()
        .unwrap();

        assert!(monitor.is_running());
        assert_eq!(journal.entries(), vec!["create domain_dns", "start domain_dns"]);
        assert!(record.finish().warnings.is_empty());
    }

    #[test]
    fn missing_token_is_a_warning() {
        let factory = FakeDnsFactory::new(Journal::default(), Faults::default());
        let mut record = RecordBuilder::start(ModuleKind::DomainDns);

        initialize(
            &factory,
            &DomainDnsConfig::default(),
            &domains(),
            &RecordingLogger::default(),
            &mut record,
        )
        .unwrap();
        let record = record.finish();

        assert_eq!(record.outcome, InitOutcome::Ready);
        assert!(record.warnings[0].contains(IPINFO_TOKEN_ENV));
    }
}
