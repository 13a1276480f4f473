//! Local IP pool initializer.

use std::net::Ipv4Addr;

use super::shared::{join_or_none, warn};
use crate::domain::record::RecordBuilder;
use crate::error::ModuleError;
use crate::infrastructure::config::ip_pool::LocalIpPoolConfig;
use crate::port::outbound::ip_pool::{IpPoolSpec, LocalIpPool, LocalIpPoolFactory};
use crate::port::outbound::logger::Logger;

/// Build the pool spec from `[local_ip_pool]`.
#[must_use]
pub fn pool_spec(config: &LocalIpPoolConfig) -> IpPoolSpec {
    IpPoolSpec {
        ipv4: config.ips.clone(),
        strategy: config.selection_strategy,
    }
}

/// Build the local IP pool and record the addresses it found.
///
/// # Errors
///
/// Returns the factory's error.
pub fn initialize(
    factory: &dyn LocalIpPoolFactory,
    config: &LocalIpPoolConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<Box<dyn LocalIpPool>, ModuleError> {
    let pool = factory.create(&pool_spec(config))?;

    let ipv4 = pool.ipv4_addresses();
    let ipv6 = pool.active_ipv6_addresses();
    let dynamic = pool.supports_dynamic_pool();

    record
        .detail("ipv4", join_or_none(&ipv4))
        .detail("ipv6", join_or_none(&ipv6))
        .detail("dynamic_pool", dynamic)
        .detail("strategy", config.selection_strategy)
        .summary(format!("{} IPv4, {} IPv6", ipv4.len(), ipv6.len()));

    if ipv4.is_empty() && ipv6.is_empty() {
        warn(logger, record, "no local addresses available");
    } else if ipv6.is_empty() && ipv4.iter().all(|ip| is_loopback(ip)) {
        warn(
            logger,
            record,
            "only loopback addresses detected; outbound traffic will not be spread",
        );
    }

    logger.info(&format!(
        "Local IP pool ready (ipv4={}, ipv6={}, dynamic={dynamic})",
        ipv4.len(),
        ipv6.len()
    ));
    Ok(pool)
}

fn is_loopback(ip: &str) -> bool {
    ip.parse::<Ipv4Addr>().is_ok_and(|addr| addr.is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::testkit::fakes::{FakeIpPoolFactory, Faults};
    use crate::testkit::journal::Journal;
    use crate::testkit::logger::RecordingLogger;

    #[test]
    fn records_addresses_and_dynamic_support() {
        let factory = FakeIpPoolFactory::new(Journal::default(), Faults::default())
            .with_addresses(vec!["192.0.2.1".into()], vec!["2001:db8::1".into()]);
        let mut record = RecordBuilder::start(ModuleKind::LocalIpPool);

        initialize(
            &factory,
            &LocalIpPoolConfig::default(),
            &RecordingLogger::default(),
            &mut record,
        )
        .unwrap();
        let record = record.finish();

        assert_eq!(record.detail("ipv4"), Some("192.0.2.1"));
        assert_eq!(record.detail("ipv6"), Some("2001:db8::1"));
        assert_eq!(record.detail("dynamic_pool"), Some("true"));
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn loopback_only_is_a_warning() {
        let factory = FakeIpPoolFactory::new(Journal::default(), Faults::default())
            .with_addresses(vec!["127.0.0.1".into()], Vec::new());
        let mut record = RecordBuilder::start(ModuleKind::LocalIpPool);

        initialize(
            &factory,
            &LocalIpPoolConfig::default(),
            &RecordingLogger::default(),
            &mut record,
        )
        .unwrap();

        assert_eq!(record.finish().warnings.len(), 1);
    }
}
