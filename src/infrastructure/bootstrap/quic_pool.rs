//! QUIC pool initializer.

use crate::domain::record::RecordBuilder;
use crate::error::ModuleError;
use crate::infrastructure::config::pool::QuicConfig;
use crate::port::outbound::conn_pool::{QuicPool, QuicPoolFactory, QuicPoolSettings};
use crate::port::outbound::logger::Logger;

/// Build the QUIC client pool. Its capacity and timeouts are fully known
/// from configuration, so it is constructed at boot.
///
/// # Errors
///
/// Returns the factory's error.
pub fn initialize(
    factory: &dyn QuicPoolFactory,
    config: &QuicConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<Box<dyn QuicPool>, ModuleError> {
    let settings = QuicPoolSettings::from(config);
    let pool = factory.create(&settings)?;

    record
        .detail("min_capacity", settings.min_capacity)
        .detail("max_capacity", settings.max_capacity)
        .detail("enable_0rtt", settings.enable_0rtt)
        .summary(format!(
            "capacity {}..{}",
            settings.min_capacity, settings.max_capacity
        ));
    logger.info(&format!(
        "QUIC pool ready (capacity {}..{})",
        settings.min_capacity, settings.max_capacity
    ));
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::testkit::fakes::{FakeQuicPoolFactory, Faults};
    use crate::testkit::journal::Journal;
    use crate::testkit::logger::RecordingLogger;

    #[test]
    fn zero_initial_connections_are_clamped() {
        let factory = FakeQuicPoolFactory::new(Journal::default(), Faults::default());
        let config = QuicConfig {
            initial_connections: 0,
            max_connections: 0,
            ..QuicConfig::default()
        };
        let mut record = RecordBuilder::start(ModuleKind::QuicPool);

        let pool = initialize(&factory, &config, &RecordingLogger::default(), &mut record).unwrap();

        assert_eq!(pool.settings().min_capacity, 1);
        assert_eq!(pool.settings().max_capacity, 1);
        assert_eq!(record.finish().detail("min_capacity"), Some("1"));
    }
}
