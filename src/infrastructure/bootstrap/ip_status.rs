//! Status gate initializer.

use std::sync::Arc;

use crate::application::gate::{GateSettings, StatusGate};
use crate::domain::record::RecordBuilder;
use crate::infrastructure::config::ip_status::IpStatusConfig;
use crate::port::outbound::logger::Logger;

/// Build the gate. The health predicate is not evaluated here; callers
/// decide when an empty whitelist blocks startup.
pub fn initialize(
    config: &IpStatusConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Arc<StatusGate> {
    let gate = Arc::new(StatusGate::new(GateSettings::from(config)));
    let mode = if config.allow_start_when_empty {
        "lenient"
    } else {
        "strict"
    };

    record
        .detail("min_whitelist_count", config.min_whitelist_count)
        .detail("allow_start_when_empty", config.allow_start_when_empty)
        .detail(
            "monitoring",
            if config.whitelist_monitoring {
                format!("every {}s", config.whitelist_monitoring_interval)
            } else {
                "off".to_string()
            },
        )
        .summary(format!(
            "{mode} gate, minimum {} whitelisted",
            config.min_whitelist_count
        ));
    logger.info(&format!("IP status gate ready ({mode})"));
    gate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::port::inbound::gate::IpStatusGate;
    use crate::testkit::logger::RecordingLogger;

    #[test]
    fn gate_starts_empty_with_configured_settings() {
        let config = IpStatusConfig {
            min_whitelist_count: 2,
            allow_start_when_empty: false,
            ..IpStatusConfig::default()
        };
        let mut record = RecordBuilder::start(ModuleKind::IpStatus);

        let gate = initialize(&config, &RecordingLogger::default(), &mut record);

        assert_eq!(gate.whitelist_count(), 0);
        assert_eq!(gate.settings().min_whitelist_count, 2);
        assert!(record.finish().summary.starts_with("strict"));
    }
}
