//! Connection defaults initializer.

use crate::domain::record::RecordBuilder;
use crate::infrastructure::config::conn::ConnConfig;
use crate::port::outbound::conn_pool::DialSettings;
use crate::port::outbound::logger::Logger;

/// Resolve the connection defaults the pools dial with.
pub fn initialize(
    config: &ConnConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> DialSettings {
    let keep_alive = config
        .keep_alive_time()
        .map_or_else(|| "off".to_string(), |every| format!("{}s", every.as_secs()));

    record
        .detail("connect_timeout", format!("{}s", config.connect_timeout))
        .detail("read_timeout", format!("{}s", config.read_timeout))
        .detail("write_timeout", format!("{}s", config.write_timeout))
        .detail("keep_alive", &keep_alive)
        .detail("max_idle_conns", config.max_idle_conns)
        .summary(format!(
            "connect {}s, keep-alive {keep_alive}",
            config.connect_timeout
        ));
    logger.debug("Connection defaults applied");
    DialSettings::from(config)
}
