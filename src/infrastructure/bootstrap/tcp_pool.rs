//! TCP pool initializer.
//!
//! The dialer needs a destination, which is unknown at boot, so this step
//! only validates settings and returns a configured handle.

use crate::domain::record::{InitOutcome, RecordBuilder};
use crate::error::{ConfigError, ModuleError};
use crate::infrastructure::config::pool::NetConnPoolConfig;
use crate::infrastructure::orchestration::handle::TcpPoolHandle;
use crate::port::outbound::conn_pool::TcpPoolSettings;
use crate::port::outbound::logger::Logger;

/// # Errors
///
/// Returns an invalid-value error for a zero maximum or an initial size
/// above the maximum.
pub fn initialize(
    config: &NetConnPoolConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<TcpPoolHandle, ModuleError> {
    if config.max_connections == 0 {
        return Err(ConfigError::InvalidValue {
            field: "netconnpool.max_connections",
            reason: "must be positive".into(),
        }
        .into());
    }
    if config.initial_connections > config.max_connections {
        return Err(ConfigError::InvalidValue {
            field: "netconnpool.initial_connections",
            reason: format!("exceeds max_connections ({})", config.max_connections),
        }
        .into());
    }

    let settings = TcpPoolSettings::from(config);
    record
        .outcome(InitOutcome::Deferred)
        .detail("max_connections", settings.max_connections)
        .detail("min_connections", settings.min_connections)
        .detail("idle_timeout", format!("{}s", config.idle_timeout))
        .summary("configured, dialed once a destination is known");
    logger.info("TCP pool configured; creation deferred until a destination is known");
    Ok(TcpPoolHandle::configured(settings))
}
