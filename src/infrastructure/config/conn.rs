//! Connection defaults shared by outbound dialers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::port::outbound::conn_pool::DialSettings;

/// `[conn]` section. Timeouts are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnConfig {
    pub connect_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub keep_alive: bool,
    pub keep_alive_time: u64,
    pub max_idle_conns: usize,
    pub max_conns_per_host: usize,
    pub tls_handshake_timeout: u64,
    pub insecure_skip_verify: bool,
}

impl ConnConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    /// Keep-alive interval, or `None` when keep-alive is off.
    #[must_use]
    pub fn keep_alive_time(&self) -> Option<Duration> {
        self.keep_alive
            .then(|| Duration::from_secs(self.keep_alive_time))
    }

    #[must_use]
    pub fn tls_handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.tls_handshake_timeout)
    }
}

impl From<&ConnConfig> for DialSettings {
    fn from(config: &ConnConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
            keep_alive: config.keep_alive_time(),
            max_idle_conns: config.max_idle_conns,
        }
    }
}

impl Default for ConnConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            read_timeout: 30,
            write_timeout: 30,
            keep_alive: true,
            keep_alive_time: 60,
            max_idle_conns: 100,
            max_conns_per_host: 10,
            tls_handshake_timeout: 10,
            insecure_skip_verify: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_alive_time_is_none_when_disabled() {
        let config = ConnConfig {
            keep_alive: false,
            ..Default::default()
        };
        assert_eq!(config.keep_alive_time(), None);
    }

    #[test]
    fn durations_are_seconds() {
        let config = ConnConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.read_timeout(), Duration::from_secs(30));
        assert_eq!(config.keep_alive_time(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn dial_settings_carry_timeouts_and_idle_limit() {
        let dial = DialSettings::from(&ConnConfig {
            keep_alive: false,
            max_idle_conns: 4,
            ..Default::default()
        });
        assert_eq!(dial.connect_timeout, Duration::from_secs(10));
        assert_eq!(dial.keep_alive, None);
        assert_eq!(dial.max_idle_conns, 4);
    }
}
