//! TCP and QUIC connection pool configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::port::outbound::conn_pool::{QuicPoolSettings, TcpPoolSettings};

/// `[netconnpool]` section. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetConnPoolConfig {
    /// Maximum number of connections per destination.
    #[serde(default = "default_tcp_max_connections")]
    pub max_connections: usize,
    /// Connections to keep warm once a destination is known.
    #[serde(default = "default_tcp_initial_connections")]
    pub initial_connections: usize,
    /// Upper bound on waiting for a connection, including the dial.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime: u64,
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval: u64,
    #[serde(default = "default_health_check_timeout")]
    pub health_check_timeout: u64,
}

/// `[quic]` section. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuicConfig {
    #[serde(default = "default_quic_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_quic_initial_connections")]
    pub initial_connections: usize,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime: u64,
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval: u64,
    #[serde(default = "default_health_check_timeout")]
    pub health_check_timeout: u64,
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout: u64,
    /// Allow 0-RTT resumption.
    #[serde(default = "default_enable_0rtt", rename = "enable_0rtt")]
    pub enable_0rtt: bool,
}

const fn default_tcp_max_connections() -> usize {
    100
}

const fn default_tcp_initial_connections() -> usize {
    10
}

const fn default_quic_max_connections() -> usize {
    50
}

const fn default_quic_initial_connections() -> usize {
    5
}

const fn default_acquire_timeout() -> u64 {
    5
}

const fn default_idle_timeout() -> u64 {
    300 // 5 minutes
}

const fn default_max_lifetime() -> u64 {
    3600 // 1 hour
}

const fn default_health_check_interval() -> u64 {
    60
}

const fn default_health_check_timeout() -> u64 {
    5
}

const fn default_handshake_timeout() -> u64 {
    10
}

const fn default_enable_0rtt() -> bool {
    true
}

impl Default for NetConnPoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_tcp_max_connections(),
            initial_connections: default_tcp_initial_connections(),
            acquire_timeout: default_acquire_timeout(),
            idle_timeout: default_idle_timeout(),
            max_lifetime: default_max_lifetime(),
            health_check_interval: default_health_check_interval(),
            health_check_timeout: default_health_check_timeout(),
        }
    }
}

impl Default for QuicConfig {
    fn default() -> Self {
        Self {
            max_connections: default_quic_max_connections(),
            initial_connections: default_quic_initial_connections(),
            acquire_timeout: default_acquire_timeout(),
            idle_timeout: default_idle_timeout(),
            max_lifetime: default_max_lifetime(),
            health_check_interval: default_health_check_interval(),
            health_check_timeout: default_health_check_timeout(),
            handshake_timeout: default_handshake_timeout(),
            enable_0rtt: default_enable_0rtt(),
        }
    }
}

impl From<&NetConnPoolConfig> for TcpPoolSettings {
    fn from(config: &NetConnPoolConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.initial_connections,
            acquire_timeout: Duration::from_secs(config.acquire_timeout),
            idle_timeout: Duration::from_secs(config.idle_timeout),
            max_lifetime: Duration::from_secs(config.max_lifetime),
            health_check_interval: Duration::from_secs(config.health_check_interval),
            health_check_timeout: Duration::from_secs(config.health_check_timeout),
        }
    }
}

// Capacity is clamped to at least one connection, max never below min.
impl From<&QuicConfig> for QuicPoolSettings {
    fn from(config: &QuicConfig) -> Self {
        let min_capacity = config.initial_connections.max(1);
        let max_capacity = config.max_connections.max(min_capacity);
        Self {
            min_capacity,
            max_capacity,
            idle_timeout: Duration::from_secs(config.idle_timeout),
            max_lifetime: Duration::from_secs(config.max_lifetime),
            handshake_timeout: Duration::from_secs(config.handshake_timeout),
            enable_0rtt: config.enable_0rtt,
        }
    }
}
