//! Local IP pool port.

use std::net::Ipv4Addr;

use crate::domain::selection::SelectionStrategy;
use crate::error::ModuleError;

/// Construction parameters for a local IP pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpPoolSpec {
    /// IPv4 addresses to use. Empty means auto-detect.
    pub ipv4: Vec<String>,
    pub strategy: SelectionStrategy,
}

/// Source addresses available for outbound connections.
pub trait LocalIpPool: Send + Sync {
    fn ipv4_addresses(&self) -> Vec<String>;
    fn active_ipv6_addresses(&self) -> Vec<String>;
    /// Whether IPv6 addresses can be added and removed at runtime.
    fn supports_dynamic_pool(&self) -> bool;

    /// Pick the next IPv4 source address by the pool's selection strategy.
    ///
    /// Returns `None` once the pool is closed or when it holds no IPv4
    /// address.
    fn next_ipv4(&self) -> Option<Ipv4Addr>;

    /// # Errors
    ///
    /// Returns [`ModuleError::IpPool`] if releasing the pool fails.
    fn close(&self) -> Result<(), ModuleError>;
}

pub trait LocalIpPoolFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModuleError::IpPool`] if no usable address can be found.
    fn create(&self, spec: &IpPoolSpec) -> Result<Box<dyn LocalIpPool>, ModuleError>;
}
