//! TCP and QUIC connection pool ports.

use std::net::TcpStream;
use std::time::Duration;

use crate::error::ModuleError;

/// Per-connection socket options applied by dialers. Zero timeouts are unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialSettings {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// `None` when keep-alive is off.
    pub keep_alive: Option<Duration>,
    /// Idle connections a pool keeps per destination.
    pub max_idle_conns: usize,
}

/// Resolved TCP pool parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpPoolSettings {
    pub max_connections: usize,
    pub min_connections: usize,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub health_check_interval: Duration,
    pub health_check_timeout: Duration,
}

/// Resolved QUIC client pool parameters.
///
/// Capacity is clamped so the pool always holds at least one connection and
/// the maximum never drops below the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuicPoolSettings {
    pub min_capacity: usize,
    pub max_capacity: usize,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub handshake_timeout: Duration,
    pub enable_0rtt: bool,
}

/// Connection pool bound to one destination.
///
/// The pool is blocking: `acquire` may wait on a dial for up to the acquire
/// timeout. Async callers run it under `tokio::task::spawn_blocking`.
pub trait TcpPool: Send + Sync {
    /// `host:port` this pool dials.
    fn destination(&self) -> &str;

    /// Take an idle connection or dial a new one. Blocks while dialing.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Pool`] when the pool is closed or exhausted, or
    /// the dial fails.
    fn acquire(&self) -> Result<TcpStream, ModuleError>;

    /// Hand a connection back for reuse.
    fn release(&self, stream: TcpStream);

    fn idle_count(&self) -> usize;

    /// # Errors
    ///
    /// Returns [`ModuleError::Pool`] if any pooled connection fails to close.
    fn close(&self) -> Result<(), ModuleError>;
}

pub trait TcpPoolFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModuleError::Pool`] if the destination is unusable.
    fn create(
        &self,
        destination: &str,
        settings: &TcpPoolSettings,
        dial: &DialSettings,
    ) -> Result<Box<dyn TcpPool>, ModuleError>;
}

/// Client-side QUIC pool with fixed capacity bounds.
pub trait QuicPool: Send + Sync {
    fn settings(&self) -> &QuicPoolSettings;

    fn is_closed(&self) -> bool;

    /// Release every connection. Never fails.
    fn close(&self);
}

pub trait QuicPoolFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModuleError::Pool`] if the pool cannot be constructed.
    fn create(&self, settings: &QuicPoolSettings) -> Result<Box<dyn QuicPool>, ModuleError>;
}
