//! Blocking TCP pool and QUIC client pool handle.

use std::collections::VecDeque;
use std::io;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::ModuleError;
use crate::port::outbound::conn_pool::{
    DialSettings, QuicPool, QuicPoolFactory, QuicPoolSettings, TcpPool, TcpPoolFactory,
    TcpPoolSettings,
};

const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(10);

struct IdleConn {
    stream: TcpStream,
    returned_at: Instant,
}

/// Pool of plain TCP connections to one `host:port`.
///
/// `open` counts every connection the pool is responsible for, idle or
/// checked out, and never exceeds `max_connections`.
///
/// Dialing uses `std::net` and blocks the calling thread for up to the
/// connect timeout. From async code, call `acquire` inside
/// `tokio::task::spawn_blocking`.
pub struct DialingTcpPool {
    destination: String,
    settings: TcpPoolSettings,
    dial: DialSettings,
    idle: Mutex<VecDeque<IdleConn>>,
    open: AtomicUsize,
    closed: AtomicBool,
}

impl std::fmt::Debug for DialingTcpPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialingTcpPool")
            .field("destination", &self.destination)
            .field("open", &self.open.load(Ordering::Relaxed))
            .field("idle", &self.idle.lock().len())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl DialingTcpPool {
    #[must_use]
    pub fn new(destination: &str, settings: TcpPoolSettings, dial: DialSettings) -> Self {
        Self {
            destination: destination.to_string(),
            settings,
            dial,
            idle: Mutex::new(VecDeque::new()),
            open: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Connections currently owned by the pool, idle or in use.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.load(Ordering::Acquire)
    }

    fn take_idle(&self) -> Option<TcpStream> {
        let mut idle = self.idle.lock();
        while let Some(conn) = idle.pop_front() {
            if conn.returned_at.elapsed() < self.settings.idle_timeout {
                return Some(conn.stream);
            }
            let _ = conn.stream.shutdown(Shutdown::Both);
            self.open.fetch_sub(1, Ordering::AcqRel);
        }
        None
    }

    fn reserve_slot(&self) -> Result<(), ModuleError> {
        self.open
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |open| {
                (open < self.settings.max_connections).then_some(open + 1)
            })
            .map(|_| ())
            .map_err(|_| {
                ModuleError::Pool(format!(
                    "{}: all {} connections in use",
                    self.destination, self.settings.max_connections
                ))
            })
    }

    fn dial(&self) -> Result<TcpStream, ModuleError> {
        let addrs: Vec<SocketAddr> = self
            .destination
            .to_socket_addrs()
            .map_err(|e| ModuleError::Pool(format!("{}: {e}", self.destination)))?
            .collect();

        // The dial may not outlast the acquire budget. Zero means unset.
        let timeout = [self.dial.connect_timeout, self.settings.acquire_timeout]
            .into_iter()
            .filter(|t| !t.is_zero())
            .min()
            .unwrap_or(DEFAULT_DIAL_TIMEOUT);
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    configure(&stream, &self.dial)?;
                    debug!(destination = %self.destination, %addr, "Dialed connection");
                    return Ok(stream);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(ModuleError::Pool(match last_error {
            Some(e) => format!("{}: {e}", self.destination),
            None => format!("{}: no addresses", self.destination),
        }))
    }
}

fn configure(stream: &TcpStream, dial: &DialSettings) -> io::Result<()> {
    stream.set_nodelay(true)?;
    stream.set_read_timeout(Some(dial.read_timeout).filter(|t| !t.is_zero()))?;
    stream.set_write_timeout(Some(dial.write_timeout).filter(|t| !t.is_zero()))?;
    Ok(())
}

impl TcpPool for DialingTcpPool {
    fn destination(&self) -> &str {
        &self.destination
    }

    fn acquire(&self) -> Result<TcpStream, ModuleError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ModuleError::Pool(format!("{}: pool is closed", self.destination)));
        }
        if let Some(stream) = self.take_idle() {
            return Ok(stream);
        }

        self.reserve_slot()?;
        self.dial().map_err(|e| {
            self.open.fetch_sub(1, Ordering::AcqRel);
            e
        })
    }

    fn release(&self, stream: TcpStream) {
        if !self.closed.load(Ordering::Acquire) {
            let mut idle = self.idle.lock();
            if idle.len() < self.dial.max_idle_conns.max(1) {
                idle.push_back(IdleConn {
                    stream,
                    returned_at: Instant::now(),
                });
                return;
            }
        }
        let _ = stream.shutdown(Shutdown::Both);
        self.open.fetch_sub(1, Ordering::AcqRel);
    }

    fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn close(&self) -> Result<(), ModuleError> {
        self.closed.store(true, Ordering::Release);
        let drained: Vec<IdleConn> = self.idle.lock().drain(..).collect();

        let mut failures = 0usize;
        for conn in drained {
            self.open.fetch_sub(1, Ordering::AcqRel);
            match conn.stream.shutdown(Shutdown::Both) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
                Err(e) => {
                    warn!(destination = %self.destination, error = %e, "Failed to close connection");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            return Err(ModuleError::Pool(format!(
                "{}: {failures} connection(s) failed to close",
                self.destination
            )));
        }
        Ok(())
    }
}

/// Builds [`DialingTcpPool`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialingTcpPoolFactory;

impl TcpPoolFactory for DialingTcpPoolFactory {
    fn create(
        &self,
        destination: &str,
        settings: &TcpPoolSettings,
        dial: &DialSettings,
    ) -> Result<Box<dyn TcpPool>, ModuleError> {
        let valid = destination
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !valid {
            return Err(ModuleError::Pool(format!(
                "destination '{destination}' must be host:port"
            )));
        }
        Ok(Box::new(DialingTcpPool::new(
            destination,
            settings.clone(),
            dial.clone(),
        )))
    }
}

/// QUIC client pool handle holding the resolved capacity bounds.
///
/// Connections are opened by the crawler's QUIC transport on demand; this
/// handle owns the limits and the closed flag they check.
#[derive(Debug)]
pub struct QuicClientPool {
    settings: QuicPoolSettings,
    closed: AtomicBool,
}

impl QuicClientPool {
    #[must_use]
    pub fn new(settings: QuicPoolSettings) -> Self {
        Self {
            settings,
            closed: AtomicBool::new(false),
        }
    }
}

impl QuicPool for QuicClientPool {
    fn settings(&self) -> &QuicPoolSettings {
        &self.settings
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Builds [`QuicClientPool`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuicClientPoolFactory;

impl QuicPoolFactory for QuicClientPoolFactory {
    fn create(&self, settings: &QuicPoolSettings) -> Result<Box<dyn QuicPool>, ModuleError> {
        if settings.min_capacity == 0 || settings.max_capacity < settings.min_capacity {
            return Err(ModuleError::Pool(format!(
                "invalid QUIC capacity {}..{}",
                settings.min_capacity, settings.max_capacity
            )));
        }
        Ok(Box::new(QuicClientPool::new(settings.clone())))
    }
}
