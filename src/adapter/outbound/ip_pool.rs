//! Local IP pool built from configured or detected addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::Rng;
use tracing::debug;

use crate::domain::selection::SelectionStrategy;
use crate::error::ModuleError;
use crate::port::outbound::ip_pool::{IpPoolSpec, LocalIpPool, LocalIpPoolFactory};

// Connecting a UDP socket sends nothing; it only asks the kernel which local
// address would route to the peer.
pub(crate) const ROUTE_TARGET_V4: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);
const ROUTE_TARGET_V6: SocketAddr = SocketAddr::new(
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888)),
    80,
);

/// Fixed IPv4 set plus whatever global IPv6 address the host routes through.
#[derive(Debug)]
pub struct StaticIpPool {
    ipv4: Vec<Ipv4Addr>,
    ipv6: Vec<Ipv6Addr>,
    strategy: SelectionStrategy,
    cursor: AtomicUsize,
    usage: Mutex<Vec<u64>>,
    closed: AtomicBool,
}

impl StaticIpPool {
    #[must_use]
    pub fn new(ipv4: Vec<Ipv4Addr>, ipv6: Vec<Ipv6Addr>, strategy: SelectionStrategy) -> Self {
        let usage = vec![0; ipv4.len()];
        Self {
            ipv4,
            ipv6,
            strategy,
            cursor: AtomicUsize::new(0),
            usage: Mutex::new(usage),
            closed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl LocalIpPool for StaticIpPool {
    fn ipv4_addresses(&self) -> Vec<String> {
        self.ipv4.iter().map(ToString::to_string).collect()
    }

    fn active_ipv6_addresses(&self) -> Vec<String> {
        self.ipv6.iter().map(ToString::to_string).collect()
    }

    fn supports_dynamic_pool(&self) -> bool {
        !self.ipv6.is_empty()
    }

    fn next_ipv4(&self) -> Option<Ipv4Addr> {
        if self.ipv4.is_empty() || self.closed.load(Ordering::Acquire) {
            return None;
        }

        // Pick and count under one lock so concurrent least-used picks spread.
        let mut usage = self.usage.lock();
        let index = match self.strategy {
            SelectionStrategy::RoundRobin => {
                self.cursor.fetch_add(1, Ordering::Relaxed) % self.ipv4.len()
            }
            SelectionStrategy::Random => rand::thread_rng().gen_range(0..self.ipv4.len()),
            SelectionStrategy::LeastUsed => usage
                .iter()
                .enumerate()
                .min_by_key(|(_, count)| **count)
                .map_or(0, |(index, _)| index),
        };
        usage[index] += 1;
        Some(self.ipv4[index])
    }

    fn close(&self) -> Result<(), ModuleError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

/// Local address the kernel would use to reach `target`, if any.
pub(crate) fn routed_local_address(target: SocketAddr) -> Option<IpAddr> {
    let bind: SocketAddr = match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(bind).ok()?;
    socket.connect(target).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

fn is_global_v6(addr: &Ipv6Addr) -> bool {
    let first = addr.segments()[0];
    !addr.is_loopback()
        && !addr.is_unspecified()
        && (first & 0xffc0) != 0xfe80 // link-local
        && (first & 0xfe00) != 0xfc00 // unique local
}

fn parse_ipv4_list(ips: &[String]) -> Result<Vec<Ipv4Addr>, ModuleError> {
    ips.iter()
        .map(|ip| {
            ip.trim()
                .parse::<Ipv4Addr>()
                .map_err(|_| ModuleError::IpPool(format!("'{ip}' is not an IPv4 address")))
        })
        .collect()
}

/// Builds [`StaticIpPool`]s, detecting addresses when none are configured.
///
/// Detection falls back to the loopback address when the host has no route
/// to the public internet.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectingIpPoolFactory;

impl LocalIpPoolFactory for DetectingIpPoolFactory {
    fn create(&self, spec: &IpPoolSpec) -> Result<Box<dyn LocalIpPool>, ModuleError> {
        let ipv4 = if spec.ipv4.is_empty() {
            let detected = match routed_local_address(ROUTE_TARGET_V4) {
                Some(IpAddr::V4(addr)) if !addr.is_unspecified() => addr,
                _ => Ipv4Addr::LOCALHOST,
            };
            debug!(address = %detected, "Detected local IPv4 address");
            vec![detected]
        } else {
            parse_ipv4_list(&spec.ipv4)?
        };

        let ipv6 = match routed_local_address(ROUTE_TARGET_V6) {
            Some(IpAddr::V6(addr)) if is_global_v6(&addr) => vec![addr],
            _ => Vec::new(),
        };

        Ok(Box::new(StaticIpPool::new(
            ipv4,
            ipv6,
            spec.strategy,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(strategy: SelectionStrategy) -> StaticIpPool {
        StaticIpPool::new(
            vec![Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)],
            Vec::new(),
            strategy,
        )
    }

    fn spec(ipv4: Vec<String>) -> IpPoolSpec {
        IpPoolSpec {
            ipv4,
            strategy: SelectionStrategy::RoundRobin,
        }
    }

    #[test]
    fn round_robin_cycles_through_addresses() {
        let pool = pool(SelectionStrategy::RoundRobin);
        let picks: Vec<_> = (0..4).filter_map(|_| pool.next_ipv4()).collect();

        assert_eq!(picks[0], picks[2]);
        assert_eq!(picks[1], picks[3]);
        assert_ne!(picks[0], picks[1]);
    }

    #[test]
    fn least_used_balances_picks() {
        let pool = pool(SelectionStrategy::LeastUsed);
        let picks: Vec<_> = (0..4).filter_map(|_| pool.next_ipv4()).collect();

        let first = picks.iter().filter(|ip| **ip == picks[0]).count();
        assert_eq!(first, 2);
    }

    #[test]
    fn concurrent_least_used_picks_stay_balanced() {
        let pool = std::sync::Arc::new(pool(SelectionStrategy::LeastUsed));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let pool = std::sync::Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        pool.next_ipv4().unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(*pool.usage.lock(), vec![500, 500]);
    }

    #[test]
    fn random_picks_from_configured_set() {
        let pool = pool(SelectionStrategy::Random);
        for _ in 0..16 {
            let ip = pool.next_ipv4().unwrap();
            assert!(pool.ipv4.contains(&ip));
        }
    }

    #[test]
    fn closed_pool_hands_out_nothing() {
        let pool = pool(SelectionStrategy::RoundRobin);
        pool.close().unwrap();

        assert!(pool.is_closed());
        assert_eq!(pool.next_ipv4(), None);
    }

    #[test]
    fn factory_uses_configured_addresses() {
        let pool = DetectingIpPoolFactory
            .create(&spec(vec!["192.0.2.10".into(), " 192.0.2.11 ".into()]))
            .unwrap();

        assert_eq!(pool.ipv4_addresses(), vec!["192.0.2.10", "192.0.2.11"]);
    }

    #[test]
    fn factory_rejects_bad_address() {
        assert!(matches!(
            DetectingIpPoolFactory.create(&spec(vec!["300.1.1.1".into()])),
            Err(ModuleError::IpPool(_))
        ));
    }

    #[test]
    fn detection_always_yields_an_address() {
        let pool = DetectingIpPoolFactory.create(&spec(Vec::new())).unwrap();
        assert_eq!(pool.ipv4_addresses().len(), 1);
    }

    #[test]
    fn link_local_v6_is_not_global() {
        assert!(!is_global_v6(&"fe80::1".parse().unwrap()));
        assert!(!is_global_v6(&"fd00::1".parse().unwrap()));
        assert!(is_global_v6(&"2001:db8::1".parse().unwrap()));
    }
}
