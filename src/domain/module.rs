//! Module identities and the fixed boot order.

use std::fmt;

use serde::Serialize;

/// The nine modules the orchestrator brings up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Logging,
    Fingerprint,
    DomainDns,
    LocalIpPool,
    Certificates,
    IpStatus,
    Conn,
    TcpPool,
    QuicPool,
}

/// Boot order. Logging comes first because every later initializer is handed
/// the logger; the pools come last because they build on connection defaults.
pub const BOOT_ORDER: [ModuleKind; 9] = [
    ModuleKind::Logging,
    ModuleKind::Fingerprint,
    ModuleKind::DomainDns,
    ModuleKind::LocalIpPool,
    ModuleKind::Certificates,
    ModuleKind::IpStatus,
    ModuleKind::Conn,
    ModuleKind::TcpPool,
    ModuleKind::QuicPool,
];

impl ModuleKind {
    /// Stable name used in logs, records and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logging => "logging",
            Self::Fingerprint => "fingerprint",
            Self::DomainDns => "domain_dns",
            Self::LocalIpPool => "local_ip_pool",
            Self::Certificates => "certificates",
            Self::IpStatus => "ip_status",
            Self::Conn => "conn",
            Self::TcpPool => "tcp_pool",
            Self::QuicPool => "quic_pool",
        }
    }

    /// Human-readable label for operator-facing output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Logging => "Logging",
            Self::Fingerprint => "Fingerprint",
            Self::DomainDns => "DNS monitor",
            Self::LocalIpPool => "Local IP pool",
            Self::Certificates => "Certificates",
            Self::IpStatus => "IP status gate",
            Self::Conn => "Connection defaults",
            Self::TcpPool => "TCP pool",
            Self::QuicPool => "QUIC pool",
        }
    }

    /// Position in [`BOOT_ORDER`].
    #[must_use]
    pub fn boot_position(self) -> usize {
        BOOT_ORDER
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(BOOT_ORDER.len())
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
