//! Trait definitions (hexagonal ports).
//!
//! Ports define the seams between the bootstrap core and the collaborators
//! it drives or is driven by.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!      CLI ─────────▶│  Orchestrator + Gate    │
//!                    └────────────┬────────────┘
//!                                 │
//!     ┌──────────┬──────────┬─────┴─────┬───────────┬──────────┐
//!     ▼          ▼          ▼           ▼           ▼          ▼
//! ┌────────┐ ┌───────┐ ┌─────────┐ ┌─────────┐ ┌────────┐ ┌────────┐
//! │ Logger │ │  DNS  │ │ IP pool │ │  Certs  │ │  TCP   │ │  QUIC  │
//! └────────┘ └───────┘ └─────────┘ └─────────┘ └────────┘ └────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`inbound::gate::IpStatusGate`] - Whitelist/blacklist gate operations
//! - [`inbound::operator::port::OperatorPort`] - Operator commands driven by the CLI
//! - [`outbound::logger::Logger`], [`outbound::logger::LoggerFactory`] - Leveled logging
//! - [`outbound::dns::DomainMonitor`] - Background domain resolution
//! - [`outbound::ip_pool::LocalIpPool`] - Local source addresses
//! - [`outbound::certs::CertificateManager`] - Server certificates
//! - [`outbound::conn_pool::TcpPool`], [`outbound::conn_pool::QuicPool`] - Connection pools

pub mod inbound;
pub mod outbound;
