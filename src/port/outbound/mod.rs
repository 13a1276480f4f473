//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! One contract per external collaborator the bootstrap sequence consumes:
//! logging, domain DNS monitoring, the local IP pool, certificates, and the
//! TCP/QUIC connection pools.

pub mod certs;
pub mod conn_pool;
pub mod dns;
pub mod ip_pool;
pub mod logger;
