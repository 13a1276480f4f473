//! Module initializers and the collaborators they build on.
//!
//! Each initializer turns one configuration section into a live handle and
//! describes what it did on a
//! [`RecordBuilder`](crate::domain::record::RecordBuilder). Initializers
//! never read sections other than their own; the DNS initializer
//! additionally takes the target-domain list as an explicit argument.

pub mod certs;
pub mod collaborators;
pub mod conn;
pub mod dns;
pub mod fingerprint;
pub mod ip_pool;
pub mod ip_status;
pub mod logging;
pub mod quic_pool;
mod shared;
pub mod tcp_pool;
