//! Outbound adapters (driven side).
//!
//! Default collaborator implementations wired by
//! [`Collaborators::default`](crate::infrastructure::bootstrap::collaborators::Collaborators).

pub mod certs;
pub mod conn_pool;
pub mod dns;
pub mod ip_pool;
pub mod logging;
