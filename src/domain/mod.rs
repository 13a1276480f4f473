//! Domain types shared by the bootstrap and the gate.
//!
//! - [`module`] - Module identities and the fixed boot order
//! - [`record`] - Initialization records and their builder
//! - [`ip_status`] - Whitelist/blacklist membership status
//! - [`selection`] - Pool selection strategies
//! - [`certificate`] - Certificate sources
//! - [`health`] - Readiness checks and report
//! - [`shutdown`] - Per-module release steps

pub mod certificate;
pub mod health;
pub mod ip_status;
pub mod module;
pub mod record;
pub mod selection;
pub mod shutdown;
