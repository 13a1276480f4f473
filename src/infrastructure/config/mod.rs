//! Infrastructure configuration modules.
//!
//! One file per TOML section; [`settings::SystemConfig`] aggregates them.

pub mod certificate;
pub mod conn;
pub mod connectivity;
pub mod dns;
pub mod fingerprint;
pub mod ip_pool;
pub mod ip_status;
pub mod logging;
pub mod pool;
pub mod service;
pub mod settings;
