//! Operator-facing inbound ports consumed by CLI adapters.
//!
//! Adapters hand configuration over as TOML text, so nothing here depends on
//! how or where it was stored.

pub mod configuration;
pub mod diagnostic;
pub mod port;
pub mod runtime;
