//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`gate`]: the whitelist/blacklist gate used by crawl-result processors,
//!   the whitelist monitor, and the CLI
//! - [`operator`]: configuration, diagnostic, and runtime use-cases driven by
//!   the CLI

pub mod gate;
pub mod operator;
