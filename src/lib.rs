//! Crawler system - bootstrap orchestrator and IP whitelist gate.
//!
//! Brings the nine infrastructure modules of a crawling platform up in a
//! fixed order, keeps a lock-protected whitelist/blacklist of egress IPs,
//! and tears everything down again in reverse.
//!
//! # Architecture
//!
//! - [`domain`] - Module identities, boot order, init records, IP status
//! - [`port`] - Collaborator traits (outbound) and the gate contract (inbound)
//! - [`application`] - The status gate and the whitelist monitor
//! - [`adapter`] - Default collaborators and the `crawler` CLI
//! - [`infrastructure`] - Configuration, module initializers, orchestration
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use crawler_system::infrastructure::config::settings::SystemConfig;
//! use crawler_system::infrastructure::orchestration::orchestrator::Orchestrator;
//!
//! fn main() -> crawler_system::error::Result<()> {
//!     let config = SystemConfig::load("config.toml")?;
//!     let mut orchestrator = Orchestrator::default();
//!     orchestrator.initialize(&config)?;
//!     orchestrator.check_system_health()?;
//!     orchestrator.close().into_result()
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
