//! Adapters (hexagonal).
//!
//! - [`inbound`] - Command-line interface
//! - [`outbound`] - Default implementations of the collaborator ports

pub mod inbound;
pub mod outbound;
