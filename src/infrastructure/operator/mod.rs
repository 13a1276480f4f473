//! Operator implementations for inbound adapters.

pub mod config;
pub mod diagnostic;
pub mod entry;
pub mod runtime;

mod shared;
