//! Configuration and startup diagnostic command handlers.

pub mod config;
pub mod startup;
