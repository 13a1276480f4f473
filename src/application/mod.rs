//! Application services.
//!
//! - [`gate`] - Lock-protected whitelist/blacklist gate
//! - [`monitor`] - Periodic whitelist watchdog task

pub mod gate;
pub mod monitor;
