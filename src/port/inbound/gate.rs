//! Whitelist/blacklist gate port.
//!
//! Driven by crawl-result processors (blacklisting after a forbidden
//! response), the periodic whitelist monitor, and the operator CLI.

use std::collections::HashSet;
use std::time::Duration;

use crate::domain::ip_status::IpStatus;
use crate::error::GateError;

/// Membership store plus the predicate that decides whether crawling may
/// begin.
///
/// Every operation is atomic with respect to the others. The whitelist and
/// blacklist are disjoint: inserting into one evicts the key from the other.
pub trait IpStatusGate: Send + Sync {
    /// Whitelist `ip` and drop it from the blacklist. Idempotent.
    fn add_to_whitelist(&self, ip: &str);

    /// Drop `ip` from the whitelist. `reason` is logged, not stored.
    fn remove_from_whitelist(&self, ip: &str, reason: &str);

    /// Blacklist `ip` with `reason` and drop it from the whitelist.
    /// Re-blacklisting overwrites the reason.
    fn add_to_blacklist(&self, ip: &str, reason: &str);

    fn status(&self, ip: &str) -> IpStatus;

    fn whitelist_ips(&self) -> HashSet<String>;

    fn whitelist_count(&self) -> usize;

    /// Fails with [`GateError::EmptyWhitelist`] exactly when the whitelist is
    /// empty and starting empty is not allowed. Has no side effects.
    ///
    /// # Errors
    ///
    /// See above.
    fn check_system_health(&self) -> Result<(), GateError>;

    // The setters below never re-evaluate health on their own.

    fn set_min_whitelist_count(&self, count: usize);

    fn set_allow_start_when_empty(&self, allow: bool);

    fn set_whitelist_monitoring(&self, enabled: bool);

    fn set_whitelist_monitoring_interval(&self, interval: Duration);
}
