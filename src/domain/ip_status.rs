//! IP membership status as seen by the whitelist/blacklist gate.

use std::fmt;

use serde::Serialize;

/// Membership of a single IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IpStatus {
    Whitelisted,
    Blacklisted,
    Unknown,
}

impl IpStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whitelisted => "whitelist",
            Self::Blacklisted => "blacklist",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
