//! Domain DNS monitoring configuration.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `domaindns.ipinfo_token`.
pub const IPINFO_TOKEN_ENV: &str = "IPINFO_TOKEN";

/// `[domaindns]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DomainDnsConfig {
    pub dns_servers: Vec<String>,
    pub cache_enabled: bool,
    /// Seconds.
    pub cache_ttl: u64,
    /// Seconds per query.
    pub timeout: u64,
    pub max_retries: u32,
    /// Seconds.
    pub retry_interval: u64,
    pub pollution_detection: bool,
    pub ipv6_enabled: bool,
    #[serde(rename = "ipinfo_token")]
    pub ipinfo_token: String,
    /// Empty means the monitor's bundled server list.
    pub dns_server_file: String,
    /// Zero means every known server.
    pub max_servers: usize,
    /// Seconds between background refreshes.
    pub refresh_interval: u64,
}

impl DomainDnsConfig {
    /// The IPInfo token, if one is configured.
    #[must_use]
    pub fn ipinfo_token(&self) -> Option<&str> {
        let token = self.ipinfo_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

impl Default for DomainDnsConfig {
    fn default() -> Self {
        Self {
            dns_servers: vec![
                "8.8.8.8".into(),
                "8.8.4.4".into(),
                "1.1.1.1".into(),
                "1.0.0.1".into(),
            ],
            cache_enabled: true,
            cache_ttl: 3600,
            timeout: 5,
            max_retries: 3,
            retry_interval: 1,
            pollution_detection: true,
            ipv6_enabled: true,
            ipinfo_token: String::new(),
            dns_server_file: String::new(),
            max_servers: 0,
            refresh_interval: 300,
        }
    }
}
