//! IP connectivity test configuration: pool tests and blacklist recovery.
//!
//! The tests themselves run outside this crate. The target domain list is
//! also consumed by the DNS initializer.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by each target domain in test URLs.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// HTTP method used by connectivity tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestMethod {
    Get,
    #[default]
    Head,
}

/// `[ip_pool_test]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IpPoolTestConfig {
    pub target_domains: Vec<String>,
    /// URL template; `{domain}` is replaced by each target domain.
    pub test_url: String,
    pub test_method: TestMethod,
    pub max_concurrent: usize,
    /// Seconds.
    pub test_timeout: u64,
    pub retry_count: u32,
    /// Seconds.
    pub retry_interval: u64,
    /// Seconds.
    pub test_interval: u64,
    pub use_fingerprint: bool,
    pub success_status_codes: Vec<u16>,
    pub forbidden_status_codes: Vec<u16>,
}

impl IpPoolTestConfig {
    /// Expand the URL template for one domain.
    #[must_use]
    pub fn url_for(&self, domain: &str) -> String {
        self.test_url.replace(DOMAIN_PLACEHOLDER, domain)
    }
}

impl Default for IpPoolTestConfig {
    fn default() -> Self {
        Self {
            target_domains: Vec::new(),
            test_url: "https://{domain}/".into(),
            test_method: TestMethod::Head,
            max_concurrent: 10,
            test_timeout: 10,
            retry_count: 2,
            retry_interval: 5,
            test_interval: 300,
            use_fingerprint: true,
            success_status_codes: vec![200, 201, 202, 204],
            forbidden_status_codes: vec![403],
        }
    }
}

/// `[blacklist_recovery]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BlacklistRecoveryConfig {
    pub enabled: bool,
    /// Seconds.
    pub check_interval: u64,
    /// Seconds between retests of one IP.
    pub ip_test_interval: u64,
    pub max_concurrent: usize,
    /// Seconds.
    pub test_timeout: u64,
    pub test_url: String,
    pub test_method: TestMethod,
    pub use_fingerprint: bool,
}

impl Default for BlacklistRecoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval: 1800, // 30 minutes
            ip_test_interval: 3600, // 1 hour
            max_concurrent: 5,
            test_timeout: 10,
            test_url: "https://{domain}/".into(),
            test_method: TestMethod::Head,
            use_fingerprint: true,
        }
    }
}
