//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::path::Path;

use crate::domain::certificate::CertificateProvider;
use crate::infrastructure::config::settings::SystemConfig;

/// Configuration that boots every module against fakes or local resources:
/// one target domain, a fixed IPv4 address, self-signed certificates under
/// `dir`, lenient gate.
pub fn test_config(dir: &Path) -> SystemConfig {
    let mut config = SystemConfig::default();
    config.ip_pool_test.target_domains = vec!["example.com".to_string()];
    config.domain_dns.ipinfo_token = "test-token".to_string();
    config.local_ip_pool.ips = vec!["192.0.2.10".to_string()];
    config.certificate.provider = CertificateProvider::SelfSigned;
    config.certificate.cert_storage_path = dir.join("certs").to_string_lossy().to_string();
    config.certificate.auto_detect_local_ip = false;
    config.ip_status.allow_start_when_empty = true;
    config.logs.file_enabled = false;
    config
}
