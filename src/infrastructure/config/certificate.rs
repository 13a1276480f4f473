//! Server certificate configuration.

use serde::{Deserialize, Serialize};

use crate::domain::certificate::CertificateProvider;

/// Upper bound for `self_signed_validity_days` (ten years).
pub const MAX_SELF_SIGNED_VALIDITY_DAYS: u32 = 3650;

/// ACME directory used for Let's Encrypt issuance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LetsEncryptEnvironment {
    #[default]
    Production,
    Staging,
}

/// `[certificate]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CertificateConfig {
    pub server_domain: String,
    pub cert_storage_path: String,
    pub provider: CertificateProvider,
    pub auto_renewal: bool,
    /// Hours between renewal checks.
    pub renewal_check_interval: u64,
    pub renewal_before_days: u32,
    #[serde(rename = "letsencrypt_email")]
    pub letsencrypt_email: String,
    #[serde(rename = "letsencrypt_environment")]
    pub letsencrypt_environment: LetsEncryptEnvironment,
    pub auto_detect_local_ip: bool,
    pub self_signed_validity_days: u32,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            server_domain: "crawler.example.com".into(),
            cert_storage_path: "./certs".into(),
            provider: CertificateProvider::LetsEncrypt,
            auto_renewal: true,
            renewal_check_interval: 24,
            renewal_before_days: 30,
            letsencrypt_email: "admin@example.com".into(),
            letsencrypt_environment: LetsEncryptEnvironment::Production,
            auto_detect_local_ip: true,
            self_signed_validity_days: 365,
        }
    }
}
