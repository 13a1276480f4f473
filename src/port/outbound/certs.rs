//! Certificate manager port.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::certificate::CertificateProvider;
use crate::error::ModuleError;

/// A PEM-encoded certificate with its private key.
#[derive(Clone, PartialEq, Eq)]
pub struct Certificate {
    pub domain: String,
    pub cert_pem: String,
    pub key_pem: String,
    pub not_after: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Certificate")
            .field("domain", &self.domain)
            .field("not_after", &self.not_after)
            .finish_non_exhaustive()
    }
}

/// Construction parameters for a certificate manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateStoreSpec {
    pub storage_path: PathBuf,
    pub provider: CertificateProvider,
    /// Lifetime of generated self-signed certificates, in days.
    pub self_signed_validity_days: u32,
    /// Add the routed local address to self-signed certificates.
    pub include_local_ip: bool,
}

pub trait CertificateManager: Send + Sync {
    /// Return the stored certificate for `domain`, requesting one if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Certificate`] if no certificate is stored and
    /// none can be obtained right now.
    fn get_or_request_certificate(&self, domain: &str) -> Result<Certificate, ModuleError>;
}

pub trait CertificateManagerFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manager cannot be constructed, for example when
    /// the storage directory is unusable.
    fn create(
        &self,
        spec: &CertificateStoreSpec,
    ) -> Result<Box<dyn CertificateManager>, ModuleError>;
}
