//! On-disk certificate store with self-signed issuance.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, Utc};
use rcgen::{CertificateParams, KeyPair};
use tracing::info;

use super::ip_pool::{routed_local_address, ROUTE_TARGET_V4};
use crate::domain::certificate::CertificateProvider;
use crate::error::ModuleError;
use crate::port::outbound::certs::{
    Certificate, CertificateManager, CertificateManagerFactory, CertificateStoreSpec,
};

const CERT_FILE: &str = "cert.pem";
const KEY_FILE: &str = "key.pem";

/// Latest year an X.509 validity date can carry.
const LAST_ENCODABLE_YEAR: i32 = 9999;

/// Certificates stored as `<storage>/<domain>/{cert,key}.pem`.
///
/// Missing self-signed certificates are generated on request. Let's Encrypt
/// issuance is handled by an external ACME client that writes into the same
/// layout, so a missing Let's Encrypt certificate is reported as an error.
#[derive(Debug)]
pub struct LocalCertificateStore {
    storage: PathBuf,
    provider: CertificateProvider,
    validity_days: u32,
    include_local_ip: bool,
}

impl LocalCertificateStore {
    #[must_use]
    pub fn new(spec: &CertificateStoreSpec) -> Self {
        Self {
            storage: spec.storage_path.clone(),
            provider: spec.provider,
            validity_days: spec.self_signed_validity_days,
            include_local_ip: spec.include_local_ip,
        }
    }

    fn domain_dir(&self, domain: &str) -> PathBuf {
        self.storage.join(domain)
    }

    fn load(&self, domain: &str) -> Result<Option<Certificate>, ModuleError> {
        let dir = self.domain_dir(domain);
        let cert_pem = match read_optional(&dir.join(CERT_FILE))? {
            Some(pem) => pem,
            None => return Ok(None),
        };
        let key_pem = match read_optional(&dir.join(KEY_FILE))? {
            Some(pem) => pem,
            None => return Ok(None),
        };
        Ok(Some(Certificate {
            domain: domain.to_string(),
            cert_pem,
            key_pem,
            not_after: None,
        }))
    }

    fn issue_self_signed(&self, domain: &str) -> Result<Certificate, ModuleError> {
        let mut names = vec![domain.to_string()];
        if self.include_local_ip {
            if let Some(ip) = routed_local_address(ROUTE_TARGET_V4).filter(|ip| !ip.is_unspecified()) {
                names.push(ip.to_string());
            }
        }

        let now = Utc::now();
        let expires = now
            .checked_add_signed(Duration::days(i64::from(self.validity_days.max(1))))
            .filter(|expires| expires.year() <= LAST_ENCODABLE_YEAR)
            .ok_or_else(|| {
                ModuleError::Certificate(format!(
                    "validity of {} days ends past year {LAST_ENCODABLE_YEAR}",
                    self.validity_days
                ))
            })?;

        let mut params = CertificateParams::new(names).map_err(cert_error)?;
        params.not_before = rcgen::date_time_ymd(now.year(), now.month() as u8, now.day() as u8);
        params.not_after =
            rcgen::date_time_ymd(expires.year(), expires.month() as u8, expires.day() as u8);

        let key_pair = KeyPair::generate().map_err(cert_error)?;
        let cert = params.self_signed(&key_pair).map_err(cert_error)?;

        let certificate = Certificate {
            domain: domain.to_string(),
            cert_pem: cert.pem(),
            key_pem: key_pair.serialize_pem(),
            not_after: Some(expires),
        };
        self.persist(&certificate)?;

        info!(domain, days = self.validity_days, "Issued self-signed certificate");
        Ok(certificate)
    }

    fn persist(&self, certificate: &Certificate) -> Result<(), ModuleError> {
        let dir = self.domain_dir(&certificate.domain);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(CERT_FILE), &certificate.cert_pem)?;
        fs::write(dir.join(KEY_FILE), &certificate.key_pem)?;
        Ok(())
    }
}

impl CertificateManager for LocalCertificateStore {
    fn get_or_request_certificate(&self, domain: &str) -> Result<Certificate, ModuleError> {
        if let Some(certificate) = self.load(domain)? {
            return Ok(certificate);
        }

        match self.provider {
            CertificateProvider::SelfSigned => self.issue_self_signed(domain),
            CertificateProvider::LetsEncrypt => Err(ModuleError::Certificate(format!(
                "no certificate stored for {domain} under {}",
                self.storage.display()
            ))),
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, ModuleError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn cert_error(error: rcgen::Error) -> ModuleError {
    ModuleError::Certificate(error.to_string())
}

/// Builds [`LocalCertificateStore`]s, creating the storage directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalCertificateStoreFactory;

impl CertificateManagerFactory for LocalCertificateStoreFactory {
    fn create(
        &self,
        spec: &CertificateStoreSpec,
    ) -> Result<Box<dyn CertificateManager>, ModuleError> {
        fs::create_dir_all(&spec.storage_path).map_err(|e| {
            ModuleError::Certificate(format!(
                "cannot create storage directory {}: {e}",
                spec.storage_path.display()
            ))
        })?;
        Ok(Box::new(LocalCertificateStore::new(spec)))
    }
}
