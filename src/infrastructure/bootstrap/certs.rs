//! Certificate initializer.

use std::path::PathBuf;

use super::shared::warn;
use crate::domain::record::RecordBuilder;
use crate::error::ModuleError;
use crate::infrastructure::config::certificate::CertificateConfig;
use crate::infrastructure::orchestration::handle::CertificateHandle;
use crate::port::outbound::certs::{CertificateManagerFactory, CertificateStoreSpec};
use crate::port::outbound::logger::Logger;

/// Build the manager spec from `[certificate]`.
#[must_use]
pub fn store_spec(config: &CertificateConfig) -> CertificateStoreSpec {
    CertificateStoreSpec {
        storage_path: PathBuf::from(&config.cert_storage_path),
        provider: config.provider,
        self_signed_validity_days: config.self_signed_validity_days,
        include_local_ip: config.auto_detect_local_ip,
    }
}

/// Build the certificate manager and try to obtain the server certificate.
///
/// A certificate that cannot be obtained now is a warning; it is requested
/// again on first use.
///
/// # Errors
///
/// Returns the factory's error when the manager cannot be built.
pub fn initialize(
    factory: &dyn CertificateManagerFactory,
    config: &CertificateConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<CertificateHandle, ModuleError> {
    let manager = factory.create(&store_spec(config))?;
    let domain = config.server_domain.trim().to_string();

    record
        .detail("domain", &domain)
        .detail("provider", config.provider)
        .detail("storage", &config.cert_storage_path)
        .detail("auto_renewal", config.auto_renewal);

    let certificate = match manager.get_or_request_certificate(&domain) {
        Ok(certificate) => {
            if let Some(expires) = certificate.not_after {
                record.detail("expires", expires.format("%Y-%m-%d"));
            }
            record.summary(format!("{} certificate for {domain}", config.provider));
            logger.info(&format!("Certificate ready for {domain}"));
            Some(certificate)
        }
        Err(e) => {
            warn(
                logger,
                record,
                format!("certificate for {domain} unavailable ({e}); will be requested on first use"),
            );
            record.summary(format!("{} manager ready, certificate pending", config.provider));
            None
        }
    };

    Ok(CertificateHandle {
        manager,
        server_domain: domain,
        certificate,
    })
}
