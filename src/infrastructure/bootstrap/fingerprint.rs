//! Fingerprint initializer.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::record::RecordBuilder;
use crate::domain::selection::SelectionStrategy;
use crate::error::{ConfigError, ModuleError};
use crate::infrastructure::config::fingerprint::FingerprintConfig;
use crate::port::outbound::logger::Logger;

/// Resolved fingerprint selection parameters handed to crawl workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintProfile {
    pub strategy: SelectionStrategy,
    /// `None` when rotation is disabled.
    pub rotation: Option<Duration>,
    /// `None` means the bundled library.
    pub library_path: Option<PathBuf>,
    /// Empty means every browser.
    pub browsers: Vec<String>,
    pub os_randomization: bool,
    pub ua_randomization: bool,
}

impl FingerprintProfile {
    /// # Errors
    ///
    /// Returns an invalid-value error for a zero rotation interval with
    /// rotation enabled, or a library path that does not exist.
    pub fn from_config(config: &FingerprintConfig) -> Result<Self, ConfigError> {
        let rotation = if config.enable_rotation {
            if config.rotation_interval == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "fingerprint.rotation_interval",
                    reason: "must be positive when rotation is enabled".into(),
                });
            }
            Some(Duration::from_secs(config.rotation_interval))
        } else {
            None
        };

        let library_path = match config.library_path.trim() {
            "" => None,
            path => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::InvalidValue {
                        field: "fingerprint.library_path",
                        reason: format!("{} does not exist", path.display()),
                    });
                }
                Some(path)
            }
        };

        Ok(Self {
            strategy: config.selection_strategy,
            rotation,
            library_path,
            browsers: config.browsers.clone(),
            os_randomization: config.os_randomization,
            ua_randomization: config.ua_randomization,
        })
    }
}

/// # Errors
///
/// See [`FingerprintProfile::from_config`].
pub fn initialize(
    config: &FingerprintConfig,
    logger: &dyn Logger,
    record: &mut RecordBuilder,
) -> Result<FingerprintProfile, ModuleError> {
    let profile = FingerprintProfile::from_config(config)?;

    let rotation = profile
        .rotation
        .map_or_else(|| "off".to_string(), |every| format!("every {}s", every.as_secs()));
    record
        .detail("strategy", profile.strategy)
        .detail("rotation", &rotation)
        .summary(format!("{} selection, rotation {rotation}", profile.strategy));

    logger.info(&format!(
        "Fingerprint selection ready (strategy={}, rotation={rotation})",
        profile.strategy
    ));
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::testkit::logger::RecordingLogger;

    #[test]
    fn rotation_disabled_has_no_interval() {
        let config = FingerprintConfig {
            enable_rotation: false,
            rotation_interval: 0,
            ..FingerprintConfig::default()
        };
        let profile = FingerprintProfile::from_config(&config).unwrap();
        assert_eq!(profile.rotation, None);
    }

    #[test]
    fn zero_rotation_interval_is_rejected_when_enabled() {
        let config = FingerprintConfig {
            rotation_interval: 0,
            ..FingerprintConfig::default()
        };
        assert!(FingerprintProfile::from_config(&config).is_err());
    }

    #[test]
    fn missing_library_is_rejected() {
        let config = FingerprintConfig {
            library_path: "/nonexistent/fingerprints.json".into(),
            ..FingerprintConfig::default()
        };
        assert!(FingerprintProfile::from_config(&config).is_err());
    }

    #[test]
    fn initialize_records_strategy() {
        let logger = RecordingLogger::default();
        let mut record = RecordBuilder::start(ModuleKind::Fingerprint);

        let profile = initialize(&FingerprintConfig::default(), &logger, &mut record).unwrap();
        let record = record.finish();

        assert_eq!(profile.rotation, Some(Duration::from_secs(300)));
        assert_eq!(record.detail("strategy"), Some("random"));
        assert_eq!(logger.lines_at("info").len(), 1);
    }
}
