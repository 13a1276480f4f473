//! System configuration loading and validation.
//!
//! Provides the [`SystemConfig`] aggregate of every module section.
//! Configuration is loaded from a TOML file; a missing file falls back to the
//! embedded defaults. Secrets such as the IPInfo token may come from the
//! environment instead of the file.
//!
//! # Example
//!
//! ```no_run
//! use crawler_system::infrastructure::config::settings::SystemConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SystemConfig::load("config.toml")?;
//!     println!("log level: {}", config.logs.level);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::certificate::{CertificateConfig, MAX_SELF_SIGNED_VALIDITY_DAYS};
use super::conn::ConnConfig;
use super::dns::{DomainDnsConfig, IPINFO_TOKEN_ENV};
use super::fingerprint::FingerprintConfig;
use super::ip_pool::LocalIpPoolConfig;
use super::ip_status::IpStatusConfig;
use super::logging::{LogsConfig, LOG_FORMATS, LOG_LEVELS};
use super::pool::{NetConnPoolConfig, QuicConfig};
use super::connectivity::{BlacklistRecoveryConfig, IpPoolTestConfig, DOMAIN_PLACEHOLDER};
use super::service::{CrawlerConfig, ServerConfig, StatusReportConfig, SystemInfoConfig};
use crate::error::{ConfigError, Result};

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// The file was absent; embedded defaults are in effect.
    Embedded,
}

/// Complete system configuration.
///
/// Immutable once loaded. Each module initializer reads only its own section;
/// the DNS initializer additionally receives `ip_pool_test.target_domains`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub logs: LogsConfig,

    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    #[serde(default, rename = "domaindns")]
    pub domain_dns: DomainDnsConfig,

    #[serde(default)]
    pub local_ip_pool: LocalIpPoolConfig,

    #[serde(default)]
    pub conn: ConnConfig,

    #[serde(default)]
    pub netconnpool: NetConnPoolConfig,

    #[serde(default)]
    pub quic: QuicConfig,

    #[serde(default)]
    pub certificate: CertificateConfig,

    #[serde(default)]
    pub ip_status: IpStatusConfig,

    /// Connectivity test settings; also the owner of the DNS target domain list.
    #[serde(default)]
    pub ip_pool_test: IpPoolTestConfig,

    #[serde(default)]
    pub blacklist_recovery: BlacklistRecoveryConfig,

    #[serde(default)]
    pub status_report: StatusReportConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub system: SystemInfoConfig,
}

impl SystemConfig {
    /// Parse configuration from TOML content.
    ///
    /// Sections and keys that are absent take their defaults. The IPInfo token
    /// is overridden by the `IPINFO_TOKEN` environment variable when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: the embedded defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is malformed,
    /// or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Load configuration and report whether the file or the defaults were used.
    ///
    /// # Errors
    ///
    /// Same as [`SystemConfig::load`].
    pub fn load_with_source<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::parse_toml(&content)?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok((Self::embedded(), ConfigSource::Embedded))
            }
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Built-in defaults with environment overrides applied, used when no
    /// configuration file exists.
    #[must_use]
    pub fn embedded() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Render the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e).into())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(IPINFO_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.domain_dns.ipinfo_token = token;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// Intervals are only required to be positive when the feature that uses
    /// them is enabled; disabled features are still type-checked by parsing.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        if !self.logs.has_valid_level() {
            return Err(ConfigError::InvalidValue {
                field: "logs.level",
                reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
            }
            .into());
        }
        if !self.logs.has_valid_format() {
            return Err(ConfigError::InvalidValue {
                field: "logs.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if self.logs.file_enabled && self.logs.file_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logs.file_path",
            }
            .into());
        }

        if self.fingerprint.enable_rotation && self.fingerprint.rotation_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fingerprint.rotation_interval",
                reason: "must be greater than 0 when rotation is enabled".to_string(),
            }
            .into());
        }

        if self.domain_dns.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "domaindns.timeout",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.domain_dns.refresh_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "domaindns.refresh_interval",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        for ip in &self.local_ip_pool.ips {
            if ip.trim().parse::<Ipv4Addr>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "local_ip_pool.ips",
                    reason: format!("'{ip}' is not an IPv4 address"),
                }
                .into());
            }
        }
        if self.local_ip_pool.health_check_enabled && self.local_ip_pool.health_check_interval == 0
        {
            return Err(ConfigError::InvalidValue {
                field: "local_ip_pool.health_check_interval",
                reason: "must be greater than 0 when health checks are enabled".to_string(),
            }
            .into());
        }

        if self.netconnpool.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "netconnpool.max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.netconnpool.initial_connections > self.netconnpool.max_connections {
            return Err(ConfigError::InvalidValue {
                field: "netconnpool.initial_connections",
                reason: "must be <= max_connections".to_string(),
            }
            .into());
        }

        if self.certificate.server_domain.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "certificate.server_domain",
            }
            .into());
        }
        if self.certificate.auto_renewal && self.certificate.renewal_check_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "certificate.renewal_check_interval",
                reason: "must be greater than 0 when auto renewal is enabled".to_string(),
            }
            .into());
        }

        if !(1..=MAX_SELF_SIGNED_VALIDITY_DAYS).contains(&self.certificate.self_signed_validity_days) {
            return Err(ConfigError::InvalidValue {
                field: "certificate.self_signed_validity_days",
                reason: format!("must be between 1 and {MAX_SELF_SIGNED_VALIDITY_DAYS}"),
            }
            .into());
        }

        if self.ip_status.whitelist_monitoring && self.ip_status.whitelist_monitoring_interval == 0
        {
            return Err(ConfigError::InvalidValue {
                field: "ip_status.whitelist_monitoring_interval",
                reason: "must be greater than 0 when monitoring is enabled".to_string(),
            }
            .into());
        }

        validate_test_url("ip_pool_test.test_url", &self.ip_pool_test.test_url)?;
        if self.blacklist_recovery.enabled {
            if self.blacklist_recovery.check_interval == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "blacklist_recovery.check_interval",
                    reason: "must be greater than 0 when recovery is enabled".to_string(),
                }
                .into());
            }
            validate_test_url("blacklist_recovery.test_url", &self.blacklist_recovery.test_url)?;
        }

        Ok(())
    }
}

fn validate_test_url(field: &'static str, template: &str) -> Result<()> {
    let candidate = template.replace(DOMAIN_PLACEHOLDER, "example.com");
    url::Url::parse(&candidate).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::domain::certificate::CertificateProvider;
    use crate::domain::selection::SelectionStrategy;

    fn assert_invalid(result: Result<SystemConfig>, expected: &str) {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected);
            }
            Err(other) => panic!("expected invalid {expected}, got {other}"),
            Ok(_) => panic!("expected invalid {expected}, got Ok"),
        }
    }

    #[test]
    fn defaults_pass_validation() {
        SystemConfig::default().validate().unwrap();
    }

    #[test]
    fn default_dns_servers_are_public_resolvers() {
        let config = SystemConfig::default();
        assert_eq!(
            config.domain_dns.dns_servers,
            vec!["8.8.8.8", "8.8.4.4", "1.1.1.1", "1.0.0.1"]
        );
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = SystemConfig::parse_toml("").unwrap();
        let mut expected = SystemConfig::default();
        expected.domain_dns.ipinfo_token = config.domain_dns.ipinfo_token.clone();
        assert_eq!(config, expected);
    }

    #[test]
    fn parses_representative_keys() {
        let toml = r#"
[logs]
level = "debug"

[fingerprint]
selection_strategy = "least_used"

[domaindns]
dns_servers = ["9.9.9.9"]

[local_ip_pool]
selection_strategy = "random"
ips = ["192.0.2.10"]

[certificate]
provider = "self-signed"

[ip_status]
min_whitelist_count = 3
allow_start_when_empty = false
"#;
        let config = SystemConfig::parse_toml(toml).unwrap();

        assert_eq!(config.logs.level, "debug");
        assert_eq!(
            config.fingerprint.selection_strategy,
            SelectionStrategy::LeastUsed
        );
        assert_eq!(config.domain_dns.dns_servers, vec!["9.9.9.9"]);
        assert_eq!(
            config.local_ip_pool.selection_strategy,
            SelectionStrategy::Random
        );
        assert_eq!(config.certificate.provider, CertificateProvider::SelfSigned);
        assert_eq!(config.ip_status.min_whitelist_count, 3);
        assert!(!config.ip_status.allow_start_when_empty);
        // Untouched sections keep their defaults.
        assert_eq!(config.netconnpool.max_connections, 100);
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert_invalid(
            SystemConfig::parse_toml("[logs]\nlevel = \"loud\"\n"),
            "logs.level",
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert_invalid(
            SystemConfig::parse_toml("[logs]\nformat = \"xml\"\n"),
            "logs.format",
        );
    }

    #[test]
    fn rejects_negative_numbers_as_parse_errors() {
        let result = SystemConfig::parse_toml("[conn]\nconnect_timeout = -1\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn rejects_self_signed_validity_outside_ten_years() {
        assert_invalid(
            SystemConfig::parse_toml("[certificate]\nself_signed_validity_days = 4294967295\n"),
            "certificate.self_signed_validity_days",
        );
        assert_invalid(
            SystemConfig::parse_toml("[certificate]\nself_signed_validity_days = 0\n"),
            "certificate.self_signed_validity_days",
        );
        assert!(SystemConfig::parse_toml("[certificate]\nself_signed_validity_days = 3650\n").is_ok());
    }

    #[test]
    fn rejects_bad_ipv4_entries() {
        assert_invalid(
            SystemConfig::parse_toml("[local_ip_pool]\nips = [\"not-an-ip\"]\n"),
            "local_ip_pool.ips",
        );
    }

    #[test]
    fn zero_interval_is_fine_when_feature_disabled() {
        let toml = r#"
[fingerprint]
enable_rotation = false
rotation_interval = 0

[ip_status]
whitelist_monitoring = false
whitelist_monitoring_interval = 0
"#;
        SystemConfig::parse_toml(toml).unwrap();
    }

    #[test]
    fn zero_interval_is_rejected_when_feature_enabled() {
        assert_invalid(
            SystemConfig::parse_toml(
                "[ip_status]\nwhitelist_monitoring = true\nwhitelist_monitoring_interval = 0\n",
            ),
            "ip_status.whitelist_monitoring_interval",
        );
    }

    #[test]
    fn rejects_initial_above_max_tcp_connections() {
        assert_invalid(
            SystemConfig::parse_toml(
                "[netconnpool]\nmax_connections = 2\ninitial_connections = 5\n",
            ),
            "netconnpool.initial_connections",
        );
    }

    #[test]
    fn rejects_unparsable_test_url() {
        assert_invalid(
            SystemConfig::parse_toml("[ip_pool_test]\ntest_url = \"not a url\"\n"),
            "ip_pool_test.test_url",
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) =
            SystemConfig::load_with_source(dir.path().join("absent.toml")).unwrap();

        assert_eq!(source, ConfigSource::Embedded);
        assert_eq!(config.logs, LogsConfig::default());
    }

    #[test]
    fn rendered_toml_parses_back() {
        let config = SystemConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: SystemConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
