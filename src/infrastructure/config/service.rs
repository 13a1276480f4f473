//! Service-level sections: crawler defaults, server, status reporting and
//! system identity.

use serde::{Deserialize, Serialize};

/// `[crawler]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Seconds.
    pub default_timeout: u64,
    pub max_retries: u32,
    /// Seconds.
    pub retry_interval: u64,
    pub protocol_priority: Vec<String>,
    pub protocol_fallback: bool,
    pub concurrency: usize,
    /// Requests per second; zero means unlimited.
    pub rate_limit: u32,
    pub queue_enabled: bool,
    pub queue_size: usize,
    pub deduplication_enabled: bool,
    /// Seconds.
    pub deduplication_ttl: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_timeout: 30,
            max_retries: 3,
            retry_interval: 2,
            protocol_priority: vec!["http3".into(), "http2".into(), "http1.1".into()],
            protocol_fallback: true,
            concurrency: 10,
            rate_limit: 0,
            queue_enabled: true,
            queue_size: 1000,
            deduplication_enabled: false,
            deduplication_ttl: 3600,
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub quic_enabled: bool,
    pub max_clients: usize,
    /// Seconds.
    pub client_timeout: u64,
    pub client_auth_enabled: bool,
    pub client_cert_path: String,
    pub access_log_enabled: bool,
    pub access_log_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8443".into(),
            quic_enabled: true,
            max_clients: 1000,
            client_timeout: 300,
            client_auth_enabled: false,
            client_cert_path: String::new(),
            access_log_enabled: true,
            access_log_path: "./logs/access.log".into(),
        }
    }
}

/// `[status_report]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusReportConfig {
    /// Seconds.
    pub report_interval: u64,
    pub report_on_change: bool,
    pub report_client_details: bool,
    pub report_ip_list: bool,
    pub max_report_ips: usize,
    pub compress_data: bool,
}

impl Default for StatusReportConfig {
    fn default() -> Self {
        Self {
            report_interval: 5,
            report_on_change: true,
            report_client_details: true,
            report_ip_list: true,
            max_report_ips: 1000,
            compress_data: false,
        }
    }
}

/// `[system]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemInfoConfig {
    pub name: String,
    pub version: String,
    pub work_dir: String,
    pub data_dir: String,
    pub performance_monitoring: bool,
    /// Seconds.
    pub performance_interval: u64,
    pub health_check_enabled: bool,
    pub health_check_port: u16,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Default for SystemInfoConfig {
    fn default() -> Self {
        Self {
            name: "crawler-system".into(),
            version: "1.0.0".into(),
            work_dir: "./".into(),
            data_dir: "./data".into(),
            performance_monitoring: true,
            performance_interval: 60,
            health_check_enabled: true,
            health_check_port: 8080,
            metrics_enabled: true,
            metrics_port: 9090,
        }
    }
}
