//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Accepted values for `logs.level`.
pub const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Accepted values for `logs.format`.
pub const LOG_FORMATS: [&str; 3] = ["text", "pretty", "json"];

/// `[logs]` section.
///
/// `level` and `format` are kept as strings and checked by the logging
/// initializer, so a bad value surfaces as a logging module failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogsConfig {
    pub level: String,
    /// Empty means standard output.
    pub output_path: String,
    pub file_enabled: bool,
    pub file_path: String,
    /// Megabytes.
    pub max_size: u64,
    pub max_backups: u32,
    pub compress: bool,
    pub format: String,
    pub show_caller: bool,
}

impl LogsConfig {
    /// True when `level` is one of [`LOG_LEVELS`].
    #[must_use]
    pub fn has_valid_level(&self) -> bool {
        LOG_LEVELS.contains(&self.level.as_str())
    }

    /// True when `format` is one of [`LOG_FORMATS`].
    #[must_use]
    pub fn has_valid_format(&self) -> bool {
        LOG_FORMATS.contains(&self.format.as_str())
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            output_path: String::new(),
            file_enabled: true,
            file_path: "./logs/crawler.log".into(),
            max_size: 100,
            max_backups: 10,
            compress: true,
            format: "text".into(),
            show_caller: true,
        }
    }
}
