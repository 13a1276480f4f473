//! Configuration use-cases.

use crate::error::Result;

/// Configuration text handed over by an inbound adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigInput {
    /// Where the text came from, for display only.
    pub origin: String,
    /// `None` when nothing exists at `origin`; built-in defaults apply.
    pub toml: Option<String>,
}

impl ConfigInput {
    #[must_use]
    pub fn found(origin: impl Into<String>, toml: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            toml: Some(toml.into()),
        }
    }

    #[must_use]
    pub fn missing(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            toml: None,
        }
    }

    #[must_use]
    pub fn uses_defaults(&self) -> bool {
        self.toml.is_none()
    }

    /// Human-readable origin of the effective configuration.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.uses_defaults() {
            "built-in defaults (file not found)".to_string()
        } else {
            self.origin.clone()
        }
    }
}

/// Effective configuration with defaults applied and secrets masked.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub source: String,
    pub toml: String,
    pub json: serde_json::Value,
}

/// Configuration use-cases exposed to operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Documented configuration written by `config init`.
    fn config_template(&self) -> &'static str;

    /// Parse, validate, and render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or fails validation.
    fn show_config(&self, input: &ConfigInput) -> Result<EffectiveConfig>;
}
