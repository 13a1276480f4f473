//! Configuration operator implementation.

use crate::error::Result;
use crate::port::inbound::operator::configuration::{
    ConfigInput, ConfigurationOperator, EffectiveConfig,
};

use super::{entry::Operator, shared};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../config.toml.example");

const MASK: &str = "********";

impl ConfigurationOperator for Operator {
    fn config_template(&self) -> &'static str {
        CONFIG_TEMPLATE
    }

    fn show_config(&self, input: &ConfigInput) -> Result<EffectiveConfig> {
        let mut config = shared::load_config(input)?;
        if !config.domain_dns.ipinfo_token.is_empty() {
            config.domain_dns.ipinfo_token = MASK.to_string();
        }

        Ok(EffectiveConfig {
            source: input.describe(),
            toml: config.to_toml()?,
            json: serde_json::to_value(&config)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::settings::SystemConfig;

    #[test]
    fn template_parses_to_defaults() {
        let config = SystemConfig::parse_toml(CONFIG_TEMPLATE).unwrap();
        let mut expected = SystemConfig::default();
        expected.domain_dns.ipinfo_token = config.domain_dns.ipinfo_token.clone();
        assert_eq!(config, expected);
    }

    #[test]
    fn show_masks_the_token() {
        let input = ConfigInput::found(
            "config.toml",
            "[domaindns]\nipinfo_token = \"super-secret\"\n\n[logs]\nlevel = \"warn\"\n",
        );

        let shown = Operator::default().show_config(&input).unwrap();

        assert!(shown.toml.contains("level = \"warn\""));
        assert!(shown.toml.contains(MASK));
        assert!(!shown.toml.contains("super-secret"));
        assert_eq!(shown.json["domaindns"]["ipinfo_token"], MASK);
        assert_eq!(shown.source, "config.toml");
    }
}
