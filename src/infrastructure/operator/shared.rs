use crate::error::Result;
use crate::infrastructure::config::settings::SystemConfig;
use crate::port::inbound::operator::configuration::ConfigInput;

/// Effective configuration for `input`: the parsed text, or built-in
/// defaults when there is none.
pub(super) fn load_config(input: &ConfigInput) -> Result<SystemConfig> {
    match &input.toml {
        Some(text) => SystemConfig::parse_toml(text),
        None => Ok(SystemConfig::embedded()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_falls_back_to_defaults() {
        let config = load_config(&ConfigInput::missing("absent.toml")).unwrap();
        assert_eq!(config.logs, SystemConfig::default().logs);
        assert_eq!(config.ip_status, SystemConfig::default().ip_status);
    }

    #[test]
    fn present_text_is_validated() {
        let input = ConfigInput::found("config.toml", "[netconnpool]\nmax_connections = 0\n");
        assert!(load_config(&input).is_err());
    }
}
