//! Inbound operator accessor for CLI handlers.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ConfigError, Error, Result};
use crate::port::inbound::operator::configuration::ConfigInput;
use crate::port::inbound::operator::port::OperatorPort;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Returns the configured operator capability surface for CLI handlers.
///
/// # Errors
///
/// Returns [`Error::OperatorNotInstalled`] until [`install`] has run.
pub fn operator() -> Result<&'static dyn OperatorPort> {
    OPERATOR
        .get()
        .map(|operator| operator.as_ref())
        .ok_or(Error::OperatorNotInstalled)
}

/// Load config TOML from disk for operator-facing use-cases. A missing file
/// is not an error: the operator falls back to built-in defaults.
pub fn read_config_toml(path: &Path) -> Result<ConfigInput> {
    let origin = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(text) => Ok(ConfigInput::found(origin, text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigInput::missing(origin)),
        Err(e) => Err(ConfigError::ReadFile(e).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let input = read_config_toml(&dir.path().join("absent.toml")).unwrap();

        assert!(input.uses_defaults());
        assert!(input.origin.ends_with("absent.toml"));
    }

    #[test]
    fn present_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logs]\nlevel = \"warn\"\n").unwrap();

        let input = read_config_toml(&path).unwrap();

        assert_eq!(input.toml.as_deref(), Some("[logs]\nlevel = \"warn\"\n"));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_config_toml(dir.path()),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
