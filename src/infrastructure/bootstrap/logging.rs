//! Logging initializer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::record::RecordBuilder;
use crate::error::ModuleError;
use crate::infrastructure::config::logging::{LogsConfig, LOG_FORMATS, LOG_LEVELS};
use crate::port::outbound::logger::{LogFormat, LogSpec, Logger, LoggerFactory};

/// Check `[logs]` and turn it into a backend spec.
///
/// # Errors
///
/// Returns [`ModuleError::Logging`] for an unknown level or format.
pub fn log_spec(config: &LogsConfig) -> Result<LogSpec, ModuleError> {
    if !config.has_valid_level() {
        return Err(ModuleError::Logging(format!(
            "unknown level '{}', expected one of {}",
            config.level,
            LOG_LEVELS.join(", ")
        )));
    }
    let format = match config.format.as_str() {
        "text" => LogFormat::Text,
        "pretty" => LogFormat::Pretty,
        "json" => LogFormat::Json,
        other => {
            return Err(ModuleError::Logging(format!(
                "unknown format '{other}', expected one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
    };

    let output_path = match config.output_path.trim() {
        "" => None,
        path => Some(PathBuf::from(path)),
    };
    Ok(LogSpec {
        level: config.level.clone(),
        format,
        output_path,
        file_path: config
            .file_enabled
            .then(|| PathBuf::from(&config.file_path)),
        show_caller: config.show_caller,
    })
}

/// Install the process logger. Runs before anything else, so failures here
/// leave no other module touched.
///
/// # Errors
///
/// Returns [`ModuleError::Logging`] for an unknown level or format, or the
/// factory's error when the backend cannot be installed.
pub fn initialize(
    factory: &dyn LoggerFactory,
    config: &LogsConfig,
    record: &mut RecordBuilder,
) -> Result<Arc<dyn Logger>, ModuleError> {
    let spec = log_spec(config)?;
    let installed = factory.install(&spec)?;

    record
        .detail("level", &spec.level)
        .detail("format", spec.format)
        .detail("sinks", installed.sinks.join(", "))
        .summary(format!("{} level, {} format", spec.level, spec.format));
    if installed.reused_existing {
        let message = "a global logger was already installed and is kept";
        installed.logger.warn(message);
        record.warn(message);
    }

    installed.logger.info(&format!(
        "Logging initialized (level={}, format={})",
        spec.level, spec.format
    ));
    Ok(installed.logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleKind;
    use crate::domain::record::InitOutcome;
    use crate::testkit::journal::Journal;
    use crate::testkit::logger::RecordingLoggerFactory;

    #[test]
    fn unknown_level_fails_before_install() {
        let journal = Journal::default();
        let factory = RecordingLoggerFactory::new(journal.clone());
        let config = LogsConfig {
            level: "verbose".into(),
            ..LogsConfig::default()
        };

        let mut record = RecordBuilder::start(ModuleKind::Logging);
        let result = initialize(&factory, &config, &mut record);

        assert!(matches!(result, Err(ModuleError::Logging(_))));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let factory = RecordingLoggerFactory::new(Journal::default());
        let config = LogsConfig {
            format: "xml".into(),
            ..LogsConfig::default()
        };

        let mut record = RecordBuilder::start(ModuleKind::Logging);
        assert!(initialize(&factory, &config, &mut record).is_err());
    }

    #[test]
    fn spec_drops_disabled_file_sink_and_blank_output() {
        let spec = log_spec(&LogsConfig {
            file_enabled: false,
            output_path: "  ".into(),
            format: "json".into(),
            ..LogsConfig::default()
        })
        .unwrap();

        assert_eq!(spec.format, LogFormat::Json);
        assert_eq!(spec.output_path, None);
        assert_eq!(spec.file_path, None);
    }

    #[test]
    fn reused_backend_is_a_warning() {
        let factory = RecordingLoggerFactory::new(Journal::default()).reusing_existing();
        let mut record = RecordBuilder::start(ModuleKind::Logging);

        initialize(&factory, &LogsConfig::default(), &mut record).unwrap();
        let record = record.finish();

        assert_eq!(record.outcome, InitOutcome::Ready);
        assert_eq!(record.warnings.len(), 1);
        assert_eq!(record.detail("level"), Some("info"));
    }
}
