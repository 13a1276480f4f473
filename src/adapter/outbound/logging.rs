//! `tracing`-backed logging adapter.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ModuleError;
use crate::port::outbound::logger::{InstalledLogger, LogFormat, LogSpec, Logger, LoggerFactory};

/// Target used for every line logged through the [`Logger`] port.
pub const MODULE_TARGET: &str = "crawler_system::module";

/// Forwards [`Logger`] calls to `tracing`.
///
/// The `module` field comes from the span the orchestrator opens around each
/// initializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: MODULE_TARGET, "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: MODULE_TARGET, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: MODULE_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: MODULE_TARGET, "{message}");
    }
}

/// Installs the global `tracing` subscriber described by a [`LogSpec`].
///
/// `RUST_LOG` takes precedence over the spec's level. If a global subscriber is
/// already installed it is kept and reported through
/// [`InstalledLogger::reused_existing`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    fn install(&self, spec: &LogSpec) -> Result<InstalledLogger, ModuleError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&spec.level)
                .map_err(|e| ModuleError::Logging(format!("level '{}': {e}", spec.level)))?,
        };

        let mut sinks = Vec::new();
        let primary: BoxMakeWriter = match &spec.output_path {
            None => {
                sinks.push("stdout".to_string());
                BoxMakeWriter::new(std::io::stdout)
            }
            Some(path) => {
                sinks.push(path.display().to_string());
                BoxMakeWriter::new(Mutex::new(open_append(path)?))
            }
        };

        let writer = match &spec.file_path {
            Some(path) => {
                let file = open_append(path)?;
                sinks.push(path.display().to_string());
                BoxMakeWriter::new(primary.and(Mutex::new(file)))
            }
            None => primary,
        };

        let ansi = spec.output_path.is_none() && spec.file_path.is_none();
        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_file(spec.show_caller)
            .with_line_number(spec.show_caller);

        let installed = match spec.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Text => builder.try_init(),
        };

        Ok(InstalledLogger {
            logger: Arc::new(TracingLogger),
            sinks,
            reused_existing: installed.is_err(),
        })
    }
}

/// Open `path` for appending, creating missing parent directories.
fn open_append(path: &Path) -> Result<File, ModuleError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
