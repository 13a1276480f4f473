//! Logging port.
//!
//! Module initializers log through this narrow capability rather than a
//! concrete backend, so they can be exercised with a recording logger.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ModuleError;

/// Leveled logging sink, safe to share across threads.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Line layout of the installed backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Pretty,
    Json,
}

impl LogFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked backend parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSpec {
    /// One of `debug`, `info`, `warn`, `error`.
    pub level: String,
    pub format: LogFormat,
    /// `None` means standard output.
    pub output_path: Option<PathBuf>,
    /// Extra file sink; `None` when file logging is off.
    pub file_path: Option<PathBuf>,
    pub show_caller: bool,
}

/// Outcome of installing a logging backend.
pub struct InstalledLogger {
    pub logger: Arc<dyn Logger>,
    /// Human-readable destinations, e.g. `stdout` or a file path.
    pub sinks: Vec<String>,
    /// True when a backend was already installed and was kept as-is.
    pub reused_existing: bool,
}

impl std::fmt::Debug for InstalledLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledLogger")
            .field("sinks", &self.sinks)
            .field("reused_existing", &self.reused_existing)
            .finish_non_exhaustive()
    }
}

/// Builds the process logger.
pub trait LoggerFactory: Send + Sync {
    /// Install the backend described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Logging`] when the backend rejects the spec, or
    /// [`ModuleError::Io`] when a log file cannot be opened.
    fn install(&self, spec: &LogSpec) -> Result<InstalledLogger, ModuleError>;
}
