//! Logger that keeps every line in memory.

use std::sync::Arc;

use parking_lot::Mutex;

use super::fakes::Faults;
use super::journal::Journal;
use crate::domain::module::ModuleKind;
use crate::error::ModuleError;
use crate::port::outbound::logger::{InstalledLogger, LogSpec, Logger, LoggerFactory};

/// Keeps `(level, message)` pairs.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().clone()
    }

    /// Messages logged at `level` (`debug`, `info`, `warn`, `error`).
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.lines.lock().push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

/// Hands out one shared [`RecordingLogger`] and journals `install logging`.
#[derive(Debug, Clone)]
pub struct RecordingLoggerFactory {
    journal: Journal,
    logger: Arc<RecordingLogger>,
    fail: bool,
    reuse_existing: bool,
}

impl RecordingLoggerFactory {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            logger: Arc::new(RecordingLogger::default()),
            fail: false,
            reuse_existing: false,
        }
    }

    pub fn with_faults(journal: Journal, faults: &Faults) -> Self {
        Self {
            fail: faults.fails_create(ModuleKind::Logging),
            ..Self::new(journal)
        }
    }

    /// Report that a backend was already installed.
    pub fn reusing_existing(mut self) -> Self {
        self.reuse_existing = true;
        self
    }

    pub fn logger(&self) -> Arc<RecordingLogger> {
        Arc::clone(&self.logger)
    }
}

impl LoggerFactory for RecordingLoggerFactory {
    fn install(&self, _spec: &LogSpec) -> Result<InstalledLogger, ModuleError> {
        self.journal.record("install logging");
        if self.fail {
            return Err(ModuleError::Logging("injected install failure".into()));
        }
        Ok(InstalledLogger {
            logger: self.logger.clone(),
            sinks: vec!["memory".to_string()],
            reused_existing: self.reuse_existing,
        })
    }
}
