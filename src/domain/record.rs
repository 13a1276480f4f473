//! Structured outcome of a single module initialization.
//!
//! Every initializer produces one [`InitRecord`]. Records are append-only
//! during boot and read-only afterwards; human-readable output is rendered
//! from them rather than printed while initializing.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::module::ModuleKind;

/// How a module came out of initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitOutcome {
    /// The module handle is live.
    Ready,
    /// The module is configured; its resource is built on first use.
    Deferred,
    /// The module was intentionally not created.
    Skipped,
    /// The initializer returned an error.
    Failed,
}

impl InitOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Deferred => "deferred",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    /// True for every outcome that lets boot continue.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Per-module initialization record.
#[derive(Debug, Clone, Serialize)]
pub struct InitRecord {
    pub module: ModuleKind,
    pub outcome: InitOutcome,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
    pub summary: String,
    pub warnings: Vec<String>,
    pub details: Vec<(String, String)>,
}

impl InitRecord {
    /// Look up a detail value by key.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}

/// Collects details and warnings while an initializer runs.
///
/// The orchestrator creates one builder per step and finishes it with the
/// step's outcome, so initializers only describe what they did.
#[derive(Debug)]
pub struct RecordBuilder {
    module: ModuleKind,
    started: Instant,
    outcome: InitOutcome,
    summary: Option<String>,
    warnings: Vec<String>,
    details: Vec<(String, String)>,
}

impl RecordBuilder {
    #[must_use]
    pub fn start(module: ModuleKind) -> Self {
        Self {
            module,
            started: Instant::now(),
            outcome: InitOutcome::Ready,
            summary: None,
            warnings: Vec::new(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn module(&self) -> ModuleKind {
        self.module
    }

    /// Add a key/value detail shown in the boot summary.
    pub fn detail(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    /// Add a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>) -> &mut Self {
        self.warnings.push(message.into());
        self
    }

    /// Override the default `ready` outcome.
    pub fn outcome(&mut self, outcome: InitOutcome) -> &mut Self {
        self.outcome = outcome;
        self
    }

    /// One-line summary of the step.
    pub fn summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = Some(summary.into());
        self
    }

    /// Finish a step that returned successfully.
    #[must_use]
    pub fn finish(self) -> InitRecord {
        let summary = self
            .summary
            .unwrap_or_else(|| format!("{} {}", self.module.label(), self.outcome.as_str()));
        InitRecord {
            module: self.module,
            outcome: self.outcome,
            elapsed: self.started.elapsed(),
            completed_at: Utc::now(),
            summary,
            warnings: self.warnings,
            details: self.details,
        }
    }

    /// Finish a step that returned an error.
    #[must_use]
    pub fn fail(self, cause: &dyn std::error::Error) -> InitRecord {
        InitRecord {
            module: self.module,
            outcome: InitOutcome::Failed,
            elapsed: self.started.elapsed(),
            completed_at: Utc::now(),
            summary: cause.to_string(),
            warnings: self.warnings,
            details: self.details,
        }
    }
}
