//! Shutdown reporting.

use std::time::Duration;

use serde::Serialize;

use crate::domain::module::ModuleKind;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// Explicitly closed.
    Released,
    /// Background work halted; the handle itself is dropped.
    Stopped,
    /// Nothing to release beyond dropping the handle.
    Dropped,
    /// The module had no handle.
    Absent,
    Failed,
}

impl ReleaseOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Stopped => "stopped",
            Self::Dropped => "dropped",
            Self::Absent => "absent",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShutdownStep {
    pub module: ModuleKind,
    pub outcome: ReleaseOutcome,
    pub error: Option<String>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}

/// What a shutdown did for each module, in the order it was done.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShutdownReport {
    pub steps: Vec<ShutdownStep>,
}

impl ShutdownReport {
    #[must_use]
    pub fn step(&self, module: ModuleKind) -> Option<&ShutdownStep> {
        self.steps.iter().find(|step| step.module == module)
    }

    /// Modules whose release failed.
    #[must_use]
    pub fn failed(&self) -> Vec<ModuleKind> {
        self.steps
            .iter()
            .filter(|step| step.outcome == ReleaseOutcome::Failed)
            .map(|step| step.module)
            .collect()
    }

    /// Steps that closed or stopped something.
    #[must_use]
    pub fn released_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| {
                matches!(
                    step.outcome,
                    ReleaseOutcome::Released | ReleaseOutcome::Stopped
                )
            })
            .count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed().is_empty()
    }

    /// # Errors
    ///
    /// Returns [`Error::Shutdown`] listing every module that failed to release.
    pub fn into_result(self) -> Result<()> {
        let failed = self.failed();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::Shutdown { failed })
        }
    }
}
