//! Operator entry point.

use crate::infrastructure::bootstrap::collaborators::Collaborators;
use crate::infrastructure::orchestration::orchestrator::Orchestrator;

/// Operator implementation backed by a collaborator set. Every boot gets a
/// fresh orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Operator {
    collaborators: Collaborators,
}

impl Operator {
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub(super) fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.collaborators.clone())
    }
}
