//! Readiness reporting.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

#[derive(Debug, Clone)]
pub struct HealthCheck {
    name: &'static str,
    critical: bool,
    status: HealthStatus,
}

impl HealthCheck {
    #[must_use]
    pub fn new(name: &'static str, critical: bool, status: HealthStatus) -> Self {
        Self {
            name,
            critical,
            status,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    pub fn status(&self) -> &HealthStatus {
        &self.status
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Healthy)
    }

    /// Why the check failed, if it did.
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            HealthStatus::Healthy => None,
            HealthStatus::Unhealthy(reason) => Some(reason),
        }
    }
}

impl Serialize for HealthCheck {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("HealthCheck", 4)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("critical", &self.critical)?;
        state.serialize_field("healthy", &self.is_healthy())?;
        state.serialize_field("reason", &self.reason())?;
        state.end()
    }
}

/// Critical checks decide readiness; the rest only inform.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    checks: Vec<HealthCheck>,
}

impl HealthReport {
    #[must_use]
    pub fn new(checks: Vec<HealthCheck>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> &[HealthCheck] {
        &self.checks
    }

    pub fn check(&self, name: &str) -> Option<&HealthCheck> {
        self.checks.iter().find(|check| check.name == name)
    }

    pub fn is_healthy(&self) -> bool {
        self.checks
            .iter()
            .filter(|check| check.critical())
            .all(HealthCheck::is_healthy)
    }
}

impl Serialize for HealthReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("HealthReport", 2)?;
        state.serialize_field("healthy", &self.is_healthy())?;
        state.serialize_field("checks", &self.checks)?;
        state.end()
    }
}
