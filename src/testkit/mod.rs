//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`journal`] - Ordered log of collaborator calls.
//! - [`logger`] - [`RecordingLogger`](logger::RecordingLogger) and its factory.
//! - [`fakes`] - Fake collaborator factories with injectable faults.
//! - [`config`] - Canonical test configurations (no network, temp dirs).

pub mod config;
pub mod fakes;
pub mod journal;
pub mod logger;
