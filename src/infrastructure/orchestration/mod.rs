//! Boot orchestration.
//!
//! - [`orchestrator`] - Fail-fast initialization and ownership of handles
//! - [`handle`] - Module handles and two-phase pool handles
//! - [`health`] - Readiness report
//! - [`shutdown`] - Best-effort teardown in reverse boot order

pub mod handle;
pub mod health;
pub mod orchestrator;
pub mod shutdown;
