//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, module bootstrapping, and lifecycle
//! orchestration.
//!
//! # Submodules
//!
//! - [`bootstrap`] - One initializer per module, plus the collaborator set
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - Operator use-cases behind the CLI
//! - [`orchestration`] - Boot sequencing, readiness, and shutdown

pub mod bootstrap;
pub mod config;
pub mod operator;
pub mod orchestration;
