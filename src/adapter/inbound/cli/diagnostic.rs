//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are shown with the offending part of the file
//! underlined, instead of a bare line/column message.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as ConfigLoadError, Error};
use crate::port::inbound::operator::configuration::ConfigInput;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(crawler::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a TOML parse failure in `src`.
    #[must_use]
    pub fn from_toml(name: impl AsRef<str>, src: &str, error: &toml::de::Error) -> Self {
        let (offset, len) = error
            .span()
            .map_or((0, 0), |span| (span.start, span.end.saturating_sub(span.start)));
        Self::new(error.message(), name, src, offset, len)
            .with_help("see config.toml.example (or run `crawler config init`) for the expected layout")
    }
}

/// Turn a load failure into a source-annotated diagnostic when possible.
///
/// Only TOML parse errors carry a location; everything else returns `None`
/// and is reported as a plain error.
#[must_use]
pub fn config_diagnostic(input: &ConfigInput, error: &Error) -> Option<ConfigError> {
    let Error::Config(ConfigLoadError::Parse(parse)) = error else {
        return None;
    };
    let src = input.toml.as_deref()?;
    Some(ConfigError::from_toml(&input.origin, src, parse))
}

/// Print a diagnostic for `error` to stderr, if it has one.
pub fn report_config_error(input: &ConfigInput, error: &Error) {
    if let Some(diagnostic) = config_diagnostic(input, error) {
        eprintln!("{:?}", miette::Report::new(diagnostic));
    }
}
