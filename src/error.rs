use thiserror::Error;

use crate::domain::module::ModuleKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[source] toml::ser::Error),
}

/// Causes reported by module initializers and their collaborators.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("invalid logging configuration: {0}")]
    Logging(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DNS monitor error: {0}")]
    Dns(String),

    #[error("local IP pool error: {0}")]
    IpPool(String),

    #[error("certificate error: {0}")]
    Certificate(String),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Gate predicate failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("whitelist is empty and starting with an empty whitelist is not allowed")]
    EmptyWhitelist,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The single initialization failure: which module, and why.
    #[error("failed to initialize {module} module: {source}")]
    ModuleInit {
        module: ModuleKind,
        #[source]
        source: ModuleError,
    },

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("orchestrator is already initialized")]
    AlreadyInitialized,

    #[error("{0} module is not initialized")]
    NotInitialized(ModuleKind),

    #[error("operator is not installed")]
    OperatorNotInstalled,

    #[error("shutdown finished with failures in: {}", format_modules(.failed))]
    Shutdown { failed: Vec<ModuleKind> },

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn format_modules(modules: &[ModuleKind]) -> String {
    modules
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// The failing module when this is an initialization failure.
    #[must_use]
    pub fn failed_module(&self) -> Option<ModuleKind> {
        match self {
            Self::ModuleInit { module, .. } => Some(*module),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_init_error_names_module_and_cause() {
        let err = Error::ModuleInit {
            module: ModuleKind::DomainDns,
            source: ModuleError::Dns("no resolvers".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "failed to initialize domain_dns module: DNS monitor error: no resolvers"
        );
        assert_eq!(err.failed_module(), Some(ModuleKind::DomainDns));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn shutdown_error_lists_failed_modules() {
        let err = Error::Shutdown {
            failed: vec![ModuleKind::TcpPool, ModuleKind::LocalIpPool],
        };
        assert_eq!(
            err.to_string(),
            "shutdown finished with failures in: tcp_pool, local_ip_pool"
        );
        assert_eq!(err.failed_module(), None);
    }
}
