use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the module dispatch framework.
///
/// Module code works with [`anyhow::Error`]; anything it returns that is not
/// one of the framework kinds below ends up in [`Error::Module`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate module name '{name}' (registered as {variants:?})")]
    DuplicateModuleName { name: String, variants: Vec<String> },

    #[error("module '{module}' declares option '--{option}' more than once")]
    DuplicateOption { module: String, option: String },

    #[error("module '{0}' not found")]
    ModuleNotFound(String),

    #[error("given host is empty")]
    EmptyTarget,

    #[error("failed to read host file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to resolve '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("kerberos authentication requested but {0} is not set")]
    MissingEnvironment(&'static str),

    #[error("invalid input type, expected {expected}")]
    InvalidInput { expected: &'static str },

    #[error(transparent)]
    Module(#[from] anyhow::Error),
}

impl Error {
    /// Recovers a framework error carried inside a module's `anyhow::Error`.
    pub fn from_module(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(inner) => inner,
            Err(other) => Error::Module(other),
        }
    }

    pub(crate) fn resolution(host: &str, reason: impl ToString) -> Self {
        Error::Resolution {
            host: host.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_errors_survive_anyhow() {
        let wrapped: anyhow::Error = Error::EmptyTarget.into();
        assert!(matches!(Error::from_module(wrapped), Error::EmptyTarget));
    }

    #[test]
    fn foreign_errors_become_module_errors() {
        let err = Error::from_module(anyhow::anyhow!("share denied"));
        assert!(matches!(err, Error::Module(_)));
        assert_eq!(err.to_string(), "share denied");
    }
}
