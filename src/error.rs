//! Error types for suitegen

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// suitegen errors
#[derive(Error, Debug)]
pub enum Error {
    /// A specification field failed validation
    #[error("Invalid specification: {field} {reason}")]
    Validation { field: String, reason: String },

    /// Two members of one specification share a name
    #[error("Duplicate member name '{name}' in specification '{subject}'")]
    DuplicateMemberName { subject: String, name: String },

    /// Framework identifier not present in the registry
    #[error("Unknown framework '{0}' (expected one of: pytest, unittest, jest, junit)")]
    UnknownFramework(String),

    /// Persisting a rendered suite failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Spec parse error: {0}")]
    SpecParse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the error stems from caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::DuplicateMemberName { .. }
                | Error::UnknownFramework(_)
                | Error::SpecParse(_)
                | Error::Json(_)
                | Error::Yaml(_)
        )
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
