//! Error types for signal-cli-bindgen

use std::fmt;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Position of a syntax node in an upstream source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path relative to the upstream root
    pub path: String,
    /// 1-based line number
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// Generator errors
///
/// Every variant aborts the generation run; nothing is retried and no
/// partial output is written.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Code parse error: {0}")]
    CodeParse(String),

    /// A statement, call or type shape not covered by the pattern tables
    #[error("Unrecognized syntax at {location}: {message}")]
    UnrecognizedSyntax { location: Location, message: String },

    /// The extracted model violates an internal consistency check
    #[error("Inconsistent model in {declaration}: {message}")]
    InconsistentModel {
        declaration: String,
        message: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

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
    pub(crate) fn syntax(location: Location, message: impl Into<String>) -> Self {
        Error::UnrecognizedSyntax {
            location,
            message: message.into(),
        }
    }

    pub(crate) fn inconsistent(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InconsistentModel {
            declaration: declaration.into(),
            message: message.into(),
        }
    }
}
