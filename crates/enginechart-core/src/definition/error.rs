//! Error types for definition file parsing

use thiserror::Error;

/// Errors that can occur while reading or querying an engine definition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Missing required key '{0}'")]
    MissingKey(String),

    #[error("Value for '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} out of range for '{key}' (length {len})")]
    IndexOutOfRange { key: String, index: usize, len: usize },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
