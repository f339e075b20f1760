//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Condition text failed to parse
    #[error("Parse error: {0}")]
    ParseError(#[from] helmlogic_parser::ParseError),

    /// Invalid mode declaration
    #[error("Invalid mode declaration for '{variable}': {message}")]
    InvalidMode { variable: String, message: String },

    /// Condition rejected while building a buffer
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
