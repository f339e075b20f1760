//! Parser error types

use helmlogic_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Empty condition text
    #[error("Empty condition")]
    Empty,

    /// Parentheses do not balance
    #[error("Unbalanced parentheses: {0}")]
    UnbalancedParens(String),

    /// A bare leaf where a relation was expected
    #[error("Expected a relation, found bare term: {0}")]
    BareLeaf(String),

    /// Left side of a comparison is not a legal variable name
    #[error("Invalid variable name: {0}")]
    InvalidVariable(String),

    /// Right side of a comparison is not a legal literal or variable reference
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Operand of and/or is not wrapped in parentheses
    #[error("Operand of '{connective}' must be parenthesized: {operand}")]
    UnparenthesizedOperand { connective: String, operand: String },

    /// `==` used where field matching is not enabled
    #[error("Double equals not allowed: {0}")]
    DoubleEqualsNotAllowed(String),

    /// Malformed conditional parameter line
    #[error("Invalid conditional parameter: {0}")]
    InvalidConditionalParam(String),

    /// Error from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
