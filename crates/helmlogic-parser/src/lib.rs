//! helmlogic Parser - condition text to expression tree
//!
//! This crate turns condition strings such as `(DEPLOY = true) and (SPEED > 1.5)`
//! into `helmlogic_core::Node` trees and wraps them in [`Condition`] objects
//! that can be bound to variable values and evaluated.

pub mod condition;
pub mod conditional_param;
pub mod error;
pub mod node_parser;
pub mod splitter;
pub mod validate;

// Re-export main parser types
pub use condition::Condition;
pub use conditional_param::{is_conditional_param_string, ConditionalParam};
pub use error::{ParseError, Result};
pub use node_parser::ConditionParser;
pub use splitter::{split_relation, Split};
