//! helmlogic Core - Core types for the helmlogic condition engine
//!
//! This crate provides the fundamental types shared by the parser and runtime:
//! - Expression tree (`Node`) produced by the condition parser
//! - Relations and logical connectives
//! - Variable bindings with kind-locking
//! - Comparison and field-match evaluation
//! - Error types

pub mod ast;
pub mod error;
pub mod eval;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use ast::{Connective, Node, Relation};
pub use error::CoreError;
pub use eval::str_field_match;
pub use types::{Binding, Operand};
