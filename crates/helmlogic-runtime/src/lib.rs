//! helmlogic Runtime - condition evaluation against live telemetry
//!
//! This crate provides the runtime pieces that evaluate parsed conditions
//! against a changing variable store:
//! - `InfoBuffer`, the variable store fed by the telemetry layer
//! - `LogicBuffer`, a set of conditions checked together each cycle
//! - `ModeRule` and `ModeSet`, guarded mode assignments
//! - YAML configuration for condition sets and mode sets

pub mod config;
pub mod error;
pub mod info_buffer;
pub mod logic_buffer;
pub mod mode;

// Re-export main types
pub use config::{LogicConfig, ModeDeclaration, ModeSetConfig};
pub use error::{Result, RuntimeError};
pub use info_buffer::{InfoBuffer, SharedInfoBuffer, VariableStore};
pub use logic_buffer::LogicBuffer;
pub use mode::{ModeRule, ModeSet};
