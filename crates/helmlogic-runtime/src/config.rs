//! Configuration types for condition buffers and mode sets
//!
//! Both are loadable from YAML:
//!
//! ```yaml
//! modes:
//!   - variable: MODE
//!     value: ACTIVE
//!     conditions: ["DEPLOY = true"]
//!     else_value: INACTIVE
//!   - variable: MODE
//!     value: SURVEYING
//!     conditions: ["MODE = ACTIVE", "DEPTH > 5"]
//! ```

use crate::error::{Result, RuntimeError};
use crate::info_buffer::SharedInfoBuffer;
use crate::logic_buffer::LogicBuffer;
use crate::mode::ModeSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One mode rule declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDeclaration {
    /// Mode variable assigned by the rule
    pub variable: String,

    /// Value assigned when all conditions hold
    pub value: String,

    /// Guard conditions
    #[serde(default)]
    pub conditions: Vec<String>,

    /// Value assigned when the guards fail but the parent mode holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_value: Option<String>,
}

impl ModeDeclaration {
    pub fn new(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
            conditions: Vec::new(),
            else_value: None,
        }
    }

    /// Add a guard condition
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Set the fallback value
    pub fn with_else_value(mut self, value: impl Into<String>) -> Self {
        self.else_value = Some(value.into());
        self
    }
}

/// Mode set configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeSetConfig {
    #[serde(default)]
    pub modes: Vec<ModeDeclaration>,
}

impl ModeSetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mode declaration
    pub fn with_mode(mut self, mode: ModeDeclaration) -> Self {
        self.modes.push(mode);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Build the mode set, failing on the first rejected declaration
    pub fn build(&self) -> Result<ModeSet> {
        let mut set = ModeSet::new();
        for mode in &self.modes {
            let conditions: Vec<&str> = mode.conditions.iter().map(String::as_str).collect();
            set.add_entry(
                &mode.variable,
                &mode.value,
                &conditions,
                mode.else_value.as_deref(),
            )?;
        }
        tracing::debug!("built mode set with {} rules", set.size());
        Ok(set)
    }
}

/// Condition buffer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicConfig {
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl LogicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Build a buffer with a private store
    pub fn build(&self) -> Result<LogicBuffer> {
        self.fill(LogicBuffer::new())
    }

    /// Build a buffer that evaluates against a shared store
    pub fn build_with(&self, info_buffer: SharedInfoBuffer) -> Result<LogicBuffer> {
        self.fill(LogicBuffer::with_info_buffer(info_buffer))
    }

    fn fill(&self, mut buffer: LogicBuffer) -> Result<LogicBuffer> {
        for condition in &self.conditions {
            if !buffer.add_condition(condition) {
                return Err(RuntimeError::InvalidCondition(condition.clone()));
            }
        }
        Ok(buffer)
    }
}
