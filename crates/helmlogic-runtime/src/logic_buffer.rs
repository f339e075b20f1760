//! Condition buffer
//!
//! A `LogicBuffer` holds a list of conditions that must all hold, plus a
//! handle to the variable store they are evaluated against. Each call to
//! `check_conditions` runs one evaluation cycle:
//!
//! 1. collect the union of variable names across all conditions
//! 2. sample the store once per name, under a single read lock
//! 3. bind the sampled values into every condition (text before number)
//! 4. return the conjunction of all condition results
//!
//! A buffer built with [`LogicBuffer::new`] owns its store and drops the
//! store's per-cycle deltas after each sample. Deltas of a shared store are
//! left to the host, see [`LogicBuffer::clear_deltas`].

use crate::info_buffer::{InfoBuffer, SharedInfoBuffer, VariableStore};
use helmlogic_parser::Condition;

/// Conditions evaluated together against one variable store
#[derive(Debug)]
pub struct LogicBuffer {
    conditions: Vec<Condition>,
    info_buffer: Option<SharedInfoBuffer>,
    /// Raw text of conditions that were false in the last cycle
    failed: Vec<String>,
    /// True while the store is the one created by `new`
    private_store: bool,
}

impl LogicBuffer {
    /// Create a buffer with its own private variable store
    pub fn new() -> Self {
        let mut buffer = Self::with_info_buffer(InfoBuffer::new().into_shared());
        buffer.private_store = true;
        buffer
    }

    /// Create a buffer that evaluates against a shared store
    pub fn with_info_buffer(info_buffer: SharedInfoBuffer) -> Self {
        Self {
            conditions: Vec::new(),
            info_buffer: Some(info_buffer),
            failed: Vec::new(),
            private_store: false,
        }
    }

    pub fn attach_info_buffer(&mut self, info_buffer: SharedInfoBuffer) {
        self.info_buffer = Some(info_buffer);
        self.private_store = false;
    }

    /// Detach the store. Without a store every check fails.
    pub fn detach_info_buffer(&mut self) -> Option<SharedInfoBuffer> {
        self.private_store = false;
        self.info_buffer.take()
    }

    /// Drop the deltas recorded in the attached store
    pub fn clear_deltas(&self) {
        if let Some(info_buffer) = &self.info_buffer {
            info_buffer.write().clear_deltas();
        }
    }

    pub fn info_buffer(&self) -> Option<SharedInfoBuffer> {
        self.info_buffer.clone()
    }

    /// Parse and append a condition. Returns false if the text is rejected.
    pub fn add_condition(&mut self, text: &str) -> bool {
        match Condition::parse(text) {
            Ok(condition) => {
                self.conditions.push(condition);
                true
            }
            Err(e) => {
                tracing::warn!("rejected condition '{}': {}", text, e);
                false
            }
        }
    }

    /// Post a text value to the store
    pub fn update_info_buffer_text(&self, var: &str, value: &str) -> bool {
        match &self.info_buffer {
            Some(buffer) => {
                buffer.write().set_text(var, value);
                true
            }
            None => false,
        }
    }

    /// Post a numeric value to the store
    pub fn update_info_buffer_number(&self, var: &str, value: f64) -> bool {
        match &self.info_buffer {
            Some(buffer) => {
                buffer.write().set_number(var, value);
                true
            }
            None => false,
        }
    }

    /// Run one evaluation cycle. True only if every condition holds; an
    /// empty buffer holds trivially. Without a store the result is false.
    pub fn check_conditions(&mut self) -> bool {
        let Some(info_buffer) = &self.info_buffer else {
            tracing::debug!("check_conditions: no info buffer attached");
            return false;
        };

        let vars = self.all_vars();
        let samples = info_buffer.read().sample(&vars);
        if self.private_store {
            info_buffer.write().clear_deltas();
        }

        for condition in self.conditions.iter_mut() {
            condition.clear_var_vals();
            for sample in &samples {
                sample.apply_to(condition);
            }
        }

        self.failed = self
            .conditions
            .iter()
            .filter(|condition| !condition.eval())
            .map(|condition| condition.raw_condition().to_string())
            .collect();

        tracing::debug!(
            "check_conditions: {} conditions, {} vars, {} failed",
            self.conditions.len(),
            vars.len(),
            self.failed.len()
        );
        self.failed.is_empty()
    }

    /// Union of the variable names referenced by all conditions
    pub fn all_vars(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        for condition in &self.conditions {
            for name in condition.var_names() {
                if !vars.contains(&name) {
                    vars.push(name);
                }
            }
        }
        vars
    }

    /// Number of conditions held
    pub fn size(&self) -> usize {
        self.conditions.len()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Raw text of each condition, in insertion order
    pub fn raw_conditions(&self) -> Vec<String> {
        self.conditions
            .iter()
            .map(|condition| condition.raw_condition().to_string())
            .collect()
    }

    /// Raw text of the conditions that were false in the last cycle
    pub fn failed_conditions(&self) -> &[String] {
        &self.failed
    }
}

impl Default for LogicBuffer {
    fn default() -> Self {
        Self::new()
    }
}
