//! Mode set: ordered mode rules evaluated once per cycle
//!
//! Rules run in declaration order. A rule's guards see the store for
//! ordinary variables, and see only the values assigned earlier in the same
//! cycle for mode variables. A mode variable that no earlier rule assigned
//! stays unbound, so any guard on it is false.
//!
//! Nested modes build hierarchical values. With the rules
//!
//! ```text
//! MODE = ACTIVE      [DEPLOY = true]            else INACTIVE
//! MODE = SURVEYING   [MODE = ACTIVE] [DEPTH > 5] else RETURNING
//! ```
//!
//! and `DEPLOY = true`, `DEPTH = 8`, the cycle ends with
//! `MODE = ACTIVE:SURVEYING`.

use super::rule::ModeRule;
use crate::error::{Result, RuntimeError};
use crate::info_buffer::{SharedInfoBuffer, VariableStore};

/// Ordered collection of mode rules
#[derive(Debug, Clone, Default)]
pub struct ModeSet {
    rules: Vec<ModeRule>,
    /// Mode values assigned in the last cycle, in first-assignment order
    results: Vec<(String, String)>,
}

impl ModeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fully built rule
    pub fn add_rule(&mut self, rule: ModeRule) {
        self.rules.push(rule);
    }

    /// Build and append a rule from its parts.
    ///
    /// Fails without modifying the set if the head, any guard, or the
    /// fallback value is rejected.
    pub fn add_entry(
        &mut self,
        var: &str,
        val: &str,
        conditions: &[&str],
        else_val: Option<&str>,
    ) -> Result<()> {
        let invalid = |message: String| RuntimeError::InvalidMode {
            variable: var.to_string(),
            message,
        };

        let mut rule = ModeRule::new();
        if !rule.set_head(var, val) {
            return Err(invalid("mode variable contains whitespace".to_string()));
        }
        for condition in conditions {
            if !rule.add_condition(condition) {
                return Err(invalid(format!("bad condition: {}", condition)));
            }
        }
        if let Some(else_val) = else_val {
            if !rule.set_else_value(else_val) {
                return Err(invalid(format!("bad else value: {}", else_val)));
            }
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Run one cycle against `store` and return the assigned mode values
    pub fn evaluate<S: VariableStore + ?Sized>(&mut self, store: &S) -> &[(String, String)] {
        self.results.clear();

        let samples = store.sample(&self.condition_vars());

        for rule in self.rules.iter_mut() {
            rule.clear_condition_var_vals();
            for sample in &samples {
                rule.apply_sample(sample);
            }
            for (var, val) in &self.results {
                rule.set_var_val_text(var, val);
            }

            let value = if rule.eval_conditions() {
                rule.mode_val()
            } else if rule.has_else() && rule.eval_mode_var_conditions() {
                rule.else_val()
            } else {
                continue;
            };

            let value = if rule.has_parent() {
                format!("{}:{}", rule.mode_prefix(), value)
            } else {
                value.to_string()
            };

            match self.results.iter_mut().find(|(var, _)| var == rule.mode_var()) {
                Some((_, existing)) => *existing = value,
                None => self.results.push((rule.mode_var().to_string(), value)),
            }
        }

        tracing::debug!(
            "mode set evaluated: {} rules, {} assignments",
            self.rules.len(),
            self.results.len()
        );
        &self.results
    }

    /// Run one cycle against a shared store, holding its read lock once
    pub fn evaluate_shared(&mut self, store: &SharedInfoBuffer) -> &[(String, String)] {
        let guard = store.read();
        self.evaluate(&*guard)
    }

    /// Mode values assigned in the last cycle
    pub fn results(&self) -> &[(String, String)] {
        &self.results
    }

    /// Value assigned to `var` in the last cycle
    pub fn mode_value(&self, var: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, val)| val.as_str())
    }

    /// Distinct mode variables, in declaration order
    pub fn mode_vars(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        for rule in &self.rules {
            if !vars.iter().any(|v| v == rule.mode_var()) {
                vars.push(rule.mode_var().to_string());
            }
        }
        vars
    }

    /// Store variables the set depends on. Mode variables are excluded
    /// since their values come from the cycle itself.
    pub fn condition_vars(&self) -> Vec<String> {
        let heads = self.mode_vars();
        let mut vars: Vec<String> = Vec::new();
        for rule in &self.rules {
            for name in rule.condition_vars() {
                if !heads.contains(&name) && !vars.contains(&name) {
                    vars.push(name);
                }
            }
        }
        vars
    }

    pub fn rules(&self) -> &[ModeRule] {
        &self.rules
    }

    pub fn size(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One line per rule: `VAR=VALUE [guard] [guard] else FALLBACK`
    pub fn string_description(&self) -> String {
        self.rules
            .iter()
            .map(|rule| {
                let mut line = format!("{}={}", rule.mode_var(), rule.mode_val());
                for condition in rule.conditions() {
                    line.push_str(&format!(" [{}]", condition.raw_condition()));
                }
                if rule.has_else() {
                    line.push_str(&format!(" else {}", rule.else_val()));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
