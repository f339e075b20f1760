//! Mode rule: a mode variable, the value it takes, and the guards that
//! must hold for it to be assigned.
//!
//! ```text
//! MODE = ACTIVE:SURVEYING
//!   guard: MODE = ACTIVE          <- parent-mode guard
//!   guard: DEPTH > 5
//!   else:  LOITERING
//! ```
//!
//! A guard that compares the rule's own mode variable against a value is a
//! parent-mode guard; its right side becomes the rule's parent-mode value.
//! Only the first such guard is marked.

use crate::info_buffer::Sample;
use helmlogic_core::text::contains_white;
use helmlogic_parser::Condition;
use std::fmt;

/// Guarded assignment of a value to a mode variable
#[derive(Debug, Clone, Default)]
pub struct ModeRule {
    mode_var: String,
    mode_val: String,
    else_val: String,
    /// Right side of the parent-mode guard, if one was found
    parent_val: String,

    conditions: Vec<Condition>,
    /// Parallel to `conditions`: true for the parent-mode guard
    parent_flags: Vec<bool>,
}

impl ModeRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mode variable and the value it takes. Rejects a variable
    /// name containing whitespace.
    pub fn set_head(&mut self, var: &str, val: &str) -> bool {
        if contains_white(var) {
            tracing::warn!("mode variable '{}' contains whitespace", var);
            return false;
        }
        self.mode_var = var.to_string();
        self.mode_val = val.to_string();
        true
    }

    /// Parse and append a guard. `==` is not accepted in guards.
    ///
    /// Returns false, leaving the rule untouched, if the text is rejected.
    pub fn add_condition(&mut self, text: &str) -> bool {
        let text = text.trim();
        let condition = match Condition::parse(text) {
            Ok(condition) => condition,
            Err(e) => {
                tracing::warn!("rejected guard '{}' for {}: {}", text, self.mode_var, e);
                return false;
            }
        };
        self.conditions.push(condition);
        self.parent_flags.push(false);
        self.detect_parent();
        true
    }

    fn detect_parent(&mut self) {
        for (condition, flag) in self.conditions.iter().zip(self.parent_flags.iter_mut()) {
            if !self.parent_val.is_empty() {
                break;
            }
            let Some((left, right)) = condition.raw_condition().split_once('=') else {
                continue;
            };
            let (left, right) = (left.trim(), right.trim());
            if left == self.mode_var && !right.is_empty() {
                self.parent_val = right.to_string();
                *flag = true;
            }
        }
    }

    /// Set the value assigned when the guards fail but the parent mode
    /// holds. Must be a single token without whitespace.
    pub fn set_else_value(&mut self, val: &str) -> bool {
        if val.is_empty() || contains_white(val) {
            tracing::warn!("else value '{}' for {} is not a single token", val, self.mode_var);
            return false;
        }
        self.else_val = val.to_string();
        true
    }

    /// True if every guard holds
    pub fn eval_conditions(&self) -> bool {
        self.conditions.iter().all(Condition::eval)
    }

    /// True if every parent-mode guard holds
    pub fn eval_mode_var_conditions(&self) -> bool {
        self.conditions
            .iter()
            .zip(&self.parent_flags)
            .filter(|(_, is_parent)| **is_parent)
            .all(|(condition, _)| condition.eval())
    }

    pub fn set_var_val_text(&mut self, var: &str, val: &str) {
        for condition in &mut self.conditions {
            condition.set_var_val_text(var, val);
        }
    }

    pub fn set_var_val_number(&mut self, var: &str, val: f64) {
        for condition in &mut self.conditions {
            condition.set_var_val_number(var, val);
        }
    }

    /// Bind a sampled variable into every guard, text before number
    pub fn apply_sample(&mut self, sample: &Sample) {
        for condition in &mut self.conditions {
            sample.apply_to(condition);
        }
    }

    pub fn clear_condition_var_vals(&mut self) {
        for condition in &mut self.conditions {
            condition.clear_var_vals();
        }
    }

    /// Variables referenced by the guards, deduplicated
    pub fn condition_vars(&self) -> Vec<String> {
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

    /// Last `:`-separated component of the parent-mode value
    pub fn mode_parent(&self) -> &str {
        self.parent_val.rsplit(':').next().unwrap_or("")
    }

    pub fn mode_var(&self) -> &str {
        &self.mode_var
    }

    pub fn mode_val(&self) -> &str {
        &self.mode_val
    }

    pub fn else_val(&self) -> &str {
        &self.else_val
    }

    /// Full parent-mode value (empty if the rule has no parent-mode guard)
    pub fn mode_prefix(&self) -> &str {
        &self.parent_val
    }

    pub fn has_else(&self) -> bool {
        !self.else_val.is_empty()
    }

    pub fn has_parent(&self) -> bool {
        !self.parent_val.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Parent-mode flag of each guard, in guard order
    pub fn parent_flags(&self) -> &[bool] {
        &self.parent_flags
    }

    /// Reset the rule to its empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ModeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode Var:    {}", self.mode_var)?;
        writeln!(f, "Mode Val:    {}", self.mode_val)?;
        writeln!(f, "Mode Else:   {}", self.else_val)?;
        writeln!(f, "Mode Prefix: {}", self.parent_val)?;
        writeln!(f, "Conditions:  ({})", self.conditions.len())?;
        for (condition, is_parent) in self.conditions.iter().zip(&self.parent_flags) {
            let tag = if *is_parent { "modevar" } else { "not-modevar" };
            writeln!(f, "  {} ({})", condition.raw_condition(), tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_rule() -> ModeRule {
        let mut rule = ModeRule::new();
        assert!(rule.set_head("MODE", "SURVEYING"));
        assert!(rule.add_condition("MODE = ACTIVE"));
        assert!(rule.add_condition("DEPTH > 5"));
        rule
    }

    #[test]
    fn test_set_head() {
        let mut rule = ModeRule::new();
        assert!(!rule.set_head("MODE VAR", "A"));
        assert!(!rule.set_head("MODE\tVAR", "A"));
        assert!(rule.set_head("MODE", "ACTIVE"));
        assert_eq!(rule.mode_var(), "MODE");
        assert_eq!(rule.mode_val(), "ACTIVE");
    }

    #[test]
    fn test_parent_detection() {
        let rule = survey_rule();
        assert_eq!(rule.parent_flags(), &[true, false]);
        assert_eq!(rule.mode_prefix(), "ACTIVE");
        assert_eq!(rule.mode_parent(), "ACTIVE");
        assert!(rule.has_parent());
    }

    #[test]
    fn test_only_first_parent_guard_marked() {
        let mut rule = ModeRule::new();
        rule.set_head("MODE", "X");
        rule.add_condition("MODE = A");
        rule.add_condition("MODE = B");
        assert_eq!(rule.parent_flags(), &[true, false]);
        assert_eq!(rule.mode_prefix(), "A");
    }

    #[test]
    fn test_mode_parent_last_component() {
        let mut rule = ModeRule::new();
        rule.set_head("MODE", "DEEP");
        rule.add_condition("MODE = SUB:ACTIVE");
        assert_eq!(rule.mode_prefix(), "SUB:ACTIVE");
        assert_eq!(rule.mode_parent(), "ACTIVE");

        let empty = ModeRule::new();
        assert_eq!(empty.mode_parent(), "");
    }

    #[test]
    fn test_rejected_guard_leaves_rule_untouched() {
        let mut rule = survey_rule();
        assert!(!rule.add_condition("MODE == ACTIVE"));
        assert!(!rule.add_condition("A=1 and B=2"));
        assert_eq!(rule.conditions().len(), 2);
        assert_eq!(rule.parent_flags().len(), 2);
    }

    #[test]
    fn test_else_value() {
        let mut rule = survey_rule();
        assert!(!rule.set_else_value("TWO WORDS"));
        assert!(!rule.set_else_value(""));
        assert!(!rule.has_else());
        assert!(rule.set_else_value("LOITERING"));
        assert_eq!(rule.else_val(), "LOITERING");
    }

    #[test]
    fn test_eval() {
        let mut rule = survey_rule();
        assert!(!rule.eval_conditions());
        assert!(!rule.eval_mode_var_conditions());

        rule.set_var_val_text("MODE", "ACTIVE");
        rule.set_var_val_number("DEPTH", 3.0);
        assert!(!rule.eval_conditions());
        assert!(rule.eval_mode_var_conditions());

        rule.clear_condition_var_vals();
        rule.set_var_val_text("MODE", "ACTIVE");
        rule.set_var_val_number("DEPTH", 8.0);
        assert!(rule.eval_conditions());
    }

    #[test]
    fn test_no_guards_holds() {
        let mut rule = ModeRule::new();
        rule.set_head("MODE", "ACTIVE");
        assert!(rule.eval_conditions());
        assert!(rule.eval_mode_var_conditions());
    }

    #[test]
    fn test_condition_vars_and_clear() {
        let mut rule = survey_rule();
        assert_eq!(rule.condition_vars(), vec!["MODE", "DEPTH"]);

        rule.clear();
        assert_eq!(rule.mode_var(), "");
        assert!(rule.conditions().is_empty());
        assert!(!rule.has_parent());
    }

    #[test]
    fn test_display() {
        let rule = survey_rule();
        let text = rule.to_string();
        assert!(text.contains("Mode Var:    MODE"));
        assert!(text.contains("MODE = ACTIVE (modevar)"));
        assert!(text.contains("DEPTH > 5 (not-modevar)"));
    }
}
