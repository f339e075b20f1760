//! Condition: an owned, parsed expression tree
//!
//! A `Condition` owns at most one expression tree. Re-parsing replaces the
//! tree wholesale, and a failed parse leaves no tree installed. Cloning a
//! condition deep-copies the tree, so bindings on a clone never affect the
//! original.

use crate::error::Result;
use crate::node_parser::ConditionParser;
use helmlogic_core::Node;
use std::fmt;

/// Parsed boolean condition over telemetry variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    root: Option<Node>,
    allow_double_equals: bool,
}

impl Condition {
    /// Create an empty condition (evaluates to false until parsed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a condition with `==` disabled
    pub fn parse(text: &str) -> Result<Self> {
        let mut condition = Self::new();
        condition.set_condition(text)?;
        Ok(condition)
    }

    /// Enable or disable `==` (field match) for subsequent parses
    pub fn set_allow_double_equals(&mut self, allow: bool) {
        self.allow_double_equals = allow;
    }

    pub fn allow_double_equals(&self) -> bool {
        self.allow_double_equals
    }

    /// Replace the current tree with one parsed from `text`.
    ///
    /// On failure the condition is left without a tree.
    pub fn set_condition(&mut self, text: &str) -> Result<()> {
        self.root = None;
        let parser = ConditionParser::new().with_double_equals(self.allow_double_equals);
        self.root = Some(parser.parse(text)?);
        Ok(())
    }

    /// True if a tree is installed
    pub fn is_set(&self) -> bool {
        self.root.is_some()
    }

    pub fn tree(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Names of all variables referenced by the condition, deduplicated
    pub fn var_names(&self) -> Vec<String> {
        self.root.as_ref().map(Node::var_names).unwrap_or_default()
    }

    /// Bind a text value to the named variable
    pub fn set_var_val_text(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root.as_mut() {
            root.set_var_val_text(name, value);
        }
    }

    /// Bind a numeric value to the named variable
    pub fn set_var_val_number(&mut self, name: &str, value: f64) {
        if let Some(root) = self.root.as_mut() {
            root.set_var_val_number(name, value);
        }
    }

    /// Clear all variable bindings
    pub fn clear_var_vals(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.clear_var_vals();
        }
    }

    /// Evaluate against the current bindings. No tree means false.
    pub fn eval(&self) -> bool {
        self.root.as_ref().map(Node::eval).unwrap_or(false)
    }

    /// Source text of the root relation, or an empty string
    pub fn raw_condition(&self) -> &str {
        self.root.as_ref().map(Node::raw).unwrap_or("")
    }

    /// Indented outline of the tree with current bindings
    pub fn print_tree(&self) -> String {
        self.root.as_ref().map(Node::print).unwrap_or_default()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_condition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_eval() {
        let mut condition = Condition::parse("(A=1) AND (B=2)").unwrap();
        assert!(!condition.eval());

        condition.set_var_val_text("A", "1");
        condition.set_var_val_text("B", "2");
        assert!(condition.eval());
    }

    #[test]
    fn test_failed_parse_leaves_no_tree() {
        let mut condition = Condition::parse("A = 1").unwrap();
        assert!(condition.is_set());

        assert!(condition.set_condition("A=1 AND B=2").is_err());
        assert!(!condition.is_set());
        assert!(!condition.eval());
        assert_eq!(condition.raw_condition(), "");
        assert!(condition.var_names().is_empty());
    }

    #[test]
    fn test_reparse_replaces_tree() {
        let mut condition = Condition::parse("A = 1").unwrap();
        condition.set_condition("B = 2").unwrap();
        assert_eq!(condition.var_names(), vec!["B".to_string()]);
        assert_eq!(condition.raw_condition(), "B = 2");
    }

    #[test]
    fn test_unparsed_condition_is_inert() {
        let mut condition = Condition::new();
        condition.set_var_val_text("A", "1");
        condition.clear_var_vals();
        assert!(!condition.eval());
        assert_eq!(condition.print_tree(), "");
        assert_eq!(condition.to_string(), "");
    }

    #[test]
    fn test_kind_lock() {
        let mut condition = Condition::parse("X = 5").unwrap();
        condition.set_var_val_text("X", "5");
        condition.set_var_val_number("X", 7.0);
        assert!(condition.eval());
        assert!(condition.print_tree().contains("[X] = \"5\""));

        condition.clear_var_vals();
        condition.set_var_val_number("X", 7.0);
        assert!(!condition.eval());
    }

    #[test]
    fn test_unbound_variable_false_for_every_relation() {
        for text in ["Y = 1", "Y != 1", "Y < 1", "Y <= 1", "Y > 1", "Y >= 1", "Y != abc"] {
            let condition = Condition::parse(text).unwrap();
            assert!(!condition.eval(), "{} should be false when unbound", text);
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Condition::parse("A = 1").unwrap();
        let mut copy = original.clone();
        copy.set_var_val_number("A", 1.0);
        assert!(copy.eval());
        assert!(!original.eval());
    }

    #[test]
    fn test_double_equals_setting() {
        let mut condition = Condition::new();
        assert!(condition.set_condition("MODE == ACTIVE").is_err());

        condition.set_allow_double_equals(true);
        assert!(condition.allow_double_equals());
        condition.set_condition("MODE == ACTIVE").unwrap();
        condition.set_var_val_text("MODE", "MISSION:ACTIVE:SURVEY");
        assert!(condition.eval());
    }
}
