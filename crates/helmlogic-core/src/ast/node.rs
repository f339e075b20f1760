//! Condition expression tree
//!
//! A parsed condition is a binary tree. Interior nodes are negations, logical
//! connectives or comparisons; leaves are variables and literals. A leaf on
//! the left of a comparison is a variable, a leaf on the right is a literal
//! or a `$(NAME)` variable reference. A comparison with a relation as one of
//! its sides evaluates false.

use super::relation::Relation;
use crate::eval::compare;
use crate::types::{Binding, Operand};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Negation, written `!(...)`
    Not { raw: String, operand: Box<Node> },

    /// Conjunction of two parenthesized operands
    And {
        raw: String,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Disjunction of two parenthesized operands
    Or {
        raw: String,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Comparison between a variable and a literal or another variable
    Compare {
        raw: String,
        relation: Relation,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Telemetry variable with its value for the current cycle
    Variable { name: String, binding: Binding },

    /// Text literal, kept as written (quotes included)
    StringLiteral(String),

    /// Numeric literal
    NumberLiteral { raw: String, value: f64 },
}

impl Node {
    /// Create an unbound variable leaf
    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable {
            name: name.into(),
            binding: Binding::Unset,
        }
    }

    /// Create a text literal leaf
    pub fn string_literal(raw: impl Into<String>) -> Self {
        Node::StringLiteral(raw.into())
    }

    /// Create a numeric literal leaf
    pub fn number_literal(raw: impl Into<String>, value: f64) -> Self {
        Node::NumberLiteral {
            raw: raw.into(),
            value,
        }
    }

    /// Create a negation
    pub fn not(raw: impl Into<String>, operand: Node) -> Self {
        Node::Not {
            raw: raw.into(),
            operand: Box::new(operand),
        }
    }

    /// Create a conjunction
    pub fn and(raw: impl Into<String>, left: Node, right: Node) -> Self {
        Node::And {
            raw: raw.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a disjunction
    pub fn or(raw: impl Into<String>, left: Node, right: Node) -> Self {
        Node::Or {
            raw: raw.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a comparison
    pub fn compare(raw: impl Into<String>, relation: Relation, left: Node, right: Node) -> Self {
        Node::Compare {
            raw: raw.into(),
            relation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Source text of this node. Variables report their bare name.
    pub fn raw(&self) -> &str {
        match self {
            Node::Not { raw, .. }
            | Node::And { raw, .. }
            | Node::Or { raw, .. }
            | Node::Compare { raw, .. }
            | Node::NumberLiteral { raw, .. } => raw,
            Node::StringLiteral(raw) => raw,
            Node::Variable { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Node::Variable { .. } | Node::StringLiteral(_) | Node::NumberLiteral { .. }
        )
    }

    /// Resolve this node as a comparison operand.
    ///
    /// Literals always resolve; variables resolve to whatever kind is bound.
    pub fn operand(&self) -> Option<Operand<'_>> {
        match self {
            Node::Variable { binding, .. } => binding.operand(),
            Node::StringLiteral(raw) => Some(Operand::Text(raw)),
            Node::NumberLiteral { value, .. } => Some(Operand::Number(*value)),
            _ => None,
        }
    }

    /// Evaluate the tree against the current bindings.
    ///
    /// Both operands of `and`/`or` are always evaluated. Any comparison with
    /// an unbound side is false.
    pub fn eval(&self) -> bool {
        match self {
            Node::Not { operand, .. } => !operand.eval(),
            Node::And { left, right, .. } => {
                let l = left.eval();
                let r = right.eval();
                l && r
            }
            Node::Or { left, right, .. } => {
                let l = left.eval();
                let r = right.eval();
                l || r
            }
            Node::Compare {
                relation,
                left,
                right,
                ..
            } => match (left.operand(), right.operand()) {
                (Some(l), Some(r)) => compare(*relation, l, r),
                _ => false,
            },
            Node::Variable { .. } | Node::StringLiteral(_) | Node::NumberLiteral { .. } => false,
        }
    }

    /// Variable names referenced anywhere in the tree, deduplicated, in
    /// left-to-right order of first appearance.
    pub fn var_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        self.for_each_variable(&mut |name, _| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        });
        names
    }

    /// Bind a text value to every variable leaf named `name`.
    ///
    /// Leaves already holding a numeric value this cycle are left alone.
    pub fn set_var_val_text(&mut self, name: &str, value: &str) {
        self.for_each_variable_mut(&mut |var, binding| {
            if var == name && !binding.bind_text(value) {
                log::trace!("text value for '{}' ignored: bound to a number", name);
            }
        });
    }

    /// Bind a numeric value to every variable leaf named `name`.
    ///
    /// Leaves already holding a text value this cycle are left alone.
    pub fn set_var_val_number(&mut self, name: &str, value: f64) {
        self.for_each_variable_mut(&mut |var, binding| {
            if var == name && !binding.bind_number(value) {
                log::trace!("numeric value for '{}' ignored: bound to text", name);
            }
        });
    }

    /// Reset all variable bindings
    pub fn clear_var_vals(&mut self) {
        self.for_each_variable_mut(&mut |_, binding| binding.clear());
    }

    fn for_each_variable(&self, f: &mut dyn FnMut(&str, &Binding)) {
        match self {
            Node::Variable { name, binding } => f(name, binding),
            Node::Not { operand, .. } => operand.for_each_variable(f),
            Node::And { left, right, .. }
            | Node::Or { left, right, .. }
            | Node::Compare { left, right, .. } => {
                left.for_each_variable(f);
                right.for_each_variable(f);
            }
            Node::StringLiteral(_) | Node::NumberLiteral { .. } => {}
        }
    }

    fn for_each_variable_mut(&mut self, f: &mut dyn FnMut(&str, &mut Binding)) {
        match self {
            Node::Variable { name, binding } => f(name, binding),
            Node::Not { operand, .. } => operand.for_each_variable_mut(f),
            Node::And { left, right, .. }
            | Node::Or { left, right, .. }
            | Node::Compare { left, right, .. } => {
                left.for_each_variable_mut(f);
                right.for_each_variable_mut(f);
            }
            Node::StringLiteral(_) | Node::NumberLiteral { .. } => {}
        }
    }

    /// Render the tree as an indented outline, one node per line
    pub fn print(&self) -> String {
        let mut out = String::new();
        self.print_into(&mut out, 0);
        out
    }

    fn print_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        // Writing to a String cannot fail
        let _ = match self {
            Node::Not { raw, .. } => writeln!(out, "{indent}Not: {raw}"),
            Node::And { raw, .. } => writeln!(out, "{indent}And: {raw}"),
            Node::Or { raw, .. } => writeln!(out, "{indent}Or: {raw}"),
            Node::Compare { raw, relation, .. } => {
                writeln!(out, "{indent}Compare [{relation}]: {raw}")
            }
            Node::Variable { name, binding } => match binding {
                Binding::Unset => writeln!(out, "{indent}Variable: [{name}]"),
                Binding::Text(s) => writeln!(out, "{indent}Variable: [{name}] = \"{s}\""),
                Binding::Number(n) => writeln!(out, "{indent}Variable: [{name}] = {n}"),
            },
            Node::StringLiteral(raw) => writeln!(out, "{indent}String: [{raw}]"),
            Node::NumberLiteral { raw, .. } => writeln!(out, "{indent}Number: [{raw}]"),
        };

        match self {
            Node::Not { operand, .. } => operand.print_into(out, depth + 1),
            Node::And { left, right, .. }
            | Node::Or { left, right, .. }
            | Node::Compare { left, right, .. } => {
                left.print_into(out, depth + 1);
                right.print_into(out, depth + 1);
            }
            _ => {}
        }
    }
}
