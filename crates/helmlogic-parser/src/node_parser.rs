//! Recursive condition parser
//!
//! Parsing happens in two passes. The first pass splits the text recursively
//! into an unclassified tree. The second pass checks each node against the
//! role its position requires and produces the typed [`Node`] tree:
//!
//! - the root, and each operand of `and`/`or`/`!`, must be a relation
//! - a leaf on the left of a comparison must be a variable name
//! - a leaf on the right of a comparison is a `$(NAME)` reference, a number,
//!   or a literal, tried in that order
//!
//! Interior nodes are checked by their own operator wherever they appear, so
//! `A = b = c` parses as `A = (b = c)`. A comparison whose side is itself a
//! relation never holds.

use crate::error::{ParseError, Result};
use crate::splitter::{split_relation, Split};
use crate::validate::{global_not_parens, global_parens, is_valid_literal, is_valid_variable, right_variable_name};
use helmlogic_core::text::parse_number;
use helmlogic_core::{Connective, Node, Relation};

/// Parsed but not yet classified tree
#[derive(Debug, Clone, PartialEq)]
enum RawNode {
    Leaf(String),
    Not {
        raw: String,
        operand: Box<RawNode>,
    },
    Binary {
        raw: String,
        connective: Connective,
        left: Box<RawNode>,
        right: Box<RawNode>,
    },
}

impl RawNode {
    fn raw(&self) -> &str {
        match self {
            RawNode::Leaf(raw) | RawNode::Not { raw, .. } | RawNode::Binary { raw, .. } => raw,
        }
    }
}

/// Position of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Root,
    Left,
    Right,
}

/// Condition parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionParser {
    /// Accept `==` (field match) relations
    allow_double_equals: bool,
}

impl ConditionParser {
    /// Create a parser with `==` disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable `==` (field match) relations
    pub fn with_double_equals(mut self, allow: bool) -> Self {
        self.allow_double_equals = allow;
        self
    }

    pub fn allows_double_equals(&self) -> bool {
        self.allow_double_equals
    }

    /// Parse and syntax-check a condition string into an expression tree
    pub fn parse(&self, text: &str) -> Result<Node> {
        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let raw = self.parse_raw(text)?;
        Self::check(raw, Position::Root).map_err(|e| {
            log::debug!("condition '{}' rejected: {}", text, e);
            e
        })
    }

    fn parse_raw(&self, text: &str) -> Result<RawNode> {
        match split_relation(text)? {
            Split::Unbalanced => Err(ParseError::UnbalancedParens(text.to_string())),
            Split::Leaf => Ok(RawNode::Leaf(text.to_string())),
            Split::Not(rest) => {
                let operand = self.parse_raw(&rest)?;
                Ok(RawNode::Not {
                    raw: text.to_string(),
                    operand: Box::new(operand),
                })
            }
            Split::Binary {
                connective,
                left,
                right,
            } => {
                if connective == Connective::Compare(Relation::FieldMatch) && !self.allow_double_equals {
                    return Err(ParseError::DoubleEqualsNotAllowed(text.to_string()));
                }
                let left = self.parse_raw(&left)?;
                let right = self.parse_raw(&right)?;
                Ok(RawNode::Binary {
                    raw: text.to_string(),
                    connective,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
        }
    }

    fn check(node: RawNode, position: Position) -> Result<Node> {
        match node {
            RawNode::Leaf(raw) => Self::classify_leaf(raw, position),
            RawNode::Not { raw, operand } => {
                let operand = Self::check(*operand, Position::Root)?;
                Ok(Node::not(raw, operand))
            }
            RawNode::Binary {
                raw,
                connective,
                left,
                right,
            } => match connective {
                Connective::And | Connective::Or => {
                    for operand in [&left, &right] {
                        let text = operand.raw();
                        if !global_parens(text) && !global_not_parens(text) {
                            return Err(ParseError::UnparenthesizedOperand {
                                connective: connective.to_string(),
                                operand: text.to_string(),
                            });
                        }
                    }
                    let left = Self::check(*left, Position::Root)?;
                    let right = Self::check(*right, Position::Root)?;
                    Ok(if connective == Connective::And {
                        Node::and(raw, left, right)
                    } else {
                        Node::or(raw, left, right)
                    })
                }
                Connective::Compare(relation) => {
                    let left = Self::check(*left, Position::Left)?;
                    let right = Self::check(*right, Position::Right)?;
                    Ok(Node::compare(raw, relation, left, right))
                }
            },
        }
    }

    fn classify_leaf(raw: String, position: Position) -> Result<Node> {
        match position {
            Position::Root => Err(ParseError::BareLeaf(raw)),
            Position::Left => {
                if is_valid_variable(&raw) {
                    Ok(Node::variable(raw.trim()))
                } else {
                    Err(ParseError::InvalidVariable(raw))
                }
            }
            Position::Right => {
                if let Some(name) = right_variable_name(&raw) {
                    return Ok(Node::variable(name));
                }
                if let Some(value) = parse_number(&raw) {
                    return Ok(Node::number_literal(raw.trim(), value));
                }
                if is_valid_literal(&raw) {
                    return Ok(Node::string_literal(raw.trim()));
                }
                Err(ParseError::InvalidLiteral(raw))
            }
        }
    }
}
