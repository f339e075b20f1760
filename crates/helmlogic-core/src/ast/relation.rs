//! Relations and logical connectives for condition expressions

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Equal (=)
    Eq,
    /// Field match (==), only accepted when double equals are enabled
    FieldMatch,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
}

impl Relation {
    /// Textual form of the relation as written in conditions
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::FieldMatch => "==",
            Relation::Ne => "!=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
            Relation::Lt => "<",
            Relation::Le => "<=",
        }
    }

    /// Returns true for the ordering relations (<, <=, >, >=)
    pub fn is_ordering(&self) -> bool {
        matches!(self, Relation::Gt | Relation::Ge | Relation::Lt | Relation::Le)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Top-level operator found by the splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
    Compare(Relation),
}

impl Connective {
    /// Returns true for `and` / `or`
    pub fn is_logical(&self) -> bool {
        matches!(self, Connective::And | Connective::Or)
    }
}

impl FromStr for Connective {
    type Err = CoreError;

    /// Parses an operator token. Keywords are case-insensitive and may carry
    /// surrounding blanks, as they do when cut out of a condition.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("and") {
            return Ok(Connective::And);
        }
        if token.eq_ignore_ascii_case("or") {
            return Ok(Connective::Or);
        }
        let relation = match token {
            "=" => Relation::Eq,
            "==" => Relation::FieldMatch,
            "!=" => Relation::Ne,
            ">" => Relation::Gt,
            ">=" => Relation::Ge,
            "<" => Relation::Lt,
            "<=" => Relation::Le,
            _ => return Err(CoreError::UnknownOperator(token.to_string())),
        };
        Ok(Connective::Compare(relation))
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => f.write_str("and"),
            Connective::Or => f.write_str("or"),
            Connective::Compare(relation) => relation.fmt(f),
        }
    }
}
