//! Variable bindings
//!
//! A variable leaf in a condition tree is bound to either a text value or a
//! numeric value during an evaluation cycle. The first kind written wins: a
//! text binding blocks numeric writes (and vice versa) until the binding is
//! cleared. Writes of the same kind overwrite the previous value.

use serde::{Deserialize, Serialize};

/// Current value of a variable leaf
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Binding {
    /// Nothing bound this cycle
    #[default]
    Unset,
    /// Bound to a text value
    Text(String),
    /// Bound to a numeric value
    Number(f64),
}

impl Binding {
    /// Bind a text value unless a numeric value is already bound.
    ///
    /// Returns true if the binding was written.
    pub fn bind_text(&mut self, value: &str) -> bool {
        match self {
            Binding::Number(_) => false,
            _ => {
                *self = Binding::Text(value.to_string());
                true
            }
        }
    }

    /// Bind a numeric value unless a text value is already bound.
    ///
    /// Returns true if the binding was written.
    pub fn bind_number(&mut self, value: f64) -> bool {
        match self {
            Binding::Text(_) => false,
            _ => {
                *self = Binding::Number(value);
                true
            }
        }
    }

    /// Reset to unset, releasing the kind-lock
    pub fn clear(&mut self) {
        *self = Binding::Unset;
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Binding::Unset)
    }

    /// Borrow the bound value as an evaluation operand
    pub fn operand(&self) -> Option<Operand<'_>> {
        match self {
            Binding::Unset => None,
            Binding::Text(s) => Some(Operand::Text(s)),
            Binding::Number(n) => Some(Operand::Number(*n)),
        }
    }
}

/// One side of a comparison after its effective type has been resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Text(&'a str),
    Number(f64),
}
