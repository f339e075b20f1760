//! Top-level operator splitter
//!
//! Finds the operator that splits a condition into two halves while
//! respecting parenthesis nesting. The scan is positional rather than
//! precedence based: the first operator found at depth zero wins. Operands of
//! `and` / `or` must therefore be parenthesized, otherwise an embedded
//! comparison to the left of the keyword would be found first.
//!
//! Operators are tested at each position in this order:
//! ` OR `, ` AND`, `==`, `=`, `!=`, `>=`, `<=`, `>`, `<`.

use crate::error::Result;
use crate::validate::{global_parens, legal_parens, prune_parens};
use helmlogic_core::Connective;

/// Result of splitting a condition at its top-level operator
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// Parentheses do not balance
    Unbalanced,
    /// No operator at depth zero: an atomic term
    Leaf,
    /// `!(...)`, carrying the parenthesized remainder
    Not(String),
    /// Binary split around an operator
    Binary {
        connective: Connective,
        left: String,
        right: String,
    },
}

/// Normalize spacing so keywords are never glued to parentheses.
///
/// Tabs become spaces, a blank is inserted before `(` and after `)`, and the
/// `$(` of a right-hand variable reference is kept intact.
pub fn normalize(text: &str) -> String {
    text.replace('\t', " ")
        .replace(')', ") ")
        .replace('(', " (")
        .replace("$ (", "$(")
        .trim()
        .to_string()
}

fn window_matches(bytes: &[u8], start: usize, pattern: &[u8]) -> bool {
    bytes.len() >= start + pattern.len()
        && bytes[start..start + pattern.len()].eq_ignore_ascii_case(pattern)
}

/// Locate the operator at position `i`, returning the operator token and the
/// byte offsets where the left side ends and the right side begins.
fn operator_at(bytes: &[u8], i: usize) -> Option<(&'static str, usize, usize)> {
    let len = bytes.len();

    // Keywords need a blank in front. Only " AND" is compared (not " AND "),
    // but at least one character must follow the keyword.
    if i > 0 && window_matches(bytes, i - 1, b" OR ") {
        return Some(("or", i, i + 2));
    }
    if i > 0 && len - i >= 4 && window_matches(bytes, i - 1, b" AND") {
        return Some(("and", i, i + 3));
    }

    const RELATIONS: [&str; 7] = ["==", "=", "!=", ">=", "<=", ">", "<"];
    RELATIONS
        .iter()
        .find(|token| bytes[i..].starts_with(token.as_bytes()))
        .map(|token| (*token, i, i + token.len()))
}

/// Split a condition at its top-level operator
pub fn split_relation(text: &str) -> Result<Split> {
    let normalized = normalize(text);
    if !legal_parens(&normalized) {
        log::trace!("unbalanced parentheses in '{}'", text);
        return Ok(Split::Unbalanced);
    }

    let s = prune_parens(&normalized);

    if let Some(rest) = s.strip_prefix('!') {
        if global_parens(rest) {
            return Ok(Split::Not(rest.trim().to_string()));
        }
    }

    let bytes = s.as_bytes();
    let mut depth: i64 = 0;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth != 0 {
            continue;
        }

        if let Some((token, left_end, right_start)) = operator_at(bytes, i) {
            let connective: Connective = token.parse()?;
            let left = s[..left_end].trim().to_string();
            let right = s[right_start..].trim().to_string();
            log::trace!("split '{}' at '{}': '{}' | '{}'", s, connective, left, right);
            return Ok(Split::Binary {
                connective,
                left,
                right,
            });
        }
    }

    Ok(Split::Leaf)
}
