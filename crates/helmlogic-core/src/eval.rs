//! Comparison semantics for condition relations
//!
//! Text against text compares strings (after dropping one layer of quotes),
//! number against number compares numerically, and mixed comparisons convert
//! the text side to a number first. A mixed comparison whose text side is not
//! numeric is simply false.

use crate::ast::Relation;
use crate::text::{parse_number, strip_quotes};
use crate::types::Operand;

/// Apply a relation to two resolved operands
pub fn compare(relation: Relation, left: Operand<'_>, right: Operand<'_>) -> bool {
    match (left, right) {
        (Operand::Text(l), Operand::Text(r)) => compare_text(relation, l, r),
        (Operand::Number(l), Operand::Number(r)) => compare_numbers(relation, l, r),
        (Operand::Text(l), Operand::Number(r)) => match parse_number(strip_quotes(l)) {
            Some(l) => compare_numbers(relation, l, r),
            None => false,
        },
        (Operand::Number(l), Operand::Text(r)) => match parse_number(strip_quotes(r)) {
            Some(r) => compare_numbers(relation, l, r),
            None => false,
        },
    }
}

/// String comparison. Ordering relations are lexicographic.
pub fn compare_text(relation: Relation, left: &str, right: &str) -> bool {
    let left = strip_quotes(left);
    let right = strip_quotes(right);
    match relation {
        Relation::Eq => left == right,
        Relation::FieldMatch => str_field_match(left, right),
        Relation::Ne => left != right,
        Relation::Lt => left < right,
        Relation::Le => left <= right,
        Relation::Gt => left > right,
        Relation::Ge => left >= right,
    }
}

/// Numeric comparison. Field match degrades to plain equality.
pub fn compare_numbers(relation: Relation, left: f64, right: f64) -> bool {
    match relation {
        Relation::Eq | Relation::FieldMatch => left == right,
        Relation::Ne => left != right,
        Relation::Lt => left < right,
        Relation::Le => left <= right,
        Relation::Gt => left > right,
        Relation::Ge => left >= right,
    }
}

/// Hierarchical name match between `:` separated paths.
///
/// One string matches the other if its components appear, contiguously and
/// in order, among the components of the other string:
///
/// - `"alpha:bravo:charlie"` matches `"charlie"` and `"alpha:bravo"`
/// - `"alpha"` matches `"alpha:bravo:charlie"`
/// - `"pha:bra"` does not match `"alpha:bravo:charlie"`
///
/// The shorter path must appear as one contiguous block of the longer one,
/// so `"a:b:c:d"` matches `"b:c"` but not `"b:d"`. Every start position of
/// the longer path is tried, so `"a:b"` matches `"a:a:b"` even though the
/// block does not begin at the first `a`.
pub fn str_field_match(left: &str, right: &str) -> bool {
    let left = strip_quotes(left);
    let right = strip_quotes(right);

    // Cheap rejection: one side must at least be a substring of the other.
    if !left.contains(right) && !right.contains(left) {
        return false;
    }

    let left_parts: Vec<&str> = left.split(':').map(str::trim).collect();
    let right_parts: Vec<&str> = right.split(':').map(str::trim).collect();

    let (short, long) = if left_parts.len() < right_parts.len() {
        (left_parts, right_parts)
    } else {
        (right_parts, left_parts)
    };

    long.windows(short.len()).any(|window| window == short.as_slice())
}
