//! Unit tests for the expression tree and comparison rules
//!
//! Trees are built by hand here; parsing is covered by the parser crate.

use helmlogic_core::eval::{compare, compare_numbers, compare_text};
use helmlogic_core::text::{is_number, strip_quotes};
use helmlogic_core::*;

fn var_cmp(raw: &str, relation: Relation, name: &str, right: Node) -> Node {
    Node::compare(raw, relation, Node::variable(name), right)
}

// =============================================================================
// Field Match Tests
// =============================================================================

#[test]
fn test_field_match_suffix_component() {
    assert!(str_field_match("alpha:bravo:charlie", "charlie"));
}

#[test]
fn test_field_match_is_symmetric_in_length() {
    assert!(str_field_match("alpha", "alpha:bravo:charlie"));
}

#[test]
fn test_field_match_requires_whole_components() {
    assert!(!str_field_match("pha:bra", "alpha:bravo:charlie"));
}

#[test]
fn test_field_match_contiguous_path() {
    assert!(str_field_match("alpha:bravo:charlie:delta", "bravo:charlie"));
    assert!(str_field_match("a:b:c", "a:b:c"));
    assert!(!str_field_match("a:b:c:d", "b:d"));
}

#[test]
fn test_field_match_block_after_repeated_component() {
    assert!(str_field_match("a:b", "a:a:b"));
    assert!(str_field_match("ACTIVE:ACTIVE:SURVEYING", "ACTIVE:SURVEYING"));
}

#[test]
fn test_field_match_strips_quotes_and_blanks() {
    assert!(str_field_match("\"ACTIVE : SURVEYING\"", "SURVEYING"));
}

// =============================================================================
// Comparison Tests
// =============================================================================

#[test]
fn test_compare_text_exact() {
    assert!(compare_text(Relation::Eq, "\"deep\"", "deep"));
    assert!(compare_text(Relation::Ne, "deep", "shallow"));
    assert!(compare_text(Relation::Lt, "apple", "banana"));
    assert!(!compare_text(Relation::Ge, "apple", "banana"));
}

#[test]
fn test_compare_numbers() {
    assert!(compare_numbers(Relation::Eq, 2.0, 2.0));
    assert!(compare_numbers(Relation::FieldMatch, 2.0, 2.0));
    assert!(compare_numbers(Relation::Le, 2.0, 2.0));
    assert!(compare_numbers(Relation::Gt, 3.0, 2.0));
    assert!(!compare_numbers(Relation::Ne, 2.0, 2.0));
}

#[test]
fn test_compare_mixed_kinds() {
    assert!(compare(Relation::Eq, Operand::Text("5"), Operand::Number(5.0)));
    assert!(compare(Relation::Lt, Operand::Number(4.0), Operand::Text("\"5\"")));
    assert!(!compare(Relation::Eq, Operand::Text("five"), Operand::Number(5.0)));
    assert!(!compare(Relation::Ne, Operand::Text("five"), Operand::Number(5.0)));
}

// =============================================================================
// Binding Tests
// =============================================================================

#[test]
fn test_binding_kind_lock() {
    let mut binding = Binding::default();
    assert!(!binding.is_set());
    assert!(binding.bind_text("5"));
    assert!(!binding.bind_number(7.0));
    assert_eq!(binding, Binding::Text("5".to_string()));

    // Same kind may be overwritten
    assert!(binding.bind_text("6"));
    assert_eq!(binding.operand(), Some(Operand::Text("6")));

    binding.clear();
    assert!(binding.bind_number(7.0));
    assert_eq!(binding.operand(), Some(Operand::Number(7.0)));
}

// =============================================================================
// Tree Tests
// =============================================================================

#[test]
fn test_tree_and_requires_both() {
    let mut node = Node::and(
        "(A=1) and (B=2)",
        var_cmp("A=1", Relation::Eq, "A", Node::number_literal("1", 1.0)),
        var_cmp("B=2", Relation::Eq, "B", Node::number_literal("2", 2.0)),
    );
    node.set_var_val_text("A", "1");
    assert!(!node.eval());
    node.set_var_val_text("B", "2");
    assert!(node.eval());
}

#[test]
fn test_tree_not_of_unbound_is_true() {
    let node = Node::not(
        "!(A=1)",
        var_cmp("A=1", Relation::Eq, "A", Node::number_literal("1", 1.0)),
    );
    assert!(node.eval());
}

#[test]
fn test_tree_field_match_node() {
    let mut node = var_cmp(
        "MODE == SURVEYING",
        Relation::FieldMatch,
        "MODE",
        Node::string_literal("SURVEYING"),
    );
    node.set_var_val_text("MODE", "ACTIVE:SURVEYING");
    assert!(node.eval());
}

#[test]
fn test_tree_clone_is_deep() {
    let original = var_cmp("A=1", Relation::Eq, "A", Node::number_literal("1", 1.0));
    let mut copy = original.clone();
    copy.set_var_val_number("A", 1.0);
    assert!(copy.eval());
    assert!(!original.eval());
    assert_ne!(copy, original);
}

#[test]
fn test_tree_leaves() {
    assert!(Node::variable("A").is_leaf());
    assert!(Node::string_literal("x").is_leaf());
    assert!(!Node::variable("A").eval());
    assert_eq!(Node::number_literal("2.5", 2.5).raw(), "2.5");
}

#[test]
fn test_tree_serde() -> anyhow::Result<()> {
    let node = var_cmp("DEPTH>5", Relation::Gt, "DEPTH", Node::number_literal("5", 5.0));
    let json = serde_json::to_string(&node)?;
    let back: Node = serde_json::from_str(&json)?;
    assert_eq!(back, node);
    Ok(())
}

// =============================================================================
// Connective and Text Helper Tests
// =============================================================================

#[test]
fn test_connective_from_str() {
    assert_eq!(" AND ".parse::<Connective>().unwrap(), Connective::And);
    assert_eq!("or".parse::<Connective>().unwrap(), Connective::Or);
    assert_eq!(
        "<=".parse::<Connective>().unwrap(),
        Connective::Compare(Relation::Le)
    );
    assert!(matches!(
        "~".parse::<Connective>(),
        Err(CoreError::UnknownOperator(_))
    ));
}

#[test]
fn test_text_helpers() {
    assert!(is_number("-12.5"));
    assert!(is_number("+3"));
    assert!(!is_number("1.2.3"));
    assert!(!is_number("abc"));
    assert_eq!(strip_quotes("\"abc\""), "abc");
    assert_eq!(strip_quotes("abc"), "abc");
}
