//! Validation of hand-assembled expression trees

use rstest::rstest;

use rsgraph::domain::{validate, Children, FormulaNode, NodeArena};

/// Builds `left <payload> right` with leaf operands.
fn binary(payload: &str, left: &str, right: &str) -> NodeArena {
    let mut arena = NodeArena::new();
    let root = arena.insert_node(FormulaNode::leaf(payload));
    let left = arena.insert_node(FormulaNode::leaf(left));
    let right = arena.insert_node(FormulaNode::leaf(right));
    arena.get_node_mut(root).unwrap().children = Some(Children { left, right });
    arena
}

fn single(payload: &str) -> NodeArena {
    let mut arena = NodeArena::new();
    arena.insert_node(FormulaNode::leaf(payload));
    arena
}

#[rstest]
#[case("x")]
#[case("-x")]
#[case("+x")]
#[case("--x")]
#[case("0")]
#[case("12.5")]
#[case("-3")]
#[case("+0.25")]
fn given_accepted_leaf_when_validating_then_valid(#[case] payload: &str) {
    assert!(validate(&single(payload)));
}

#[rstest]
#[case("---x")]
#[case("x-")]
#[case("X")]
#[case("")]
#[case(".")]
#[case("1e5")]
#[case("inf")]
#[case("(x)")]
fn given_rejected_leaf_when_validating_then_invalid(#[case] payload: &str) {
    assert!(!validate(&single(payload)));
}

#[rstest]
#[case("+")]
#[case("-")]
#[case("*")]
#[case("/")]
#[case("^")]
fn given_operator_node_with_valid_operands_when_validating_then_valid(#[case] op: &str) {
    assert!(validate(&binary(op, "x", "2")));
}

#[rstest]
#[case("x")]
#[case("**")]
#[case("+-")]
#[case("")]
#[case("%")]
fn given_internal_node_without_single_operator_when_validating_then_invalid(
    #[case] payload: &str,
) {
    assert!(!validate(&binary(payload, "x", "2")));
}

#[test]
fn given_deep_invalid_leaf_when_validating_then_whole_tree_invalid() {
    // Arrange: (x * 2) + (3 - y)
    let mut arena = NodeArena::new();
    let root = arena.insert_node(FormulaNode::leaf("+"));
    let product = arena.insert_node(FormulaNode::leaf("*"));
    let difference = arena.insert_node(FormulaNode::leaf("-"));
    let x = arena.insert_node(FormulaNode::leaf("x"));
    let two = arena.insert_node(FormulaNode::leaf("2"));
    let three = arena.insert_node(FormulaNode::leaf("3"));
    let y = arena.insert_node(FormulaNode::leaf("y"));
    arena.get_node_mut(root).unwrap().children = Some(Children {
        left: product,
        right: difference,
    });
    arena.get_node_mut(product).unwrap().children = Some(Children { left: x, right: two });
    arena.get_node_mut(difference).unwrap().children = Some(Children {
        left: three,
        right: y,
    });

    // Act
    let valid = validate(&arena);

    // Assert
    assert!(!valid);
    assert_eq!(arena.depth(), 3);
    assert_eq!(arena.leaf_payloads(), vec!["x", "2", "3", "y"]);
}

#[test]
fn given_empty_arena_when_validating_then_invalid() {
    assert!(!validate(&NodeArena::new()));
}
