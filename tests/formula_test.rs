//! Tests for building and evaluating formulas end to end

use rstest::rstest;

use rsgraph::domain::FormulaTree;
use rsgraph::util::testing;
use rsgraph::{build, evaluate};

fn value_at(formula: &str, input: f64) -> f64 {
    let (tree, valid) = build(formula);
    assert!(valid, "expected {:?} to be valid", formula);
    evaluate(&tree, input)
}

// ============================================================
// Precedence and associativity
// ============================================================

#[rstest]
#[case("2+3*4", 14.0)]
#[case("(2+3)*4", 20.0)]
#[case("8-3-2", 3.0)]
#[case("8/4/2", 1.0)]
#[case("2^3", 8.0)]
#[case("1+2^3*2", 17.0)]
#[case("10-2*3+1", 5.0)]
fn given_constant_formula_when_evaluating_then_honors_precedence(
    #[case] formula: &str,
    #[case] expected: f64,
) {
    testing::init_test_setup();
    for input in [-3.0, 0.0, 2.5] {
        assert_eq!(value_at(formula, input), expected, "{} at {}", formula, input);
    }
}

#[rstest]
#[case("2*x^2", 3.0, 18.0)]
#[case("x^2-4x+4", 2.0, 0.0)]
#[case("x^2-4x+4", 5.0, 9.0)]
#[case("3-x", 5.0, -2.0)]
#[case("1.5x", 2.0, 3.0)]
#[case(" x - 1 ", 4.0, 3.0)]
fn given_formula_in_x_when_evaluating_then_substitutes_input(
    #[case] formula: &str,
    #[case] input: f64,
    #[case] expected: f64,
) {
    assert_eq!(value_at(formula, input), expected);
}

// ============================================================
// Implicit multiplication
// ============================================================

#[rstest]
#[case("2x", "2*x")]
#[case("2(x+1)", "2*(x+1)")]
#[case("(x+1)(x-1)", "(x+1)*(x-1)")]
#[case("x(x+2)3", "x*(x+2)*3")]
#[case("(x)x", "(x)*x")]
fn given_implied_multiplication_when_evaluating_then_matches_explicit_form(
    #[case] implicit: &str,
    #[case] explicit: &str,
) {
    for input in [-2.0, -0.5, 0.0, 1.0, 3.0, 10.0] {
        assert_eq!(value_at(implicit, input), value_at(explicit, input));
    }
}

// ============================================================
// Unary signs
// ============================================================

#[rstest]
#[case("-x", -5.0)]
#[case("+x", 5.0)]
#[case("--x", 5.0)]
#[case("-(x+1)", -6.0)]
#[case("3--x", 8.0)]
#[case("2*-x", -10.0)]
#[case("-2*x", -10.0)]
#[case("-x^2", -25.0)]
#[case("(-x)", -5.0)]
fn given_signed_operand_when_evaluating_at_five_then_applies_sign(
    #[case] formula: &str,
    #[case] expected: f64,
) {
    assert_eq!(value_at(formula, 5.0), expected);
}

#[test]
fn given_sign_after_operator_before_group_when_building_then_zero_joins_left_operand() {
    // Arrange
    let tree = FormulaTree::build("2*-(x+1)");

    // Act
    let leaves = tree.nodes().leaf_payloads();

    // Assert
    assert!(tree.is_valid());
    assert_eq!(leaves, vec!["2", "0", "x", "1"]);
    assert_eq!(tree.evaluate(5.0), -6.0);
}

// ============================================================
// Grouping
// ============================================================

#[test]
fn given_redundant_groups_when_building_then_tree_matches_bare_variable() {
    // Arrange
    let grouped = FormulaTree::build("((x))");
    let bare = FormulaTree::build("x");

    // Assert
    assert!(grouped.is_valid());
    assert!(bare.is_valid());
    assert_eq!(grouped.nodes().leaf_payloads(), bare.nodes().leaf_payloads());
    assert_eq!(grouped.nodes().depth(), 1);
    for input in [-4.0, 0.0, 0.25, 9.0] {
        assert_eq!(grouped.evaluate(input), bare.evaluate(input));
    }
}

#[test]
fn given_same_priority_chain_when_building_then_tree_is_left_associative() {
    let tree = FormulaTree::build("8-3-2");
    let root = tree.nodes().root().unwrap();
    let root_node = tree.nodes().get_node(root).unwrap();

    assert_eq!(root_node.payload, "-");
    let children = root_node.children.unwrap();
    assert_eq!(tree.nodes().get_node(children.left).unwrap().payload, "-");
    assert_eq!(tree.nodes().get_node(children.right).unwrap().payload, "2");
    assert_eq!(tree.nodes().leaf_payloads(), vec!["8", "3", "2"]);
    assert_eq!(tree.nodes().depth(), 3);
}

// ============================================================
// Validation
// ============================================================

#[rstest]
#[case("x+")]
#[case("*x")]
#[case("")]
#[case("   ")]
#[case("x2")]
#[case("(x+1")]
#[case("x)")]
#[case("()")]
#[case("x^")]
#[case("x+*2")]
#[case("sin(x)")]
#[case("1..2")]
#[case("2e3")]
#[case("y+1")]
fn given_malformed_formula_when_building_then_invalid(#[case] formula: &str) {
    let (_, valid) = build(formula);
    assert!(!valid, "expected {:?} to be invalid", formula);
}

#[test]
fn given_invalid_formula_when_requiring_valid_then_errors_with_source() {
    let result = FormulaTree::build("x+").require_valid();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("x+"));
}

// ============================================================
// Determinism and totality
// ============================================================

#[test]
fn given_same_text_when_building_twice_then_results_agree() {
    let first = FormulaTree::build("3x^2 - 2(x - 1)/4");
    let second = FormulaTree::build("3x^2 - 2(x - 1)/4");

    assert_eq!(first.is_valid(), second.is_valid());
    assert_eq!(first.normalized(), second.normalized());
    for step in -20..=20 {
        let input = f64::from(step) * 0.37;
        assert_eq!(first.evaluate(input), second.evaluate(input));
    }
}

#[test]
fn given_division_by_zero_when_evaluating_then_returns_infinity() {
    let (tree, valid) = build("1/0");

    assert!(valid);
    for input in [-1.0, 0.0, 1.0] {
        assert_eq!(evaluate(&tree, input), f64::INFINITY);
    }
}

#[test]
fn given_undefined_arithmetic_when_evaluating_then_returns_nan() {
    assert!(value_at("0/0", 1.0).is_nan());
    assert!(value_at("x^0.5", -4.0).is_nan());
    assert!(value_at("1/x", 0.0).is_infinite());
}

#[test]
fn given_invalid_or_empty_tree_when_evaluating_then_does_not_panic() {
    assert_eq!(FormulaTree::empty().evaluate(3.0), 0.0);
    assert!(!FormulaTree::empty().is_valid());

    // Missing right operand degrades to zero
    let (tree, _) = build("x+");
    assert_eq!(tree.evaluate(2.0), 2.0);

    for formula in ["", "*", ")(", "((", "x^^", "-", "+-*/^"] {
        let (tree, valid) = build(formula);
        assert!(!valid, "{:?}", formula);
        let _ = tree.evaluate(1.0);
    }
}

#[test]
fn given_long_operator_chain_when_building_then_builds_and_evaluates_without_recursion() {
    // Arrange
    let terms = 100_000;
    let formula = vec!["x"; terms].join("+");

    // Act
    let (tree, valid) = build(&formula);

    // Assert
    assert!(valid);
    assert_eq!(tree.nodes().depth(), terms);
    assert_eq!(evaluate(&tree, 2.0), 2.0 * terms as f64);
}

#[test]
fn given_deep_nested_groups_when_building_then_evaluates() {
    let depth = 2_000;
    let formula = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

    let (tree, valid) = build(&formula);

    assert!(valid);
    assert_eq!(tree.evaluate(-3.0), -3.0);
}
