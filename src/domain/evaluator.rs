use generational_arena::Index;

use crate::domain::arena::{FormulaNode, NodeArena};
use crate::domain::operand::{parse_literal, Operand};
use crate::domain::operator::{is_genuine_operator, Operator};

/// Pending work while walking the tree in post-order.
enum Step {
    Visit(Index),
    Apply(Operator),
}

/// Evaluates the tree at `input`. Total: a missing root, empty payloads and
/// unparseable leaves all count as `0.0`; division by zero yields inf/NaN.
pub fn evaluate(arena: &NodeArena, input: f64) -> f64 {
    let Some(root) = arena.root() else {
        return 0.0;
    };

    let mut steps = vec![Step::Visit(root)];
    let mut values: Vec<f64> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(idx) => match arena.get_node(idx) {
                Some(node) => match operator_with_children(node) {
                    Some((operator, left, right)) => {
                        steps.push(Step::Apply(operator));
                        steps.push(Step::Visit(right));
                        steps.push(Step::Visit(left));
                    }
                    None => values.push(leaf_value(node, input)),
                },
                None => values.push(0.0),
            },
            Step::Apply(operator) => {
                let right = values.pop().unwrap_or(0.0);
                let left = values.pop().unwrap_or(0.0);
                values.push(operator.apply(left, right));
            }
        }
    }

    values.pop().unwrap_or(0.0)
}

fn operator_with_children(node: &FormulaNode) -> Option<(Operator, Index, Index)> {
    let payload = node.payload.as_str();
    if payload.is_empty()
        || matches!(Operand::parse(payload), Some(Operand::Variable { .. }))
        || !is_genuine_operator(payload, 0)
    {
        return None;
    }
    let operator = Operator::from_payload(payload)?;
    let children = node.children?;
    Some((operator, children.left, children.right))
}

/// Value of a node that is not a complete operator node.
fn leaf_value(node: &FormulaNode, input: f64) -> f64 {
    let payload = node.payload.as_str();
    if payload.is_empty() {
        return 0.0;
    }
    if let Some(variable @ Operand::Variable { .. }) = Operand::parse(payload) {
        return variable.value(input);
    }
    if is_genuine_operator(payload, 0) {
        // operator symbol without usable operands
        return 0.0;
    }
    parse_literal(payload).unwrap_or(0.0)
}
