use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::arena::{FormulaNode, NodeArena};
use crate::domain::operand::Operand;
use crate::domain::operator::is_genuine_operator;

/// Checks every node of the tree breadth-first.
///
/// Leaves must be numeric literals or one of the variable spellings; operator
/// nodes must hold exactly one genuine operator symbol and both operands.
/// All nodes are visited even after the first violation. An empty arena is
/// invalid.
#[instrument(level = "debug", skip(arena))]
pub fn validate(arena: &NodeArena) -> bool {
    let Some(root) = arena.root() else {
        return false;
    };

    let mut valid = true;
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(idx) = queue.pop_front() {
        let Some(node) = arena.get_node(idx) else {
            debug!(?idx, "dangling node index");
            valid = false;
            continue;
        };

        if let Some(children) = node.children {
            queue.push_back(children.left);
            queue.push_back(children.right);
        }

        if !node_is_valid(node) {
            debug!(payload = %node.payload, leaf = node.is_leaf(), "invalid node");
            valid = false;
        }
    }

    valid
}

fn node_is_valid(node: &FormulaNode) -> bool {
    if node.is_leaf() {
        Operand::parse(&node.payload).is_some()
    } else {
        node.payload.chars().count() == 1 && is_genuine_operator(&node.payload, 0)
    }
}
