use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Left and right operand indices of an operator node.
///
/// Stored as a pair so a node carries either both operands or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    pub left: Index,
    pub right: Index,
}

/// Tree node in the arena-based expression tree.
#[derive(Debug, Clone)]
pub struct FormulaNode {
    /// Operand text for leaves, a single operator symbol for internal nodes
    pub payload: String,
    /// Operand indices, None for leaves
    pub children: Option<Children>,
}

impl FormulaNode {
    pub fn leaf(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

impl fmt::Display for FormulaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.payload.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "{}", self.payload)
        }
    }
}

/// Arena storage for one formula's expression tree.
#[derive(Debug, Clone)]
pub struct NodeArena {
    arena: Arena<FormulaNode>,
    root: Option<Index>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a detached node. The first node inserted becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, node: FormulaNode) -> Index {
        let idx = self.arena.insert(node);
        if self.root.is_none() {
            self.root = Some(idx);
        }
        idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&FormulaNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut FormulaNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order iterator, left operand before right operand.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels, counted without recursion.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();

        while let Some((idx, level)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            deepest = deepest.max(level);
            if let Some(children) = node.children {
                stack.push((children.left, level + 1));
                stack.push((children.right, level + 1));
            }
        }

        deepest
    }

    /// Leaf payloads from left to right.
    pub fn leaf_payloads(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.payload.as_str())
            .collect()
    }

    /// Renders the subtree below `idx` for terminal display.
    pub fn to_termtree(&self, idx: Index) -> Option<termtree::Tree<String>> {
        let node = self.get_node(idx)?;
        let mut tree = termtree::Tree::new(node.to_string());
        if let Some(children) = node.children {
            for child in [children.left, children.right] {
                if let Some(subtree) = self.to_termtree(child) {
                    tree.push(subtree);
                }
            }
        }
        Some(tree)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a NodeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a NodeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a FormulaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push right first so the left operand is visited first
                if let Some(children) = node.children {
                    self.stack.push(children.right);
                    self.stack.push(children.left);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
