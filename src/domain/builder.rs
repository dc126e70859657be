//! Tree builder: splits normalized formula text into a binary expression tree.

use std::borrow::Cow;
use std::ops::Range;

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::{Children, FormulaNode, NodeArena};
use crate::domain::operator::{is_genuine_operator, is_operator_symbol, Operator};

/// Position and kind of the operator a node is split at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub position: usize,
    pub operator: Operator,
}

/// Finds the rightmost lowest-priority genuine operator outside any group.
pub fn find_split(text: &str) -> Option<Split> {
    find_split_balanced(text, paren_balance(text))
}

/// `(` count minus `)` count.
fn paren_balance(text: &str) -> i32 {
    text.bytes().fold(0, |balance, b| match b {
        b'(' => balance + 1,
        b')' => balance - 1,
        _ => balance,
    })
}

/// Scans right to left, stopping at the first lowest-possible priority hit.
///
/// `balance` is the text's paren balance; it turns the depth counted from the
/// right end into the depth counted from the left.
fn find_split_balanced(text: &str, balance: i32) -> Option<Split> {
    let mut depth = balance;
    let mut best: Option<Split> = None;

    for (position, &b) in text.as_bytes().iter().enumerate().rev() {
        match b {
            b')' => depth += 1,
            b'(' => depth -= 1,
            _ if depth == 0 && is_genuine_operator(text, position) => {
                let Some(operator) = Operator::from_byte(b) else {
                    continue;
                };
                // strict `<` keeps the rightmost of equal priorities
                if best.map_or(true, |s| operator.priority() < s.operator.priority()) {
                    best = Some(Split { position, operator });
                    if operator.priority() == LOWEST_PRIORITY {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    best
}

const LOWEST_PRIORITY: u8 = 1;

/// True when the whole text is wrapped in one pair of group delimiters.
fn is_enclosing_group(text: &str) -> bool {
    text.len() > 2 && text.starts_with('(') && text.ends_with(')')
}

/// Sub-slice of pending node text, borrowed from the formula where possible.
fn slice<'a>(text: &Cow<'a, str>, range: Range<usize>) -> Cow<'a, str> {
    match text {
        Cow::Borrowed(s) => {
            let s: &'a str = s;
            Cow::Borrowed(&s[range])
        }
        Cow::Owned(s) => Cow::Owned(s[range].to_string()),
    }
}

/// Builds arena-backed expression trees from normalized formula text.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: NodeArena,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
        }
    }

    /// Splits `normalized` into a tree. Never fails: malformed text ends up
    /// in leaves or operator nodes the validator rejects.
    ///
    /// Works off an explicit stack, so long operator chains cannot exhaust
    /// the call stack.
    #[instrument(level = "debug", skip_all, fields(len = normalized.len()))]
    pub fn build(mut self, normalized: &str) -> NodeArena {
        // A split sits at depth 0, so the left operand is balanced and the
        // right operand inherits the whole balance. Stripping a group keeps it.
        let root = self.arena.insert_node(FormulaNode::leaf(""));
        let mut pending = vec![(root, Cow::Borrowed(normalized), paren_balance(normalized))];

        while let Some((idx, text, balance)) = pending.pop() {
            match divide(&text, balance) {
                Division::Leaf(leaf) => self.set_payload(idx, leaf.into_owned(), None),
                Division::Node {
                    left,
                    right,
                    operator,
                } => {
                    let left_idx = self.arena.insert_node(FormulaNode::leaf(""));
                    let right_idx = self.arena.insert_node(FormulaNode::leaf(""));
                    self.set_payload(
                        idx,
                        operator.symbol().to_string(),
                        Some(Children {
                            left: left_idx,
                            right: right_idx,
                        }),
                    );
                    pending.push((right_idx, right, balance));
                    pending.push((left_idx, left, 0));
                }
            }
        }

        self.arena
    }

    fn set_payload(&mut self, idx: Index, payload: String, children: Option<Children>) {
        if let Some(node) = self.arena.get_node_mut(idx) {
            node.payload = payload;
            node.children = children;
        }
    }
}

/// Outcome of dividing one node's text.
enum Division<'a> {
    Leaf(Cow<'a, str>),
    Node {
        left: Cow<'a, str>,
        right: Cow<'a, str>,
        operator: Operator,
    },
}

/// Strips redundant groups, then splits at the chosen operator. A sign with no
/// left operand gets a synthesized `0` appended to whatever precedes it.
fn divide<'a>(text: &Cow<'a, str>, balance: i32) -> Division<'a> {
    let mut inner = 0..text.len();
    let Split { position, operator } = loop {
        let current = &text[inner.clone()];
        match find_split_balanced(current, balance) {
            Some(split) => break split,
            None if is_enclosing_group(current) => {
                trace!(text = current, "stripping redundant group");
                inner = inner.start + 1..inner.end - 1;
            }
            None => return Division::Leaf(slice(text, inner)),
        }
    };

    let at = inner.start + position;
    let missing_left = position == 0 || is_operator_symbol(text.as_bytes()[at - 1]);
    let left = if operator.is_sign() && missing_left && inner.len() > 1 {
        Cow::Owned(format!("{}0", &text[inner.start..at]))
    } else {
        slice(text, inner.start..at)
    };
    let right = slice(text, at + 1..inner.end);
    trace!(%operator, position = at, "split");
    Division::Node {
        left,
        right,
        operator,
    }
}
