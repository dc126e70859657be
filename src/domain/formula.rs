//! Compiled single-variable formula.

use tracing::{debug, instrument};

use crate::domain::arena::NodeArena;
use crate::domain::builder::TreeBuilder;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::evaluator;
use crate::domain::normalizer::normalize;
use crate::domain::validator::validate;

/// Expression tree built from one submission of formula text.
///
/// Built and validated once, then evaluated any number of times. Editing the
/// formula means building a new tree.
#[derive(Debug, Clone, Default)]
pub struct FormulaTree {
    source: String,
    normalized: String,
    nodes: NodeArena,
    valid: bool,
}

impl FormulaTree {
    /// Normalizes, splits and validates `text`. Malformed text still produces
    /// a tree; check [`FormulaTree::is_valid`] before relying on its values.
    #[instrument(level = "debug")]
    pub fn build(text: &str) -> Self {
        let normalized = normalize(text);
        let nodes = TreeBuilder::new().build(&normalized);
        let valid = validate(&nodes);
        debug!(%normalized, nodes = nodes.len(), valid, "formula built");
        Self {
            source: text.to_string(),
            normalized,
            nodes,
            valid,
        }
    }

    /// A tree without a root; evaluates to zero and is never valid.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the tree if it validated, an error naming the text otherwise.
    pub fn require_valid(self) -> DomainResult<Self> {
        if self.valid {
            Ok(self)
        } else {
            Err(DomainError::InvalidFormula(self.source))
        }
    }

    pub fn evaluate(&self, input: f64) -> f64 {
        evaluator::evaluate(&self.nodes, input)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Renders the expression tree, None for an empty tree.
    pub fn to_termtree(&self) -> Option<termtree::Tree<String>> {
        self.nodes.to_termtree(self.nodes.root()?)
    }
}

/// Builds a tree from raw text and reports whether it is usable.
pub fn build(text: &str) -> (FormulaTree, bool) {
    let tree = FormulaTree::build(text);
    let valid = tree.is_valid();
    (tree, valid)
}

/// Value of `tree` at `input`; never fails.
pub fn evaluate(tree: &FormulaTree, input: f64) -> f64 {
    tree.evaluate(input)
}
