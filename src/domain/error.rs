//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover caller-supplied parameters the core cannot work with.
/// Building and evaluating formulas never fail; see `FormulaTree::is_valid`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid formula: {0:?}")]
    InvalidFormula(String),

    #[error("invalid sample step: {0} (must be finite and positive)")]
    InvalidStep(f64),

    #[error("invalid sample range: {start}..{end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("sample step {step} does not advance past {start}")]
    StepBelowResolution { start: f64, step: f64 },

    #[error("too many samples: {count} (limit {limit})")]
    TooManySamples { count: f64, limit: usize },

    #[error("invalid viewport scale: {0} (must be finite and positive)")]
    InvalidScale(f64),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
