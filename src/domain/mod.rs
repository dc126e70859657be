//! Domain layer: the formula compiler and sampling
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod normalizer;
pub mod operand;
pub mod operator;
pub mod sampler;
pub mod validator;

pub use arena::{Children, FormulaNode, NodeArena};
pub use builder::TreeBuilder;
pub use error::{DomainError, DomainResult};
pub use formula::{build, evaluate, FormulaTree};
pub use normalizer::normalize;
pub use operand::Operand;
pub use operator::{is_genuine_operator, Operator, VARIABLE};
pub use sampler::{sample, Point, SampleRange, Viewport};
pub use validator::validate;
