//! rsgraph: compile single-variable formulas into expression trees and sample them.
//!
//! ```
//! let (tree, valid) = rsgraph::build("2(x+1)^2");
//! assert!(valid);
//! assert_eq!(rsgraph::evaluate(&tree, 1.0), 8.0);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{build, evaluate, FormulaTree};
