//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod lines;

pub use lines::{Line, LineId, LineService, RenderedLine};
