//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic on behalf of a plotting host.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{Line, LineId, LineService, RenderedLine};
