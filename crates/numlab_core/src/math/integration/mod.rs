//! Numerical integration.
//!
//! This module provides:
//! - [`Simpson`]: Composite Simpson's rule, returning the sampled nodes
//! - [`simpson`]: Convenience wrapper returning only the value

mod simpson;

pub use simpson::{simpson, Simpson, SimpsonNode, SimpsonResult};
