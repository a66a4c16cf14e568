//! CLI command implementations
//!
//! Each submodule builds a [`Report`](crate::output::Report) for one family
//! of methods; `solve` and `check` reuse them.

pub mod check;
pub mod differentiate;
pub mod integrate;
pub mod interpolate;
pub mod linear;
pub mod roots;
pub mod solve;
