//! Shared data types.
//!
//! This module provides:
//! - `error`: The error taxonomy shared by every numerical method
//! - `point`: Sample points `(x, f(x))` used by the interpolators
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`NumericError`], [`ValidationError`], [`EvaluationError`], [`DomainError`], [`ErrorKind`] from `error`
//! - [`Point`] from `point`

pub mod error;
pub mod point;

pub use error::{DomainError, ErrorKind, EvaluationError, NumericError, ValidationError};
pub use point::Point;
