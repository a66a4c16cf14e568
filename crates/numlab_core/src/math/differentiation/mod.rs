//! Numerical differentiation.
//!
//! This module provides:
//! - [`CentralDifference`]: Central divided-difference formulas up to [`MAX_ORDER`]
//! - [`central_difference`]: Convenience wrapper taking an expression string
//! - [`DerivativeResult`] / [`DifferenceTerm`]: The estimate and each sampled term

mod central;

pub use central::{
    central_difference, CentralDifference, DerivativeResult, DifferenceTerm, MAX_ORDER,
};
