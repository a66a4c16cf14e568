//! Numerical methods.
//!
//! Each submodule holds one family of methods. The families are independent
//! of one another; methods on formulas share only the
//! [`Evaluator`](crate::expr::Evaluator) capability.
//!
//! - [`roots`]: Bisection and Newton-Raphson
//! - [`interpolators`]: Newton divided-difference interpolation
//! - [`linalg`]: Gauss elimination and Cramer's rule
//! - [`differentiation`]: Central divided differences
//! - [`integration`]: Composite Simpson's rule

pub mod differentiation;
pub mod integration;
pub mod interpolators;
pub mod linalg;
pub mod roots;
