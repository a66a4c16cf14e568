//! Iterative root finding for `f(x) = 0`.
//!
//! This module provides:
//! - [`BisectionSolver`]: Bracketing method, halves `[xl, xr]` each iteration
//! - [`NewtonRaphsonSolver`]: Tangent-line method from a single initial guess
//! - [`SolverConfig`]: Shared tolerance and iteration cap
//! - [`RootSolution`]: Root estimate, convergence flag and per-iteration trace
//!
//! Both solvers stop when the relative approximate error
//! `|x_new - x_old| / |x_new| * 100` drops to the tolerance (in percent), or
//! when the iteration cap is reached. Hitting the cap is reported through
//! [`RootSolution::converged`], not as an error.
//!
//! # Example
//!
//! ```
//! use numlab_core::expr::ExprEvaluator;
//! use numlab_core::math::roots::newton_raphson;
//!
//! let evaluator = ExprEvaluator::new();
//! let solution = newton_raphson(&evaluator, "x^2 - 7", 2.0, 1e-6).unwrap();
//!
//! assert!(solution.converged);
//! assert!((solution.root - 2.6457513).abs() < 1e-7);
//! ```

mod bisection;
mod config;
mod newton_raphson;
mod solution;

pub use bisection::{bisection, BisectionSolver, BisectionStep};
pub use config::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_PERCENT};
pub use newton_raphson::{newton_raphson, NewtonRaphsonSolver, NewtonStep};
pub use solution::{relative_error_percent, RootSolution};
