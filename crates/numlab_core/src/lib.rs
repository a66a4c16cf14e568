//! # numlab_core: Classical Numerical Methods with Step Traces
//!
//! numlab_core implements the textbook algorithms of an introductory
//! numerical-analysis course. Every method is a pure function of its inputs
//! and returns the approximate answer together with the intermediate steps
//! that produced it, so a front end can show the working as well as the
//! result.
//!
//! - Root finding: bisection, Newton-Raphson (`math::roots`)
//! - Interpolation: linear and quadratic Newton divided differences (`math::interpolators`)
//! - Linear systems: Gauss elimination, Cramer's rule (`math::linalg`)
//! - Differentiation: central divided differences (`math::differentiation`)
//! - Integration: composite Simpson's rule (`math::integration`)
//!
//! Methods that work on a formula take an [`expr::Evaluator`] capability, so
//! the expression language is replaceable. [`expr::ExprEvaluator`] is the
//! default implementation.
//!
//! ## Usage Examples
//!
//! ```rust
//! use numlab_core::expr::ExprEvaluator;
//! use numlab_core::math::roots::bisection;
//!
//! let evaluator = ExprEvaluator::new();
//! let solution = bisection(&evaluator, "x^2 - 7", 0.0, 5.0, 1e-4).unwrap();
//!
//! assert!(solution.converged);
//! assert!((solution.root - 7.0_f64.sqrt()).abs() < 1e-5);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): exact expression derivatives via num-dual
//! - `serde`: `Serialize`/`Deserialize` for results, traces and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod expr;
pub mod math;
pub mod types;

pub use types::{DomainError, ErrorKind, EvaluationError, NumericError, ValidationError};
