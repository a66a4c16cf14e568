//! Expression evaluation capability.
//!
//! The numerical methods never parse formulas themselves. They call an
//! [`Evaluator`]: given an expression string and variable bindings, produce a
//! number or fail with an [`EvaluationError`](crate::types::EvaluationError).
//! Swapping the evaluator (for example a test double) needs no change to the
//! methods.
//!
//! ## Components
//!
//! - [`Evaluator`]: The capability trait, with a finite-difference default for derivatives
//! - [`Bindings`]: Variable name to value map passed to the evaluator
//! - [`ExprEvaluator`]: Default implementation (tokenizer, shunting-yard parser, RPN evaluation)
//! - [`Expression`]: A parsed formula in reverse Polish notation
//! - [`RealFunction`]: Binds an evaluator and a formula into `f(x)`
//!
//! ## Example
//!
//! ```
//! use numlab_core::expr::{Bindings, Evaluator, ExprEvaluator};
//!
//! let evaluator = ExprEvaluator::new();
//! let value = evaluator
//!     .evaluate("2^3 + sin(pi/2)", &Bindings::new())
//!     .unwrap();
//! assert!((value - 9.0).abs() < 1e-12);
//! ```

mod evaluator;
mod function;
mod parser;
mod scalar;
mod tokenizer;

pub use evaluator::{Bindings, Evaluator, ExprEvaluator};
pub use function::RealFunction;
pub use parser::Expression;
pub use scalar::{Scalar, UnaryFunction};
pub use tokenizer::{Token, Tokenizer};
