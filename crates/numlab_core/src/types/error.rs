//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: Malformed or out-of-domain caller input
//! - `EvaluationError`: The expression evaluator could not parse or evaluate a formula
//! - `DomainError`: A mathematically undefined operation during computation
//! - `NumericError`: The umbrella error returned by every numerical method
//!
//! Every failure is local: a method stops at the first error and returns no
//! partial result. The variants carry enough context (which input, which
//! step) for a caller to render a message.

use thiserror::Error;

/// Broad classification of a [`NumericError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Invalid caller input
    Validation,
    /// Expression could not be evaluated
    Evaluation,
    /// Mathematically undefined operation
    Domain,
}

/// Invalid caller input.
///
/// # Examples
/// ```
/// use numlab_core::types::ValidationError;
///
/// let err = ValidationError::InvalidSubintervals { n: 3 };
/// assert!(format!("{}", err).contains("even"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    /// Simpson's rule needs a positive, even number of subintervals.
    #[error("Number of subintervals must be positive and even, got {n}")]
    InvalidSubintervals {
        /// Requested subinterval count
        n: usize,
    },

    /// Differentiation order below 1.
    #[error("Differentiation order must be at least 1, got {order}")]
    InvalidOrder {
        /// Requested order
        order: i64,
    },

    /// Differentiation order whose coefficients overflow `f64`.
    #[error("Differentiation order {order} exceeds the maximum of {max}")]
    OrderTooLarge {
        /// Requested order
        order: i64,
        /// Largest supported order
        max: i64,
    },

    /// Step size is zero.
    #[error("Step size h must be non-zero")]
    ZeroStepSize,

    /// Wrong number of interpolation points.
    #[error("Wrong number of points: got {got}, need {need}")]
    PointCount {
        /// Number of points provided
        got: usize,
        /// Number of points required
        need: usize,
    },

    /// A selected point index does not exist.
    #[error("Point index {index} out of range for {len} points")]
    PointIndexOutOfRange {
        /// Requested (zero-based) index
        index: usize,
        /// Number of available points
        len: usize,
    },

    /// The coefficient matrix has no rows.
    #[error("System must have at least one equation")]
    EmptySystem,

    /// A matrix row does not have the expected length.
    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        /// Offending row index
        row: usize,
        /// Length of that row
        len: usize,
        /// Expected length
        expected: usize,
    },

    /// The right-hand side does not match the matrix size.
    #[error("Constant vector has {got} entries, expected {expected}")]
    DimensionMismatch {
        /// Length of the constant vector
        got: usize,
        /// Number of matrix rows
        expected: usize,
    },

    /// A numeric input is NaN or infinite.
    #[error("Input `{name}` must be finite")]
    NonFiniteInput {
        /// Name of the offending input
        name: String,
    },

    /// Tolerance is negative or not finite.
    #[error("Tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    /// Iteration cap of zero.
    #[error("Maximum iterations must be greater than zero")]
    InvalidIterationCap,
}

/// Failure reported by an expression evaluator.
///
/// # Examples
/// ```
/// use numlab_core::types::EvaluationError;
///
/// let err = EvaluationError::UnknownVariable("y".to_string());
/// assert_eq!(format!("{}", err), "Unknown variable: y");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationError {
    /// The expression text could not be tokenized or parsed.
    #[error("Syntax error at position {position}: {message}")]
    Syntax {
        /// Character offset of the problem
        position: usize,
        /// Description of the problem
        message: String,
    },

    /// A variable without a binding.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// A function the evaluator does not provide.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A function called with an unsupported number of arguments.
    #[error("Function `{function}` does not accept {got} argument(s)")]
    WrongArgumentCount {
        /// Function name
        function: String,
        /// Number of arguments supplied
        got: usize,
    },

    /// Operators and operands do not form a single value.
    #[error("Malformed expression: {0}")]
    Malformed(String),

    /// The expression evaluated to NaN or infinity (e.g. `log(-1)`).
    #[error("Expression is undefined here (result {value})")]
    NonFinite {
        /// The non-finite value produced
        value: f64,
    },
}

/// Mathematically undefined operation during a computation.
///
/// # Examples
/// ```
/// use numlab_core::types::DomainError;
///
/// let err = DomainError::SingularMatrix { determinant: 0.0 };
/// assert!(format!("{}", err).contains("no unique solution"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DomainError {
    /// Newton-Raphson hit a zero (or non-finite) derivative.
    #[error("Derivative is zero at x = {x} (iteration {iteration})")]
    ZeroDerivative {
        /// Point where the derivative vanished
        x: f64,
        /// Iteration number (1-based)
        iteration: usize,
    },

    /// Gauss elimination met a zero pivot; no row interchange is performed.
    #[error("Zero pivot in row {row}")]
    ZeroPivot {
        /// Pivot row (zero-based)
        row: usize,
    },

    /// Cramer's rule on a matrix with zero determinant.
    #[error("Matrix is singular (determinant {determinant}): no unique solution")]
    SingularMatrix {
        /// The computed determinant
        determinant: f64,
    },

    /// Two interpolation points share an x value.
    #[error("Duplicate x value {x} in interpolation points")]
    DuplicateAbscissa {
        /// The repeated x value
        x: f64,
    },

    /// A NaN or infinite intermediate result.
    #[error("Non-finite value {value} in {context}")]
    NonFinite {
        /// Where the value appeared
        context: String,
        /// The non-finite value
        value: f64,
    },
}

/// Error returned by every numerical method.
///
/// # Examples
/// ```
/// use numlab_core::types::{ErrorKind, NumericError, ValidationError};
///
/// let err: NumericError = ValidationError::ZeroStepSize.into();
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericError {
    /// Invalid caller input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The evaluator failed on `expression` at `x`.
    #[error("Failed to evaluate `{expression}` at x = {x}: {source}")]
    Evaluation {
        /// The expression being evaluated
        expression: String,
        /// The sample point
        x: f64,
        /// Underlying evaluator failure
        source: EvaluationError,
    },

    /// Mathematically undefined operation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl NumericError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::Validation(_) => ErrorKind::Validation,
            NumericError::Evaluation { .. } => ErrorKind::Evaluation,
            NumericError::Domain(_) => ErrorKind::Domain,
        }
    }

    /// Builds a [`DomainError::NonFinite`] error.
    pub(crate) fn non_finite(context: impl Into<String>, value: f64) -> Self {
        DomainError::NonFinite {
            context: context.into(),
            value,
        }
        .into()
    }
}

/// Returns `Ok(value)` if `value` is finite, else a [`ValidationError::NonFiniteInput`].
pub(crate) fn ensure_finite_input(name: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteInput {
            name: name.to_string(),
        })
    }
}
