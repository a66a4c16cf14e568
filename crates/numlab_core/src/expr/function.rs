//! Real functions of one variable backed by an [`Evaluator`].

use super::evaluator::{Bindings, Evaluator};
use crate::types::{EvaluationError, NumericError};

/// `f(x)` defined by an expression string and an evaluator.
///
/// Evaluator failures become [`NumericError::Evaluation`] carrying the sample
/// point. A non-finite value returned by any evaluator is treated as an error
/// ([`DomainError::NonFinite`](crate::types::DomainError::NonFinite)).
///
/// # Example
///
/// ```
/// use numlab_core::expr::{ExprEvaluator, RealFunction};
///
/// let evaluator = ExprEvaluator::new();
/// let f = RealFunction::new(&evaluator, "x^3");
///
/// assert_eq!(f.eval(2.0).unwrap(), 8.0);
/// assert!(f.eval(f64::NAN).is_err());
/// ```
#[derive(Debug)]
pub struct RealFunction<'a, E: Evaluator + ?Sized> {
    evaluator: &'a E,
    expression: &'a str,
    variable: &'a str,
}

impl<E: Evaluator + ?Sized> Clone for RealFunction<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Evaluator + ?Sized> Copy for RealFunction<'_, E> {}

impl<'a, E: Evaluator + ?Sized> RealFunction<'a, E> {
    /// A function of `x`.
    pub fn new(evaluator: &'a E, expression: &'a str) -> Self {
        Self::with_variable(evaluator, expression, "x")
    }

    /// A function of the named variable.
    pub fn with_variable(evaluator: &'a E, expression: &'a str, variable: &'a str) -> Self {
        Self {
            evaluator,
            expression,
            variable,
        }
    }

    /// The expression text.
    pub fn expression(&self) -> &'a str {
        self.expression
    }

    /// The free variable.
    pub fn variable(&self) -> &'a str {
        self.variable
    }

    /// Evaluate `f(x)`.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Evaluation`] if the evaluator fails
    /// - [`NumericError::Domain`] if the value is NaN or infinite
    pub fn eval(&self, x: f64) -> Result<f64, NumericError> {
        let value = self
            .evaluator
            .evaluate(self.expression, &Bindings::single(self.variable, x))
            .map_err(|source| self.evaluation_error(x, source))?;
        self.check_finite("f", x, value)
    }

    /// Evaluate `f'(x)`.
    ///
    /// # Errors
    ///
    /// Same as [`RealFunction::eval`].
    pub fn derivative(&self, x: f64) -> Result<f64, NumericError> {
        let value = self
            .evaluator
            .derivative(self.expression, self.variable, &Bindings::single(self.variable, x))
            .map_err(|source| self.evaluation_error(x, source))?;
        self.check_finite("f'", x, value)
    }

    fn evaluation_error(&self, x: f64, source: EvaluationError) -> NumericError {
        NumericError::Evaluation {
            expression: self.expression.to_string(),
            x,
            source,
        }
    }

    fn check_finite(&self, name: &str, x: f64, value: f64) -> Result<f64, NumericError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(NumericError::non_finite(format!("{}({})", name, x), value))
        }
    }
}
