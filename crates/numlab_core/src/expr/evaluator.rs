//! The evaluator capability and its default implementation.

use std::collections::BTreeMap;

use super::parser::Expression;
use crate::types::EvaluationError;

/// Relative step of the finite-difference fallback in [`Evaluator::derivative`].
const DERIVATIVE_STEP: f64 = 1e-6;

/// Variable values passed to an [`Evaluator`].
///
/// # Example
///
/// ```
/// use numlab_core::expr::Bindings;
///
/// let bindings = Bindings::single("x", 2.0).with("y", 3.0);
/// assert_eq!(bindings.get("x"), Some(2.0));
/// assert_eq!(bindings.get("z"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(BTreeMap<String, f64>);

impl Bindings {
    /// Empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings holding a single variable.
    pub fn single(name: &str, value: f64) -> Self {
        Self::new().with(name, value)
    }

    /// Add or replace a binding, builder style.
    #[must_use]
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Add or replace a binding.
    pub fn set(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), value);
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Evaluates expression strings under variable bindings.
///
/// Implementations must report malformed expressions and domain violations
/// as an [`EvaluationError`] rather than returning NaN.
pub trait Evaluator {
    /// Evaluate `expression` with `bindings`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the expression cannot be parsed or
    /// evaluated at the given bindings.
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<f64, EvaluationError>;

    /// Derivative of `expression` with respect to `variable` at `bindings`.
    ///
    /// The provided implementation uses a symmetric finite difference with
    /// step `1e-6 * max(1, |x|)`. Implementations that can differentiate
    /// exactly should override it.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownVariable`] if `variable` is not bound,
    /// or any error from evaluating the expression.
    fn derivative(
        &self,
        expression: &str,
        variable: &str,
        bindings: &Bindings,
    ) -> Result<f64, EvaluationError> {
        let x = bindings
            .get(variable)
            .ok_or_else(|| EvaluationError::UnknownVariable(variable.to_string()))?;
        let h = DERIVATIVE_STEP * x.abs().max(1.0);

        let forward = self.evaluate(expression, &bindings.clone().with(variable, x + h))?;
        let backward = self.evaluate(expression, &bindings.clone().with(variable, x - h))?;
        let slope = (forward - backward) / (2.0 * h);

        if slope.is_finite() {
            Ok(slope)
        } else {
            Err(EvaluationError::NonFinite { value: slope })
        }
    }
}

/// Default [`Evaluator`]: arithmetic, `^`, and common transcendental functions.
///
/// Supports `+ - * / % ^`, unary minus, parentheses, the constants `pi` and
/// `e`, and the functions `sin cos tan asin acos atan sinh cosh tanh exp ln
/// log log10 log2 sqrt cbrt abs`, `log(x, base)`, `pow(x, y)`, `max(..)` and
/// `min(..)`. With the `num-dual-mode` feature, derivatives are exact.
///
/// # Example
///
/// ```
/// use numlab_core::expr::{Bindings, Evaluator, ExprEvaluator};
///
/// let evaluator = ExprEvaluator::new();
/// let at_two = Bindings::single("x", 2.0);
///
/// assert_eq!(evaluator.evaluate("x^2 - 7", &at_two).unwrap(), -3.0);
/// assert!((evaluator.derivative("x^2 - 7", "x", &at_two).unwrap() - 4.0).abs() < 1e-6);
/// assert!(evaluator.evaluate("log(-1)", &at_two).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEvaluator;

impl ExprEvaluator {
    /// Create an evaluator.
    pub fn new() -> Self {
        Self
    }
}

fn finite(value: f64) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite { value })
    }
}

impl Evaluator for ExprEvaluator {
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<f64, EvaluationError> {
        let expr = Expression::parse(expression)?;
        let value: f64 = expr.eval(|name| bindings.get(name))?;
        finite(value)
    }

    #[cfg(feature = "num-dual-mode")]
    fn derivative(
        &self,
        expression: &str,
        variable: &str,
        bindings: &Bindings,
    ) -> Result<f64, EvaluationError> {
        use num_dual::Dual64;

        let x = bindings
            .get(variable)
            .ok_or_else(|| EvaluationError::UnknownVariable(variable.to_string()))?;
        let expr = Expression::parse(expression)?;
        let seeded = Dual64::new(x, 1.0);
        let result: Dual64 = expr.eval(|name| {
            if name == variable {
                Some(seeded)
            } else {
                bindings.get(name).map(Dual64::from)
            }
        })?;
        finite(result.re)?;
        finite(result.eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Evaluator that only knows `x^3`, relying on the provided derivative.
    struct Cube;

    impl Evaluator for Cube {
        fn evaluate(&self, _: &str, bindings: &Bindings) -> Result<f64, EvaluationError> {
            let x = bindings
                .get("x")
                .ok_or_else(|| EvaluationError::UnknownVariable("x".to_string()))?;
            Ok(x * x * x)
        }
    }

    #[test]
    fn test_bindings() {
        let mut b = Bindings::new();
        b.set("x", 1.0);
        b.set("x", 2.0);
        assert_eq!(b.get("x"), Some(2.0));

        let pair = Bindings::single("b", 1.0).with("a", 2.0);
        let names: Vec<&str> = pair.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_evaluate() {
        let ev = ExprEvaluator::new();
        let value = ev
            .evaluate("x^3 - x - 1", &Bindings::single("x", 2.0))
            .unwrap();
        assert_relative_eq!(value, 5.0);
    }

    #[test]
    fn test_evaluate_reports_domain_violation() {
        let ev = ExprEvaluator::new();
        let err = ev
            .evaluate("log(x)", &Bindings::single("x", -1.0))
            .unwrap_err();
        assert!(matches!(err, EvaluationError::NonFinite { .. }));

        let err = ev.evaluate("1/x", &Bindings::single("x", 0.0)).unwrap_err();
        assert!(matches!(err, EvaluationError::NonFinite { .. }));
    }

    #[test]
    fn test_derivative_exact_or_close() {
        let ev = ExprEvaluator::new();
        let at = Bindings::single("x", 2.0);
        assert_relative_eq!(ev.derivative("x^2 - 7", "x", &at).unwrap(), 4.0, epsilon = 1e-6);
        assert_relative_eq!(
            ev.derivative("sin(x) * exp(x)", "x", &at).unwrap(),
            2.0_f64.exp() * (2.0_f64.sin() + 2.0_f64.cos()),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_derivative_with_other_bindings() {
        let ev = ExprEvaluator::new();
        let at = Bindings::single("x", 3.0).with("a", 5.0);
        assert_relative_eq!(ev.derivative("a * x^2", "x", &at).unwrap(), 30.0, epsilon = 1e-6);
    }

    #[test]
    fn test_derivative_unbound_variable() {
        let ev = ExprEvaluator::new();
        let err = ev.derivative("x", "x", &Bindings::new()).unwrap_err();
        assert_eq!(err, EvaluationError::UnknownVariable("x".to_string()));
    }

    #[test]
    fn test_provided_derivative_uses_finite_difference() {
        let d = Cube.derivative("", "x", &Bindings::single("x", 2.0)).unwrap();
        assert_relative_eq!(d, 12.0, epsilon = 1e-6);
    }
}
