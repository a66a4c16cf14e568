//! Composite Simpson's 1/3 rule.

use crate::expr::{Evaluator, RealFunction};
use crate::types::error::ensure_finite_input;
use crate::types::{NumericError, ValidationError};

/// A quadrature node and its Simpson weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpsonNode {
    /// `a + i*h`.
    pub x: f64,
    /// `f(x)`.
    pub fx: f64,
    /// 1 at the ends, 4 at odd nodes, 2 at interior even nodes.
    pub weight: f64,
}

/// Result of [`Simpson::integrate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpsonResult {
    /// The integral estimate `h/3 * sum(weight * fx)`.
    pub value: f64,
    /// Subinterval width `(b - a) / n`.
    pub h: f64,
    /// The `n + 1` nodes from `a` to `b`.
    pub nodes: Vec<SimpsonNode>,
}

/// Composite Simpson's rule with `n` subintervals.
///
/// Exact for polynomials of degree at most 3. Reversed limits (`b < a`)
/// give the negated integral.
///
/// # Example
///
/// ```
/// use numlab_core::expr::{ExprEvaluator, RealFunction};
/// use numlab_core::math::integration::Simpson;
///
/// let evaluator = ExprEvaluator::new();
/// let f = RealFunction::new(&evaluator, "x^3");
///
/// let result = Simpson::new(2).unwrap().integrate(&f, 0.0, 2.0).unwrap();
/// assert!((result.value - 4.0).abs() < 1e-12);
/// assert_eq!(result.nodes.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simpson {
    n: usize,
}

impl Simpson {
    /// A rule with `n` subintervals.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidSubintervals`] unless `n` is positive and even.
    pub fn new(n: usize) -> Result<Self, ValidationError> {
        if n == 0 || n % 2 != 0 {
            return Err(ValidationError::InvalidSubintervals { n });
        }
        Ok(Self { n })
    }

    /// Number of subintervals.
    pub fn subintervals(&self) -> usize {
        self.n
    }

    /// Integrate `f` over `[a, b]`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonFiniteInput`] if a limit is NaN or infinite
    /// - [`NumericError::Evaluation`] if `f` fails at a node
    /// - [`NumericError::Domain`] if a node value or the result is not finite
    pub fn integrate<E: Evaluator + ?Sized>(
        &self,
        f: &RealFunction<'_, E>,
        a: f64,
        b: f64,
    ) -> Result<SimpsonResult, NumericError> {
        let a = ensure_finite_input("a", a)?;
        let b = ensure_finite_input("b", b)?;
        let h = (b - a) / self.n as f64;

        let mut nodes = Vec::with_capacity(self.n + 1);
        let mut sum = 0.0;
        for i in 0..=self.n {
            let x = if i == self.n { b } else { a + i as f64 * h };
            let weight = if i == 0 || i == self.n {
                1.0
            } else if i % 2 == 0 {
                2.0
            } else {
                4.0
            };
            let fx = f.eval(x)?;
            sum += weight * fx;
            nodes.push(SimpsonNode { x, fx, weight });
        }

        let value = h / 3.0 * sum;
        if !value.is_finite() {
            return Err(NumericError::non_finite("Simpson sum", value));
        }

        tracing::debug!(n = self.n, a, b, value, "simpson");
        Ok(SimpsonResult { value, h, nodes })
    }
}

/// Simpson's rule on an expression in `x`.
///
/// # Errors
///
/// See [`Simpson::new`] and [`Simpson::integrate`].
pub fn simpson<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    a: f64,
    b: f64,
    n: usize,
) -> Result<f64, NumericError> {
    let f = RealFunction::new(evaluator, expression);
    Ok(Simpson::new(n)?.integrate(&f, a, b)?.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprEvaluator;
    use crate::types::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let ev = ExprEvaluator::new();
        assert_relative_eq!(simpson(&ev, "x", 1.0, 3.0, 2).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_for_cubics() {
        let ev = ExprEvaluator::new();
        // integral of x^3 - 2x + 1 over [-1, 2] = 15/4 - 3 + 3
        let value = simpson(&ev, "x^3 - 2*x + 1", -1.0, 2.0, 6).unwrap();
        assert_relative_eq!(value, 3.75, epsilon = 1e-12);
    }

    #[test]
    fn test_converges_on_smooth_function() {
        let ev = ExprEvaluator::new();
        let value = simpson(&ev, "exp(x)", 0.0, 1.0, 100).unwrap();
        assert_relative_eq!(value, std::f64::consts::E - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nodes_and_weights() {
        let ev = ExprEvaluator::new();
        let f = RealFunction::new(&ev, "x^2");
        let result = Simpson::new(4).unwrap().integrate(&f, 0.0, 2.0).unwrap();

        assert_eq!(result.h, 0.5);
        let weights: Vec<f64> = result.nodes.iter().map(|n| n.weight).collect();
        assert_eq!(weights, vec![1.0, 4.0, 2.0, 4.0, 1.0]);
        let xs: Vec<f64> = result.nodes.iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_relative_eq!(result.value, 8.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_limits() {
        let ev = ExprEvaluator::new();
        let forward = simpson(&ev, "x^2", 0.0, 3.0, 2).unwrap();
        let backward = simpson(&ev, "x^2", 3.0, 0.0, 2).unwrap();
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_interval() {
        let ev = ExprEvaluator::new();
        assert_eq!(simpson(&ev, "x", 2.0, 2.0, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_subintervals() {
        assert_eq!(Simpson::new(0), Err(ValidationError::InvalidSubintervals { n: 0 }));
        assert_eq!(Simpson::new(5), Err(ValidationError::InvalidSubintervals { n: 5 }));
        assert!(Simpson::new(2).is_ok());
    }

    #[test]
    fn test_singular_integrand() {
        let ev = ExprEvaluator::new();
        let err = simpson(&ev, "1/x", 0.0, 1.0, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);

        let err = simpson(&ev, "x", f64::NAN, 1.0, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
