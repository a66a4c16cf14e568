//! Central divided differences.

use crate::expr::{Evaluator, RealFunction};
use crate::types::error::ensure_finite_input;
use crate::types::{NumericError, ValidationError};

/// One sampled point of a difference formula.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifferenceTerm {
    /// Offset `i` in `x + i*h`.
    pub offset: i64,
    /// Sample point `x + i*h`.
    pub x: f64,
    /// `f(x + i*h)`.
    pub fx: f64,
    /// Weight applied to `fx`.
    pub coefficient: f64,
    /// Contribution to the derivative estimate.
    pub term: f64,
}

/// A derivative estimate with the samples that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivativeResult {
    /// The estimate.
    pub value: f64,
    /// One entry per sampled point, in stencil order (`x+h` first for order 1).
    pub trace: Vec<DifferenceTerm>,
}

/// Central difference formula of a given order and step.
///
/// Order 1 is `(f(x+h) - f(x-h)) / (2h)`.
///
/// For order `k >= 2`, with `n = floor((k+1)/2)`, each offset `i` in
/// `-n..=n` (skipping `0` when `k` is even) contributes
/// `(-1)^i * k! / ((n+i)! (n-i)!) * f(x + i*h) / (2h)^k`.
///
/// Orders above [`MAX_ORDER`] are rejected because `k!` overflows `f64`.
///
/// # Example
///
/// ```
/// use numlab_core::expr::{ExprEvaluator, RealFunction};
/// use numlab_core::math::differentiation::CentralDifference;
///
/// let evaluator = ExprEvaluator::new();
/// let f = RealFunction::new(&evaluator, "sin(x)");
///
/// let result = CentralDifference::new(1e-4, 1).unwrap().differentiate(&f, 0.0).unwrap();
/// assert!((result.value - 1.0).abs() < 1e-8);
/// assert_eq!(result.trace.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference {
    h: f64,
    order: i64,
}

impl CentralDifference {
    /// Create a formula with step `h` and derivative `order`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ZeroStepSize`] if `h == 0`
    /// - [`ValidationError::NonFiniteInput`] if `h` is NaN or infinite
    /// - [`ValidationError::InvalidOrder`] if `order < 1`
    /// - [`ValidationError::OrderTooLarge`] if `order > MAX_ORDER`
    pub fn new(h: f64, order: i64) -> Result<Self, ValidationError> {
        let h = ensure_finite_input("h", h)?;
        if h == 0.0 {
            return Err(ValidationError::ZeroStepSize);
        }
        if order < 1 {
            return Err(ValidationError::InvalidOrder { order });
        }
        if order > MAX_ORDER {
            return Err(ValidationError::OrderTooLarge {
                order,
                max: MAX_ORDER,
            });
        }
        Ok(Self { h, order })
    }

    /// Step size.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Derivative order.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Offsets and coefficients of the stencil, before division by `(2h)^order`.
    pub fn stencil(&self) -> Vec<(i64, f64)> {
        if self.order == 1 {
            return vec![(1, 1.0), (-1, -1.0)];
        }
        // k! / ((n+i)! (n-i)!) is C(2n, n+i) when k = 2n, and C(2n, n+i) / (k+1)
        // when k = 2n - 1. The binomials are built incrementally along the row.
        let n = (self.order + 1) / 2;
        let scale = if self.order % 2 == 0 {
            1.0
        } else {
            1.0 / (self.order + 1) as f64
        };
        let mut binomial = 1.0;
        let mut stencil = Vec::with_capacity(2 * n as usize + 1);
        for m in 0..=2 * n {
            let i = m - n;
            if !(self.order % 2 == 0 && i == 0) {
                let sign = if i.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
                stencil.push((i, sign * binomial * scale));
            }
            binomial = binomial * (2 * n - m) as f64 / (m + 1) as f64;
        }
        stencil
    }

    /// Estimate the derivative of `f` at `x`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonFiniteInput`] if `x` is NaN or infinite
    /// - [`NumericError::Evaluation`] if `f` fails at a sample point
    /// - [`NumericError::Domain`] if a sample or the estimate is not finite
    pub fn differentiate<E: Evaluator + ?Sized>(
        &self,
        f: &RealFunction<'_, E>,
        x: f64,
    ) -> Result<DerivativeResult, NumericError> {
        let x = ensure_finite_input("x", x)?;
        let denominator = (2.0 * self.h).powi(self.order.clamp(1, i32::MAX as i64) as i32);

        let mut trace = Vec::new();
        for (offset, coefficient) in self.stencil() {
            let xi = x + offset as f64 * self.h;
            let fx = f.eval(xi)?;
            let term = coefficient * fx / denominator;
            if !term.is_finite() {
                return Err(NumericError::non_finite(
                    format!("difference term at offset {}", offset),
                    term,
                ));
            }
            trace.push(DifferenceTerm {
                offset,
                x: xi,
                fx,
                coefficient,
                term,
            });
        }

        let value = if self.order == 1 {
            (trace[0].fx - trace[1].fx) / (2.0 * self.h)
        } else {
            trace.iter().map(|t| t.term).sum()
        };
        if !value.is_finite() {
            return Err(NumericError::non_finite("derivative estimate", value));
        }

        tracing::debug!(order = self.order, h = self.h, x, value, "central difference");
        Ok(DerivativeResult { value, trace })
    }
}

/// Largest supported derivative order; `171!` is not finite in `f64`.
pub const MAX_ORDER: i64 = 170;

/// Central difference of an expression in `x`.
///
/// # Errors
///
/// See [`CentralDifference::new`] and [`CentralDifference::differentiate`].
pub fn central_difference<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    x: f64,
    h: f64,
    order: i64,
) -> Result<DerivativeResult, NumericError> {
    let f = RealFunction::new(evaluator, expression);
    CentralDifference::new(h, order)?.differentiate(&f, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprEvaluator;
    use crate::types::ErrorKind;
    use approx::assert_relative_eq;

    // ========================================
    // First Order Tests
    // ========================================

    #[test]
    fn test_cube_first_order() {
        let ev = ExprEvaluator::new();
        let result = central_difference(&ev, "x^3", 2.0, 0.01, 1).unwrap();
        assert!((result.value - 12.0).abs() < 1e-2);
        // Exact for a cubic: 3x^2 + h^2
        assert_relative_eq!(result.value, 12.0001, epsilon = 1e-9);
    }

    #[test]
    fn test_first_order_trace() {
        let ev = ExprEvaluator::new();
        let result = central_difference(&ev, "x^2", 1.0, 0.5, 1).unwrap();

        assert_eq!(result.trace.len(), 2);
        let plus = result.trace[0];
        let minus = result.trace[1];
        assert_eq!((plus.offset, plus.x, plus.fx), (1, 1.5, 2.25));
        assert_eq!((minus.offset, minus.x, minus.fx), (-1, 0.5, 0.25));
        assert_eq!(plus.coefficient, 1.0);
        assert_eq!(minus.coefficient, -1.0);
        assert_relative_eq!(plus.term + minus.term, result.value);
        assert_relative_eq!(result.value, 2.0);
    }

    #[test]
    fn test_negative_step() {
        let ev = ExprEvaluator::new();
        let result = central_difference(&ev, "exp(x)", 0.0, -1e-3, 1).unwrap();
        assert_relative_eq!(result.value, 1.0, epsilon = 1e-6);
    }

    // ========================================
    // Higher Order Tests
    // ========================================

    #[test]
    fn test_stencil_order_two() {
        let cd = CentralDifference::new(0.1, 2).unwrap();
        assert_eq!(cd.stencil(), vec![(-1, -1.0), (1, -1.0)]);
    }

    #[test]
    fn test_stencil_order_three() {
        // n = 2, offsets -2..=2: (-1)^i * 3! / ((2+i)! (2-i)!)
        let cd = CentralDifference::new(0.1, 3).unwrap();
        assert_eq!(
            cd.stencil(),
            vec![(-2, 0.25), (-1, -1.0), (0, 1.5), (1, -1.0), (2, 0.25)]
        );
    }

    #[test]
    fn test_higher_order_sums_terms() {
        let ev = ExprEvaluator::new();
        let result = central_difference(&ev, "x^2", 1.0, 0.5, 2).unwrap();

        assert_eq!(result.trace.len(), 2);
        // -(f(0.5) + f(1.5)) / (2 * 0.5)^2
        assert_relative_eq!(result.value, -2.5);
        let total: f64 = result.trace.iter().map(|t| t.term).sum();
        assert_relative_eq!(total, result.value);
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_zero_step() {
        assert_eq!(CentralDifference::new(0.0, 1), Err(ValidationError::ZeroStepSize));
    }

    #[test]
    fn test_invalid_order() {
        assert_eq!(
            CentralDifference::new(0.1, -2),
            Err(ValidationError::InvalidOrder { order: -2 })
        );
        assert!(CentralDifference::new(0.1, 0).is_err());
    }

    #[test]
    fn test_evaluation_failure() {
        let ev = ExprEvaluator::new();
        let err = central_difference(&ev, "sqrt(x)", 0.0, 0.1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
    }

    #[test]
    fn test_order_too_large_fails_fast() {
        for order in [MAX_ORDER + 1, 40_000, i64::MAX] {
            assert_eq!(
                CentralDifference::new(0.1, order),
                Err(ValidationError::OrderTooLarge {
                    order,
                    max: MAX_ORDER
                })
            );
        }

        let ev = ExprEvaluator::new();
        let err = central_difference(&ev, "x", 1.0, 0.1, i64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_stencil_order_four() {
        // n = 2, offsets -2..=2 without 0: (-1)^i * 4! / ((2+i)! (2-i)!)
        let cd = CentralDifference::new(0.1, 4).unwrap();
        assert_eq!(
            cd.stencil(),
            vec![(-2, 1.0), (-1, -4.0), (1, -4.0), (2, 1.0)]
        );
    }

    #[test]
    fn test_max_order_stencil_is_finite() {
        let cd = CentralDifference::new(1.0, MAX_ORDER).unwrap();
        let stencil = cd.stencil();
        assert_eq!(stencil.len(), MAX_ORDER as usize);
        assert!(stencil.iter().all(|(_, c)| c.is_finite()));
        // Middle coefficients: 170! / (84! 86!) = C(170, 84)
        let (_, largest) = stencil[84];
        assert!(largest.abs() > 1e48);
    }
}
