//! Bisection root finder.

use super::{relative_error_percent, RootSolution, SolverConfig};
use crate::expr::{Evaluator, RealFunction};
use crate::types::error::ensure_finite_input;
use crate::types::NumericError;

/// One bisection iteration, recorded before the bracket is updated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BisectionStep {
    /// Iteration number, starting at 1.
    pub iteration: usize,
    /// Left end of the bracket.
    pub xl: f64,
    /// Midpoint `(xl + xr) / 2`.
    pub xm: f64,
    /// Right end of the bracket.
    pub xr: f64,
    /// `f(xm)`.
    pub f_xm: f64,
    /// Relative approximate error against the replaced endpoint, in percent.
    pub error_percent: f64,
}

/// Bisection root finder.
///
/// Each iteration takes the midpoint `xm` of `[xl, xr]`. If `f(xm)` and
/// `f(xr)` have the same sign, `xr` moves to `xm`; otherwise `xl` does. The
/// error compares `xm` with the endpoint it replaced.
///
/// The bracket is not checked for a sign change. On a non-bracketing input
/// the solver still runs, usually to the iteration cap, and reports
/// `converged == false` unless the bracket collapses first.
///
/// # Example
///
/// ```
/// use numlab_core::expr::{ExprEvaluator, RealFunction};
/// use numlab_core::math::roots::{BisectionSolver, SolverConfig};
///
/// let evaluator = ExprEvaluator::new();
/// let f = RealFunction::new(&evaluator, "x^3 - x - 2");
///
/// let solver = BisectionSolver::new(SolverConfig::with_tolerance(1e-6).unwrap());
/// let solution = solver.solve(&f, 1.0, 2.0).unwrap();
///
/// assert!(solution.converged);
/// assert!((solution.root - 1.5213797).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BisectionSolver {
    config: SolverConfig,
}

impl BisectionSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with the default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run bisection on `f` starting from `[xl, xr]`.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Validation`] if the configuration is invalid or an endpoint is not finite
    /// - [`NumericError::Evaluation`] / [`NumericError::Domain`] if `f` cannot be evaluated
    pub fn solve<E: Evaluator + ?Sized>(
        &self,
        f: &RealFunction<'_, E>,
        xl: f64,
        xr: f64,
    ) -> Result<RootSolution<BisectionStep>, NumericError> {
        self.config.validate()?;
        let mut xl = ensure_finite_input("xl", xl)?;
        let mut xr = ensure_finite_input("xr", xr)?;

        let mut trace = Vec::new();
        let mut xm = (xl + xr) / 2.0;
        let mut error_percent = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            xm = (xl + xr) / 2.0;
            let f_xm = f.eval(xm)?;
            let f_xr = f.eval(xr)?;

            let replaced = if f_xm * f_xr > 0.0 { xr } else { xl };
            error_percent = relative_error_percent(xm, replaced);

            trace.push(BisectionStep {
                iteration,
                xl,
                xm,
                xr,
                f_xm,
                error_percent,
            });
            tracing::debug!(iteration, xl, xm, xr, error_percent, "bisection step");

            if f_xm * f_xr > 0.0 {
                xr = xm;
            } else {
                xl = xm;
            }

            if error_percent <= self.config.tolerance_percent {
                break;
            }
        }

        let converged = error_percent <= self.config.tolerance_percent;
        if converged {
            tracing::info!(root = xm, iterations = trace.len(), error_percent, "bisection converged");
        } else {
            tracing::warn!(
                max_iterations = self.config.max_iterations,
                error_percent,
                "bisection stopped at iteration cap without converging"
            );
        }

        Ok(RootSolution {
            root: xm,
            converged,
            iterations: trace.len(),
            error_percent,
            trace,
        })
    }
}

/// Bisection on an expression in `x` with the default iteration cap.
///
/// # Errors
///
/// See [`BisectionSolver::solve`]; also fails if `tolerance_percent` is
/// negative or not finite.
pub fn bisection<E: Evaluator + ?Sized>(
    evaluator: &E,
    equation: &str,
    xl: f64,
    xr: f64,
    tolerance_percent: f64,
) -> Result<RootSolution<BisectionStep>, NumericError> {
    let config = SolverConfig::with_tolerance(tolerance_percent)?;
    let f = RealFunction::new(evaluator, equation);
    BisectionSolver::new(config).solve(&f, xl, xr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Bindings, ExprEvaluator};
    use crate::types::{ErrorKind, EvaluationError, ValidationError};
    use approx::assert_relative_eq;

    /// Evaluator that ignores the expression and returns `x - 1`.
    struct Shifted;

    impl Evaluator for Shifted {
        fn evaluate(&self, _: &str, bindings: &Bindings) -> Result<f64, EvaluationError> {
            let x = bindings
                .get("x")
                .ok_or_else(|| EvaluationError::UnknownVariable("x".to_string()))?;
            Ok(x - 1.0)
        }
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_sqrt_seven() {
        let ev = ExprEvaluator::new();
        let solution = bisection(&ev, "x^2 - 7", 0.0, 5.0, 1e-4).unwrap();

        assert!(solution.converged);
        assert!(solution.iterations <= 50);
        assert_relative_eq!(solution.root, 2.645751, epsilon = 1e-5);
        assert!(solution.error_percent <= 1e-4);
    }

    #[test]
    fn test_with_test_double() {
        let solution = bisection(&Shifted, "ignored", -3.0, 4.0, 1e-8).unwrap();
        assert!(solution.converged);
        assert_relative_eq!(solution.root, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_step_records_bracket_before_update() {
        let ev = ExprEvaluator::new();
        let solution = bisection(&ev, "x^2 - 7", 0.0, 5.0, 1e-4).unwrap();

        let first = solution.trace[0];
        assert_eq!(first.iteration, 1);
        assert_eq!(first.xl, 0.0);
        assert_eq!(first.xm, 2.5);
        assert_eq!(first.xr, 5.0);
        assert_relative_eq!(first.f_xm, -0.75);
        // f(2.5) < 0 and f(5) > 0, so xl = 0 is replaced by 2.5
        assert_relative_eq!(first.error_percent, 100.0);

        let second = solution.trace[1];
        assert_eq!(second.xl, 2.5);
        assert_eq!(second.xr, 5.0);
        assert_eq!(second.xm, 3.75);
    }

    #[test]
    fn test_trace_matches_iterations() {
        let ev = ExprEvaluator::new();
        let solution = bisection(&ev, "x^2 - 7", 0.0, 5.0, 1e-4).unwrap();
        assert_eq!(solution.trace.len(), solution.iterations);
        for (i, step) in solution.trace.iter().enumerate() {
            assert_eq!(step.iteration, i + 1);
        }
        assert_eq!(solution.last_step().map(|s| s.xm), Some(solution.root));
    }

    // ========================================
    // Iteration Cap Tests
    // ========================================

    #[test]
    fn test_zero_tolerance_hits_cap() {
        let ev = ExprEvaluator::new();
        let solver = BisectionSolver::new(SolverConfig::new(0.0, 50).unwrap());
        let f = RealFunction::new(&ev, "x^2 - 7");
        let solution = solver.solve(&f, 0.0, 5.0).unwrap();

        // Bracket collapses in double precision or the cap is reached
        assert!(solution.iterations <= 50);
        assert_relative_eq!(solution.root, 7.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_non_bracketing_reports_not_converged() {
        let ev = ExprEvaluator::new();
        let solver = BisectionSolver::new(SolverConfig::new(1e-12, 10).unwrap());
        let f = RealFunction::new(&ev, "x^2 + 1");
        let solution = solver.solve(&f, 1.0, 3.0).unwrap();

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 10);
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_evaluation_error_aborts() {
        let ev = ExprEvaluator::new();
        let err = bisection(&ev, "x^2 - ", 0.0, 5.0, 1e-4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
    }

    #[test]
    fn test_non_finite_endpoint() {
        let ev = ExprEvaluator::new();
        let err = bisection(&ev, "x", f64::NAN, 5.0, 1e-4).unwrap_err();
        match err {
            NumericError::Validation(ValidationError::NonFiniteInput { name }) => {
                assert_eq!(name, "xl")
            }
            other => panic!("Expected NonFiniteInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_tolerance() {
        let ev = ExprEvaluator::new();
        let err = bisection(&ev, "x", 0.0, 5.0, -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_idempotent() {
        let ev = ExprEvaluator::new();
        let a = bisection(&ev, "cos(x) - x", 0.0, 1.0, 1e-6).unwrap();
        let b = bisection(&ev, "cos(x) - x", 0.0, 1.0, 1e-6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_defaults() {
        let solver = BisectionSolver::with_defaults();
        assert_eq!(solver.config(), &SolverConfig::default());
    }
}
