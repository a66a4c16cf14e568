//! Newton-Raphson root finder.

use super::{relative_error_percent, RootSolution, SolverConfig};
use crate::expr::{Evaluator, RealFunction};
use crate::types::error::ensure_finite_input;
use crate::types::{DomainError, NumericError};

/// One Newton-Raphson iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonStep {
    /// Iteration number, starting at 1.
    pub iteration: usize,
    /// Estimate at the start of the iteration.
    pub x_old: f64,
    /// `x_old - f(x_old) / f'(x_old)`.
    pub x_new: f64,
    /// Relative approximate error between the two estimates, in percent.
    pub error_percent: f64,
}

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)`. The derivative comes from the
/// evaluator (exact with the default [`ExprEvaluator`](crate::expr::ExprEvaluator)
/// and the `num-dual-mode` feature, finite differences otherwise).
///
/// # Example
///
/// ```
/// use numlab_core::expr::{ExprEvaluator, RealFunction};
/// use numlab_core::math::roots::NewtonRaphsonSolver;
///
/// let evaluator = ExprEvaluator::new();
/// let f = RealFunction::new(&evaluator, "exp(x) - 3");
///
/// let solution = NewtonRaphsonSolver::with_defaults().solve(&f, 1.0).unwrap();
/// assert!(solution.converged);
/// assert!((solution.root - 3.0_f64.ln()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
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

    /// Run Newton-Raphson on `f` from the initial guess `x0`.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Validation`] if the configuration is invalid or `x0` is not finite
    /// - [`DomainError::ZeroDerivative`] if `f'(x)` is zero at some iterate
    /// - [`DomainError::NonFinite`] if an iterate overflows
    /// - [`NumericError::Evaluation`] if `f` or `f'` cannot be evaluated
    pub fn solve<E: Evaluator + ?Sized>(
        &self,
        f: &RealFunction<'_, E>,
        x0: f64,
    ) -> Result<RootSolution<NewtonStep>, NumericError> {
        self.config.validate()?;
        let mut x = ensure_finite_input("x0", x0)?;

        let mut trace = Vec::new();
        let mut error_percent = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let fx = f.eval(x)?;
            let slope = f.derivative(x)?;
            if slope == 0.0 {
                return Err(DomainError::ZeroDerivative { x, iteration }.into());
            }

            let x_new = x - fx / slope;
            if !x_new.is_finite() {
                return Err(NumericError::non_finite(
                    format!("Newton-Raphson iteration {}", iteration),
                    x_new,
                ));
            }

            error_percent = relative_error_percent(x_new, x);
            trace.push(NewtonStep {
                iteration,
                x_old: x,
                x_new,
                error_percent,
            });
            tracing::debug!(iteration, x_old = x, x_new, error_percent, "newton-raphson step");

            x = x_new;
            if error_percent <= self.config.tolerance_percent {
                break;
            }
        }

        let converged = error_percent <= self.config.tolerance_percent;
        if converged {
            tracing::info!(root = x, iterations = trace.len(), error_percent, "newton-raphson converged");
        } else {
            tracing::warn!(
                max_iterations = self.config.max_iterations,
                error_percent,
                "newton-raphson stopped at iteration cap without converging"
            );
        }

        Ok(RootSolution {
            root: x,
            converged,
            iterations: trace.len(),
            error_percent,
            trace,
        })
    }
}

/// Newton-Raphson on an expression in `x` with the default iteration cap.
///
/// # Errors
///
/// See [`NewtonRaphsonSolver::solve`]; also fails if `tolerance_percent` is
/// negative or not finite.
pub fn newton_raphson<E: Evaluator + ?Sized>(
    evaluator: &E,
    equation: &str,
    x0: f64,
    tolerance_percent: f64,
) -> Result<RootSolution<NewtonStep>, NumericError> {
    let config = SolverConfig::with_tolerance(tolerance_percent)?;
    let f = RealFunction::new(evaluator, equation);
    NewtonRaphsonSolver::new(config).solve(&f, x0)
}
