//! Root-finding commands.

use numlab_core::expr::{ExprEvaluator, RealFunction};
use numlab_core::math::roots::{BisectionSolver, NewtonRaphsonSolver};
use tracing::info;

use crate::config::CliConfig;
use crate::output::Report;
use crate::Result;

/// Run bisection on `equation` over `[xl, xr]`.
///
/// `tolerance` overrides the configured tolerance.
pub fn bisection(
    config: &CliConfig,
    equation: &str,
    xl: f64,
    xr: f64,
    tolerance: Option<f64>,
) -> Result<Report> {
    info!("Bisection on {} over [{}, {}]", equation, xl, xr);
    let solver = BisectionSolver::new(config.solver_config(tolerance)?);
    let evaluator = ExprEvaluator::new();
    let f = RealFunction::new(&evaluator, equation);

    let solution = solver.solve(&f, xl, xr)?;
    Ok(Report::Bisection {
        equation: equation.to_string(),
        solution,
    })
}

/// Run Newton-Raphson on `equation` from `x0`.
pub fn newton(config: &CliConfig, equation: &str, x0: f64, tolerance: Option<f64>) -> Result<Report> {
    info!("Newton-Raphson on {} from x0 = {}", equation, x0);
    let solver = NewtonRaphsonSolver::new(config.solver_config(tolerance)?);
    let evaluator = ExprEvaluator::new();
    let f = RealFunction::new(&evaluator, equation);

    let solution = solver.solve(&f, x0)?;
    Ok(Report::NewtonRaphson {
        equation: equation.to_string(),
        solution,
    })
}
