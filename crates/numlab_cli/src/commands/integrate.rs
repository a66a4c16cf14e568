//! Numerical integration command.

use numlab_core::expr::{ExprEvaluator, RealFunction};
use numlab_core::math::integration::Simpson;
use numlab_core::NumericError;
use tracing::info;

use crate::output::Report;
use crate::Result;

/// Composite Simpson's rule for `function` over `[a, b]` with `n` subintervals.
pub fn simpson(function: &str, a: f64, b: f64, n: usize) -> Result<Report> {
    info!("Simpson's rule for {} over [{}, {}] with n = {}", function, a, b, n);
    let rule = Simpson::new(n).map_err(NumericError::from)?;
    let evaluator = ExprEvaluator::new();
    let f = RealFunction::new(&evaluator, function);

    let result = rule.integrate(&f, a, b)?;
    Ok(Report::Simpson {
        function: function.to_string(),
        a,
        b,
        n,
        result,
    })
}
