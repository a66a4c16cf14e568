//! Numerical differentiation command.

use numlab_core::expr::{ExprEvaluator, RealFunction};
use numlab_core::math::differentiation::CentralDifference;
use numlab_core::NumericError;
use tracing::info;

use crate::output::Report;
use crate::Result;

/// Central divided difference of `function` at `x`.
pub fn central(function: &str, x: f64, h: f64, order: i64) -> Result<Report> {
    info!("Central difference of order {} for {} at x = {}", order, function, x);
    let method = CentralDifference::new(h, order).map_err(NumericError::from)?;
    let evaluator = ExprEvaluator::new();
    let f = RealFunction::new(&evaluator, function);

    let result = method.differentiate(&f, x)?;
    Ok(Report::CentralDifference {
        function: function.to_string(),
        x,
        h,
        order,
        result,
    })
}
