//! Linear-system commands.

use numlab_core::math::linalg::{cramers_rule, gauss_eliminate};
use tracing::info;

use crate::output::Report;
use crate::problem::{parse_csv, parse_matrix};
use crate::Result;

/// Decode `--matrix` and `--constants`, inferring the size from the matrix.
pub fn parse_system(matrix: &str, constants: &str) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    let a = parse_matrix(matrix, None)?;
    let b = parse_csv(constants)?;
    Ok((a, b))
}

/// Solve `A x = b` by Gauss elimination.
pub fn gauss(a: &[Vec<f64>], b: &[f64]) -> Result<Report> {
    info!("Gauss elimination on a {}x{} system", a.len(), a.len());
    let solution = gauss_eliminate(a, b)?;
    Ok(Report::Gauss { solution })
}

/// Solve `A x = b` by Cramer's rule.
pub fn cramer(a: &[Vec<f64>], b: &[f64]) -> Result<Report> {
    info!("Cramer's rule on a {}x{} system", a.len(), a.len());
    let solution = cramers_rule(a, b)?;
    Ok(Report::Cramer { solution })
}
