//! Check command: run the built-in reference problems.

use std::io::Write;

use numlab_core::types::Point;
use numlab_core::{DomainError, NumericError};
use serde::Serialize;
use tracing::{info, warn};

use super::{differentiate, integrate, interpolate, linear, roots};
use crate::config::{CliConfig, OutputFormat};
use crate::output::Report;
use crate::{CliError, Result};

/// Outcome of one reference problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    /// Short description of the problem.
    pub name: &'static str,
    /// Whether the computed answer matched.
    pub passed: bool,
    /// Computed answer or the error raised.
    pub detail: String,
}

type Check = fn(&CliConfig) -> Result<(bool, String)>;

const CHECKS: &[(&str, Check)] = &[
    ("bisection x^2 - 7 on [0, 5]", check_bisection),
    ("newton-raphson x^2 - 7 from 2", check_newton),
    ("central difference of x^3 at 2", check_central),
    ("simpson of x on [1, 3]", check_simpson),
    ("linear interpolation hits its samples", check_linear),
    ("quadratic interpolation hits its samples", check_quadratic),
    ("gauss and cramer agree", check_gauss_cramer),
    ("cramer rejects a singular matrix", check_singular),
];

/// Run every reference problem and print a pass/fail line for each.
///
/// Fails with [`CliError::CheckFailed`] if any problem does not pass.
pub fn run(config: &CliConfig) -> Result<()> {
    let outcomes = evaluate(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &outcomes)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for outcome in &outcomes {
                let status = if outcome.passed { "PASS" } else { "FAIL" };
                writeln!(out, "[{}] {}: {}", status, outcome.name, outcome.detail)?;
            }
        }
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        warn!("{} of {} reference checks failed", failed, outcomes.len());
        return Err(CliError::CheckFailed(failed));
    }
    info!("All {} reference checks passed", outcomes.len());
    Ok(())
}

/// Evaluate every reference problem without printing.
pub fn evaluate(config: &CliConfig) -> Vec<CheckOutcome> {
    CHECKS
        .iter()
        .map(|&(name, check)| match check(config) {
            Ok((passed, detail)) => CheckOutcome {
                name,
                passed,
                detail,
            },
            Err(e) => CheckOutcome {
                name,
                passed: false,
                detail: e.to_string(),
            },
        })
        .collect()
}

fn check_bisection(config: &CliConfig) -> Result<(bool, String)> {
    match roots::bisection(config, "x^2 - 7", 0.0, 5.0, Some(1e-4))? {
        Report::Bisection { solution, .. } => Ok((
            solution.converged && (solution.root - 2.645751).abs() < 1e-5,
            format!("root {} in {} iterations", solution.root, solution.iterations),
        )),
        other => Err(unexpected(&other)),
    }
}

fn check_newton(config: &CliConfig) -> Result<(bool, String)> {
    match roots::newton(config, "x^2 - 7", 2.0, Some(1e-6))? {
        Report::NewtonRaphson { solution, .. } => Ok((
            solution.converged && (solution.root - 2.6457513).abs() < 1e-7,
            format!("root {} in {} iterations", solution.root, solution.iterations),
        )),
        other => Err(unexpected(&other)),
    }
}

fn check_central(_: &CliConfig) -> Result<(bool, String)> {
    match differentiate::central("x^3", 2.0, 0.01, 1)? {
        Report::CentralDifference { result, .. } => Ok((
            (result.value - 12.0).abs() < 1e-2,
            format!("f'(2) = {}", result.value),
        )),
        other => Err(unexpected(&other)),
    }
}

fn check_simpson(_: &CliConfig) -> Result<(bool, String)> {
    match integrate::simpson("x", 1.0, 3.0, 4)? {
        Report::Simpson { result, .. } => Ok((
            (result.value - 4.0).abs() < 1e-12,
            format!("integral {}", result.value),
        )),
        other => Err(unexpected(&other)),
    }
}

fn passes_through(points: &[Point<f64>]) -> Result<bool> {
    for p in points {
        match interpolate::interpolate(points, p.x, None)? {
            Report::Interpolation { value, .. } => {
                if (value - p.fx).abs() > 1e-9 * p.fx.abs().max(1.0) {
                    return Ok(false);
                }
            }
            other => return Err(unexpected(&other)),
        }
    }
    Ok(true)
}

fn check_linear(_: &CliConfig) -> Result<(bool, String)> {
    let points = [Point::new(1.0, 4.0), Point::new(3.0, -2.0)];
    Ok((passes_through(&points)?, "2 samples".to_string()))
}

fn check_quadratic(_: &CliConfig) -> Result<(bool, String)> {
    let points = [Point::new(-1.0, 3.0), Point::new(0.5, 0.25), Point::new(2.0, 6.0)];
    Ok((passes_through(&points)?, "3 samples".to_string()))
}

fn check_gauss_cramer(_: &CliConfig) -> Result<(bool, String)> {
    let (a, b) = linear::parse_system("-2,3,1,3,4,-5,1,-2,1", "9,0,-4")?;
    let gauss = match linear::gauss(&a, &b)? {
        Report::Gauss { solution } => solution.solution,
        other => return Err(unexpected(&other)),
    };
    let cramer = match linear::cramer(&a, &b)? {
        Report::Cramer { solution } => solution.solution,
        other => return Err(unexpected(&other)),
    };
    let agree = gauss.iter().zip(&cramer).all(|(g, c)| (g - c).abs() < 1e-6);
    Ok((agree, format!("x = {:?}", gauss)))
}

fn check_singular(_: &CliConfig) -> Result<(bool, String)> {
    let (a, b) = linear::parse_system("1,2,3,2,4,6,1,0,1", "1,2,3")?;
    match linear::cramer(&a, &b) {
        Err(CliError::Numeric(NumericError::Domain(DomainError::SingularMatrix { determinant }))) => {
            Ok((true, format!("singular, det = {}", determinant)))
        }
        Err(e) => Err(e),
        Ok(_) => Ok((false, "returned a solution".to_string())),
    }
}

fn unexpected(report: &Report) -> CliError {
    CliError::InvalidArgument(format!("unexpected report {:?}", report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_reference_checks_pass() {
        let outcomes = evaluate(&CliConfig::default());
        assert_eq!(outcomes.len(), CHECKS.len());
        for outcome in &outcomes {
            assert!(outcome.passed, "{} failed: {}", outcome.name, outcome.detail);
        }
    }

    #[test]
    fn test_outcome_serialises() {
        let outcome = CheckOutcome {
            name: "demo",
            passed: true,
            detail: "ok".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["passed"], true);
    }
}
