//! Solve command: run the method named in a TOML problem file.

use std::path::Path;

use numlab_core::types::Point;
use tracing::info;

use super::{differentiate, integrate, interpolate, linear, roots};
use crate::config::CliConfig;
use crate::output::{self, Report};
use crate::problem::{one_based_to_index, Problem};
use crate::Result;

/// Load `path` and print the result.
pub fn run(config: &CliConfig, path: &Path) -> Result<()> {
    let problem = Problem::from_file(path)?;
    info!("Loaded {} problem from {}", problem.method(), path.display());
    let report = report(config, &problem)?;
    output::emit(&report, config)
}

/// Run one problem.
pub fn report(config: &CliConfig, problem: &Problem) -> Result<Report> {
    match problem {
        Problem::Bisection {
            equation,
            xl,
            xr,
            tolerance,
        } => roots::bisection(config, equation, *xl, *xr, *tolerance),
        Problem::Newton {
            equation,
            x0,
            tolerance,
        } => roots::newton(config, equation, *x0, *tolerance),
        Problem::Interpolation { points, x, select } => {
            let points: Vec<Point<f64>> = points.iter().map(|&[x, fx]| Point::new(x, fx)).collect();
            let indices = select
                .as_ref()
                .map(|numbers| {
                    numbers
                        .iter()
                        .map(|&n| one_based_to_index(n))
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?;
            interpolate::interpolate(&points, *x, indices.as_deref())
        }
        Problem::Gauss(record) => {
            let (a, b) = record.decode()?;
            linear::gauss(&a, &b)
        }
        Problem::Cramer(record) => {
            let (a, b) = record.decode()?;
            linear::cramer(&a, &b)
        }
        Problem::Central { function, x, h, order } => {
            differentiate::central(function, *x, *h, *order)
        }
        Problem::Simpson { function, a, b, n } => integrate::simpson(function, *a, *b, *n),
    }
}
