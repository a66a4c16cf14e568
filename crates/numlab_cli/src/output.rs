//! Rendering of method results as text tables or JSON.

use std::io::Write;

use numlab_core::math::differentiation::DerivativeResult;
use numlab_core::math::integration::SimpsonResult;
use numlab_core::math::linalg::{CramerSolution, GaussSolution};
use numlab_core::math::roots::{BisectionStep, NewtonStep, RootSolution};
use numlab_core::types::Point;
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Interpolating polynomial degree chosen from the number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Two points.
    Linear,
    /// Three points.
    Quadratic,
    /// Any other count.
    Newton,
}

impl InterpolationMethod {
    /// Method used for `count` selected points.
    pub fn for_point_count(count: usize) -> Self {
        match count {
            2 => InterpolationMethod::Linear,
            3 => InterpolationMethod::Quadratic,
            _ => InterpolationMethod::Newton,
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationMethod::Linear => write!(f, "Linear Newton interpolation"),
            InterpolationMethod::Quadratic => write!(f, "Quadratic Newton interpolation"),
            InterpolationMethod::Newton => write!(f, "Newton divided-difference interpolation"),
        }
    }
}

/// The outcome of one command, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Report {
    /// Bisection run.
    Bisection {
        /// Equation solved.
        equation: String,
        /// Root and per-iteration trace.
        solution: RootSolution<BisectionStep>,
    },
    /// Newton-Raphson run.
    NewtonRaphson {
        /// Equation solved.
        equation: String,
        /// Root and per-iteration trace.
        solution: RootSolution<NewtonStep>,
    },
    /// Interpolated value.
    Interpolation {
        /// Polynomial degree used.
        kind: InterpolationMethod,
        /// Evaluation point.
        x: f64,
        /// Points the polynomial passes through.
        points: Vec<Point<f64>>,
        /// Newton coefficients `f[x0], f[x0,x1], ...`.
        coefficients: Vec<f64>,
        /// Polynomial value at `x`.
        value: f64,
    },
    /// Gauss elimination.
    Gauss {
        /// Solution and elimination snapshots.
        solution: GaussSolution<f64>,
    },
    /// Cramer's rule.
    Cramer {
        /// Solution and determinants.
        solution: CramerSolution<f64>,
    },
    /// Central divided difference.
    CentralDifference {
        /// Function differentiated.
        function: String,
        /// Evaluation point.
        x: f64,
        /// Step size.
        h: f64,
        /// Derivative order.
        order: i64,
        /// Estimate and sampled terms.
        result: DerivativeResult,
    },
    /// Composite Simpson's rule.
    Simpson {
        /// Integrand.
        function: String,
        /// Lower limit.
        a: f64,
        /// Upper limit.
        b: f64,
        /// Number of subintervals.
        n: usize,
        /// Integral and nodes.
        result: SimpsonResult,
    },
}

/// Print `report` to stdout in the configured format.
pub fn emit(report: &Report, config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, config.output, config.precision)
}

/// Write `report` to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => report.write_text(out, precision)?,
    }
    Ok(())
}

impl Report {
    /// Render as a heading, an aligned step table and a summary line.
    pub fn write_text<W: Write>(&self, out: &mut W, precision: usize) -> std::io::Result<()> {
        let num = |v: f64| format_number(v, precision);

        match self {
            Report::Bisection { equation, solution } => {
                writeln!(out, "Bisection: f(x) = {}", equation)?;
                let rows = solution
                    .trace
                    .iter()
                    .map(|s| {
                        vec![
                            s.iteration.to_string(),
                            num(s.xl),
                            num(s.xm),
                            num(s.xr),
                            num(s.f_xm),
                            num(s.error_percent),
                        ]
                    })
                    .collect::<Vec<_>>();
                write_table(out, &["iter", "xl", "xm", "xr", "f(xm)", "error %"], &rows)?;
                write_root_summary(out, solution.root, solution.converged, solution.iterations, &num)?;
            }
            Report::NewtonRaphson { equation, solution } => {
                writeln!(out, "Newton-Raphson: f(x) = {}", equation)?;
                let rows = solution
                    .trace
                    .iter()
                    .map(|s| {
                        vec![
                            s.iteration.to_string(),
                            num(s.x_old),
                            num(s.x_new),
                            num(s.error_percent),
                        ]
                    })
                    .collect::<Vec<_>>();
                write_table(out, &["iter", "x_old", "x_new", "error %"], &rows)?;
                write_root_summary(out, solution.root, solution.converged, solution.iterations, &num)?;
            }
            Report::Interpolation {
                kind,
                x,
                points,
                coefficients,
                value,
            } => {
                writeln!(out, "{}", kind)?;
                let rows = points
                    .iter()
                    .zip(coefficients)
                    .enumerate()
                    .map(|(i, (p, c))| vec![i.to_string(), num(p.x), num(p.fx), num(*c)])
                    .collect::<Vec<_>>();
                write_table(out, &["i", "x_i", "f(x_i)", "b_i"], &rows)?;
                writeln!(out, "f({}) = {}", num(*x), num(*value))?;
            }
            Report::Gauss { solution } => {
                writeln!(out, "Gauss elimination")?;
                if solution.shortcut {
                    writeln!(out, "all entries identical: elimination skipped")?;
                }
                for (step, matrix) in solution.trace.iter().enumerate() {
                    if step == 0 {
                        writeln!(out, "[A | b]")?;
                    } else {
                        writeln!(out, "after pivot {}", step)?;
                    }
                    let rows = matrix
                        .rows()
                        .iter()
                        .map(|row| row.iter().map(|&v| num(v)).collect())
                        .collect::<Vec<_>>();
                    write_matrix(out, &rows)?;
                }
                write_solution(out, &solution.solution, &num)?;
            }
            Report::Cramer { solution } => {
                writeln!(out, "Cramer's rule")?;
                writeln!(out, "det(A) = {}", num(solution.determinant))?;
                let rows = solution
                    .variable_determinants
                    .iter()
                    .zip(&solution.solution)
                    .enumerate()
                    .map(|(i, (d, x))| vec![format!("x{}", i + 1), num(*d), num(*x)])
                    .collect::<Vec<_>>();
                write_table(out, &["var", "det(A_i)", "value"], &rows)?;
            }
            Report::CentralDifference {
                function,
                x,
                h,
                order,
                result,
            } => {
                writeln!(
                    out,
                    "Central difference: f(x) = {}, order {}, h = {}",
                    function,
                    order,
                    num(*h)
                )?;
                let rows = result
                    .trace
                    .iter()
                    .map(|t| {
                        vec![
                            t.offset.to_string(),
                            num(t.x),
                            num(t.fx),
                            num(t.coefficient),
                            num(t.term),
                        ]
                    })
                    .collect::<Vec<_>>();
                write_table(out, &["i", "x + ih", "f", "coefficient", "term"], &rows)?;
                writeln!(out, "f^({})({}) = {}", order, num(*x), num(result.value))?;
            }
            Report::Simpson {
                function,
                a,
                b,
                n,
                result,
            } => {
                writeln!(out, "Simpson's rule: f(x) = {}, n = {}", function, n)?;
                let rows = result
                    .nodes
                    .iter()
                    .enumerate()
                    .map(|(i, node)| vec![i.to_string(), num(node.x), num(node.fx), num(node.weight)])
                    .collect::<Vec<_>>();
                write_table(out, &["i", "x_i", "f(x_i)", "weight"], &rows)?;
                writeln!(
                    out,
                    "integral from {} to {} = {} (h = {})",
                    num(*a),
                    num(*b),
                    num(result.value),
                    num(result.h)
                )?;
            }
        }
        Ok(())
    }
}

/// Fixed-point with `precision` decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

fn write_root_summary<W: Write>(
    out: &mut W,
    root: f64,
    converged: bool,
    iterations: usize,
    num: &dyn Fn(f64) -> String,
) -> std::io::Result<()> {
    let status = if converged {
        "converged"
    } else {
        "not converged, iteration cap reached"
    };
    writeln!(out, "root = {} after {} iterations ({})", num(root), iterations, status)
}

fn write_solution<W: Write>(
    out: &mut W,
    solution: &[f64],
    num: &dyn Fn(f64) -> String,
) -> std::io::Result<()> {
    for (i, value) in solution.iter().enumerate() {
        writeln!(out, "x{} = {}", i + 1, num(*value))?;
    }
    Ok(())
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(String::len)
                .chain(headers.get(c).map(|h| h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn write_row<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line)
}

/// Right-aligned table with a header rule.
fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> std::io::Result<()> {
    let widths = column_widths(headers, rows);
    write_row(out, headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_row(out, &rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths)?;
    for row in rows {
        write_row(out, &row.iter().map(String::as_str).collect::<Vec<_>>(), &widths)?;
    }
    Ok(())
}

/// Augmented matrix with a bar before the last column.
fn write_matrix<W: Write>(out: &mut W, rows: &[Vec<String>]) -> std::io::Result<()> {
    let widths = column_widths(&[], rows);
    for row in rows {
        let (rhs, coefficients) = match row.split_last() {
            Some(split) => split,
            None => continue,
        };
        let left = coefficients
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        let width = widths.last().copied().unwrap_or(0);
        writeln!(out, "  {} | {:>width$}", left, rhs, width = width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use numlab_core::expr::ExprEvaluator;
    use numlab_core::math::integration::Simpson;
    use numlab_core::math::linalg::{cramers_rule, gauss_eliminate};
    use numlab_core::math::roots::bisection;
    use numlab_core::expr::RealFunction;

    fn render(report: &Report, format: OutputFormat, precision: usize) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, report, format, precision).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn bisection_report() -> Report {
        let ev = ExprEvaluator::new();
        Report::Bisection {
            equation: "x^2 - 7".to_string(),
            solution: bisection(&ev, "x^2 - 7", 0.0, 5.0, 1e-4).unwrap(),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.645751311, 4), "2.6458");
        assert_eq!(format_number(-1.0, 0), "-1");
    }

    #[test]
    fn test_interpolation_method_for_count() {
        assert_eq!(InterpolationMethod::for_point_count(2), InterpolationMethod::Linear);
        assert_eq!(InterpolationMethod::for_point_count(3), InterpolationMethod::Quadratic);
        assert_eq!(InterpolationMethod::for_point_count(5), InterpolationMethod::Newton);
    }

    #[test]
    fn test_bisection_text() {
        let text = render(&bisection_report(), OutputFormat::Text, 6);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Bisection: f(x) = x^2 - 7");
        assert!(lines[1].contains("xm"));
        assert!(lines[2].trim_start().starts_with('-'));
        assert!(lines[3].contains("2.500000"));
        assert!(lines.last().unwrap().starts_with("root = 2.64575"));
        assert!(lines.last().unwrap().ends_with("(converged)"));
    }

    #[test]
    fn test_table_columns_align() {
        let text = render(&bisection_report(), OutputFormat::Text, 6);
        let widths: Vec<usize> = text.lines().skip(1).take(4).map(str::len).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_bisection_json() {
        let text = render(&bisection_report(), OutputFormat::Json, 6);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["method"], "bisection");
        assert_eq!(value["solution"]["converged"], true);
        assert!(value["solution"]["trace"].as_array().unwrap().len() > 1);
    }

    #[test]
    fn test_gauss_text_shows_snapshots() {
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let solution = gauss_eliminate(&a, &[3.0, 5.0]).unwrap();
        let text = render(&Report::Gauss { solution }, OutputFormat::Text, 2);

        assert!(text.contains("[A | b]"));
        assert!(text.contains("after pivot 1"));
        assert!(text.contains("x1 = 0.80"));
        assert!(text.contains("x2 = 1.40"));
    }

    #[test]
    fn test_cramer_text() {
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let solution = cramers_rule(&a, &[3.0, 5.0]).unwrap();
        let text = render(&Report::Cramer { solution }, OutputFormat::Text, 3);
        assert!(text.contains("det(A) = 5.000"));
        assert!(text.contains("x2"));
    }

    #[test]
    fn test_simpson_json_has_nodes() {
        let ev = ExprEvaluator::new();
        let f = RealFunction::new(&ev, "x^2");
        let result = Simpson::new(4).unwrap().integrate(&f, 0.0, 2.0).unwrap();
        let report = Report::Simpson {
            function: "x^2".to_string(),
            a: 0.0,
            b: 2.0,
            n: 4,
            result,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json, 6)).unwrap();
        assert_eq!(value["method"], "simpson");
        assert_eq!(value["result"]["nodes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_interpolation_text() {
        let report = Report::Interpolation {
            kind: InterpolationMethod::Linear,
            x: 0.5,
            points: vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0)],
            coefficients: vec![1.0, 2.0],
            value: 2.0,
        };
        let text = render(&report, OutputFormat::Text, 1);
        assert!(text.starts_with("Linear Newton interpolation"));
        assert!(text.ends_with("f(0.5) = 2.0\n"));
    }
}
