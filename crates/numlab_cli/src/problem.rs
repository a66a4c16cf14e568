//! Problem files and command-line value parsing.
//!
//! This module provides:
//! - [`Problem`]: a TOML problem record tagged by `method`
//! - Parsers for the comma-separated encodings used on the command line
//!   and in problem files (`parse_csv`, `parse_points`, `parse_select`,
//!   `parse_matrix`)

use std::path::Path;

use numlab_core::types::Point;
use serde::Deserialize;

use crate::{CliError, Result};

/// One problem read from a TOML file.
///
/// Field names follow the stored example-problem records, so `e` is
/// accepted for `tolerance` and `lower`/`upper`/`interval` for Simpson's
/// `a`/`b`/`n`.
///
/// ```toml
/// method = "gauss"
/// matrix_size = 3
/// matrix_data = "-2,3,1,3,4,-5,1,-2,1"
/// constant_data = "9,0,-4"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Problem {
    /// Bisection on `[xl, xr]`.
    Bisection {
        /// Equation in `x`.
        equation: String,
        /// Left end of the bracket.
        xl: f64,
        /// Right end of the bracket.
        xr: f64,
        /// Tolerance in percent.
        #[serde(default, alias = "e")]
        tolerance: Option<f64>,
    },

    /// Newton-Raphson from `x0`.
    #[serde(alias = "newton_raphson")]
    Newton {
        /// Equation in `x`.
        equation: String,
        /// Initial guess.
        x0: f64,
        /// Tolerance in percent.
        #[serde(default, alias = "e")]
        tolerance: Option<f64>,
    },

    /// Newton divided-difference interpolation.
    Interpolation {
        /// Sample points as `[x, f(x)]` pairs.
        points: Vec<[f64; 2]>,
        /// Where to evaluate the polynomial.
        x: f64,
        /// One-based indices of the points to use; all points when absent.
        #[serde(default)]
        select: Option<Vec<usize>>,
    },

    /// Gauss elimination.
    Gauss(LinearSystemRecord),

    /// Cramer's rule.
    Cramer(LinearSystemRecord),

    /// Central divided difference.
    #[serde(alias = "central_difference")]
    Central {
        /// Function of `x`.
        function: String,
        /// Evaluation point.
        x: f64,
        /// Step size.
        h: f64,
        /// Derivative order.
        order: i64,
    },

    /// Composite Simpson's rule.
    Simpson {
        /// Integrand in `x`.
        function: String,
        /// Lower limit.
        #[serde(alias = "lower")]
        a: f64,
        /// Upper limit.
        #[serde(alias = "upper")]
        b: f64,
        /// Number of subintervals.
        #[serde(alias = "interval")]
        n: usize,
    },
}

/// Linear system in the comma-separated record encoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearSystemRecord {
    /// Matrix dimension; inferred from `matrix_data` when absent.
    #[serde(default)]
    pub matrix_size: Option<usize>,
    /// Row-major matrix entries, comma-separated.
    pub matrix_data: String,
    /// Right-hand side, comma-separated.
    pub constant_data: String,
}

impl LinearSystemRecord {
    /// Decode into `(A, b)`.
    pub fn decode(&self) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
        let a = parse_matrix(&self.matrix_data, self.matrix_size)?;
        let b = parse_csv(&self.constant_data)?;
        Ok((a, b))
    }
}

impl Problem {
    /// Read a problem from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a problem from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Problem(e.to_string()))
    }

    /// Method name as written in the `method` tag.
    pub fn method(&self) -> &'static str {
        match self {
            Problem::Bisection { .. } => "bisection",
            Problem::Newton { .. } => "newton",
            Problem::Interpolation { .. } => "interpolation",
            Problem::Gauss(_) => "gauss",
            Problem::Cramer(_) => "cramer",
            Problem::Central { .. } => "central",
            Problem::Simpson { .. } => "simpson",
        }
    }
}

/// Parse comma-separated numbers. Blank input is an empty list.
pub fn parse_csv(input: &str) -> Result<Vec<f64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(parse_number).collect()
}

/// Parse `x:fx` pairs separated by commas, e.g. `"0:1,1:2,2:5"`.
pub fn parse_points(input: &str) -> Result<Vec<Point<f64>>> {
    input
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (x, fx) = pair.split_once(':').ok_or_else(|| {
                CliError::InvalidArgument(format!("point '{}' must be written as x:fx", pair.trim()))
            })?;
            let x = parse_number(x)?;
            let fx = parse_number(fx)?;
            Ok(Point::new(x, fx))
        })
        .collect()
}

/// Parse one-based point numbers and return zero-based indices.
pub fn parse_select(input: &str) -> Result<Vec<usize>> {
    input
        .split(',')
        .map(|field| {
            let field = field.trim();
            let number: usize = field.parse().map_err(|_| {
                CliError::InvalidArgument(format!("'{}' is not a point number", field))
            })?;
            one_based_to_index(number)
        })
        .collect()
}

/// Convert a one-based point number to a zero-based index.
pub fn one_based_to_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidArgument("point numbers start at 1".to_string()))
}

/// Parse a row-major matrix, checking or inferring its dimension.
pub fn parse_matrix(input: &str, size: Option<usize>) -> Result<Vec<Vec<f64>>> {
    let values = parse_csv(input)?;
    let n = match size {
        Some(n) => n,
        None => square_size(values.len())?,
    };
    let entries = n.checked_mul(n).ok_or_else(|| {
        CliError::InvalidArgument(format!("matrix size {n} is too large"))
    })?;
    if n == 0 || values.len() != entries {
        return Err(CliError::InvalidArgument(format!(
            "a {n}x{n} matrix needs {entries} entries, got {}",
            values.len()
        )));
    }
    Ok(values.chunks(n).map(<[f64]>::to_vec).collect())
}

fn square_size(len: usize) -> Result<usize> {
    let n = (len as f64).sqrt().round() as usize;
    if n > 0 && n.checked_mul(n) == Some(len) {
        Ok(n)
    } else {
        Err(CliError::InvalidArgument(format!(
            "{} matrix entries do not form a square matrix",
            len
        )))
    }
}

fn parse_number(field: &str) -> Result<f64> {
    let field = field.trim();
    field
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("'{}' is not a number", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Value Parsing Tests
    // ========================================

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv("1, 2.5,-3e-1").unwrap(), vec![1.0, 2.5, -0.3]);
        assert!(parse_csv("").unwrap().is_empty());
        assert!(matches!(parse_csv("1,x"), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("0:1, 1:2,2:5").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(2.0, 5.0));

        assert!(parse_points("0:1,2").is_err());
        assert!(parse_points("0:a").is_err());
    }

    #[test]
    fn test_parse_select_is_one_based() {
        assert_eq!(parse_select("1,3").unwrap(), vec![0, 2]);
        assert!(parse_select("0").is_err());
        assert!(parse_select("one").is_err());
    }

    #[test]
    fn test_parse_matrix_infers_size() {
        let a = parse_matrix("1,2,3,4", None).unwrap();
        assert_eq!(a, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_parse_matrix_rejects_bad_shape() {
        assert!(parse_matrix("1,2,3", None).is_err());
        assert!(parse_matrix("1,2,3,4", Some(3)).is_err());
        assert!(parse_matrix("", None).is_err());
    }

    #[test]
    fn test_parse_matrix_rejects_oversized_dimension() {
        match parse_matrix("1", Some(usize::MAX)) {
            Err(CliError::InvalidArgument(msg)) => assert!(msg.contains("too large")),
            other => panic!("Expected InvalidArgument error, got {:?}", other),
        }

        let record = LinearSystemRecord {
            matrix_size: Some(usize::MAX / 2),
            matrix_data: "1,2,3,4".to_string(),
            constant_data: "1,2".to_string(),
        };
        assert!(matches!(record.decode(), Err(CliError::InvalidArgument(_))));
    }

    // ========================================
    // Problem File Tests
    // ========================================

    #[test]
    fn test_bisection_record() {
        let problem = Problem::from_toml(
            r#"
            method = "bisection"
            equation = "x^2 - 7"
            xl = 0.0
            xr = 5.0
            e = 0.0001
            "#,
        )
        .unwrap();
        assert_eq!(
            problem,
            Problem::Bisection {
                equation: "x^2 - 7".to_string(),
                xl: 0.0,
                xr: 5.0,
                tolerance: Some(0.0001),
            }
        );
    }

    #[test]
    fn test_newton_record_alias() {
        let problem = Problem::from_toml(
            "method = \"newton_raphson\"\nequation = \"x^2 - 7\"\nx0 = 2.0\n",
        )
        .unwrap();
        assert_eq!(problem.method(), "newton");
    }

    #[test]
    fn test_linear_system_record() {
        let problem = Problem::from_toml(
            r#"
            method = "cramer"
            matrix_size = 3
            matrix_data = "1,2,3,4,5,6,7,8,9"
            constant_data = "1,2,3"
            "#,
        )
        .unwrap();

        match problem {
            Problem::Cramer(record) => {
                let (a, b) = record.decode().unwrap();
                assert_eq!(a.len(), 3);
                assert_eq!(a[2], vec![7.0, 8.0, 9.0]);
                assert_eq!(b, vec![1.0, 2.0, 3.0]);
            }
            other => panic!("Expected Cramer problem, got {:?}", other),
        }
    }

    #[test]
    fn test_simpson_record_aliases() {
        let problem = Problem::from_toml(
            r#"
            method = "simpson"
            function = "x^2"
            lower = 0.0
            upper = 3.0
            interval = 6
            "#,
        )
        .unwrap();
        assert_eq!(
            problem,
            Problem::Simpson {
                function: "x^2".to_string(),
                a: 0.0,
                b: 3.0,
                n: 6,
            }
        );
    }

    #[test]
    fn test_interpolation_record() {
        let problem = Problem::from_toml(
            r#"
            method = "interpolation"
            points = [[0.0, 1.0], [1.0, 2.0], [2.0, 5.0]]
            x = 1.5
            select = [1, 3]
            "#,
        )
        .unwrap();
        match problem {
            Problem::Interpolation { points, select, .. } => {
                assert_eq!(points.len(), 3);
                assert_eq!(select, Some(vec![1, 3]));
            }
            other => panic!("Expected Interpolation problem, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method() {
        let err = Problem::from_toml("method = \"secant\"").unwrap_err();
        assert!(matches!(err, CliError::Problem(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Problem::from_file(Path::new("/nonexistent/problem.toml")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
