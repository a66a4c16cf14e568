//! Newton divided-difference interpolation.

use crate::types::{DomainError, NumericError, Point, ValidationError};
use num_traits::Float;

/// Triangular table of Newton divided differences.
///
/// Row `i` holds `D[i][0] = f(x_i)` and
/// `D[i][j] = (D[i+1][j-1] - D[i][j-1]) / (x_{i+j} - x_i)` for
/// `j < n - i`. The top row is the coefficient vector of the Newton form
/// `P(x) = D[0][0] + D[0][1](x - x_0) + D[0][2](x - x_0)(x - x_1) + ...`.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Example
///
/// ```
/// use numlab_core::math::interpolators::DividedDifferences;
/// use numlab_core::types::Point;
///
/// let points = [Point::new(1.0, 1.0), Point::new(2.0, 4.0), Point::new(4.0, 16.0)];
/// let table = DividedDifferences::new(&points).unwrap();
///
/// assert_eq!(table.coefficients(), vec![1.0, 3.0, 1.0]);
/// assert_eq!(table.evaluate(3.0).unwrap(), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DividedDifferences<T: Float> {
    xs: Vec<T>,
    table: Vec<Vec<T>>,
}

impl<T: Float> DividedDifferences<T> {
    /// Build the table from `points`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::PointCount`] if `points` is empty
    /// - [`ValidationError::NonFiniteInput`] if a coordinate is NaN or infinite
    /// - [`DomainError::DuplicateAbscissa`] if two points share an x value
    pub fn new(points: &[Point<T>]) -> Result<Self, NumericError> {
        if points.is_empty() {
            return Err(ValidationError::PointCount { got: 0, need: 1 }.into());
        }
        for (i, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(ValidationError::NonFiniteInput {
                    name: format!("points[{}]", i),
                }
                .into());
            }
        }
        for (i, p) in points.iter().enumerate() {
            if points[i + 1..].iter().any(|q| q.x == p.x) {
                return Err(DomainError::DuplicateAbscissa {
                    x: p.x.to_f64().unwrap_or(f64::NAN),
                }
                .into());
            }
        }

        let n = points.len();
        let xs: Vec<T> = points.iter().map(|p| p.x).collect();
        let mut table: Vec<Vec<T>> = points.iter().map(|p| vec![p.fx]).collect();

        for j in 1..n {
            for i in 0..n - j {
                let diff = (table[i + 1][j - 1] - table[i][j - 1]) / (xs[i + j] - xs[i]);
                if !diff.is_finite() {
                    return Err(NumericError::non_finite(
                        format!("divided difference D[{}][{}]", i, j),
                        diff.to_f64().unwrap_or(f64::NAN),
                    ));
                }
                table[i].push(diff);
            }
        }

        tracing::debug!(points = n, "built divided-difference table");
        Ok(Self { xs, table })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false: a table holds at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sample x values in input order.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// The triangular table; row `i` has `n - i` entries.
    #[inline]
    pub fn table(&self) -> &[Vec<T>] {
        &self.table
    }

    /// Newton-form coefficients `D[0][0], D[0][1], ..., D[0][n-1]`.
    pub fn coefficients(&self) -> Vec<T> {
        self.table.first().cloned().unwrap_or_default()
    }

    /// Evaluate the interpolating polynomial at `x`.
    ///
    /// # Errors
    ///
    /// [`DomainError::NonFinite`] if the result overflows.
    pub fn evaluate(&self, x: T) -> Result<T, NumericError> {
        let coefficients = self.table.first().map(Vec::as_slice).unwrap_or_default();

        let mut sum = T::zero();
        let mut product = T::one();
        for (k, &c) in coefficients.iter().enumerate() {
            sum = sum + c * product;
            product = product * (x - self.xs[k]);
        }

        if sum.is_finite() {
            Ok(sum)
        } else {
            Err(NumericError::non_finite(
                "interpolated value",
                sum.to_f64().unwrap_or(f64::NAN),
            ))
        }
    }
}

fn interpolate_exact<T: Float>(points: &[Point<T>], need: usize, x: T) -> Result<T, NumericError> {
    if points.len() != need {
        return Err(ValidationError::PointCount {
            got: points.len(),
            need,
        }
        .into());
    }
    DividedDifferences::new(points)?.evaluate(x)
}

/// Straight line through exactly two points, evaluated at `x`.
///
/// `f(x0) + (f(x1) - f(x0)) / (x1 - x0) * (x - x0)`.
///
/// # Errors
///
/// - [`ValidationError::PointCount`] unless exactly 2 points are given
/// - [`DomainError::DuplicateAbscissa`] if `x0 == x1`
///
/// # Example
///
/// ```
/// use numlab_core::math::interpolators::linear_interpolate;
/// use numlab_core::types::Point;
///
/// let y = linear_interpolate(&[Point::new(0.0, 1.0), Point::new(2.0, 5.0)], 1.5).unwrap();
/// assert_eq!(y, 4.0);
/// ```
pub fn linear_interpolate<T: Float>(points: &[Point<T>], x: T) -> Result<T, NumericError> {
    interpolate_exact(points, 2, x)
}

/// Parabola through exactly three points, evaluated at `x`.
///
/// # Errors
///
/// - [`ValidationError::PointCount`] unless exactly 3 points are given
/// - [`DomainError::DuplicateAbscissa`] if two x values coincide
pub fn quadratic_interpolate<T: Float>(points: &[Point<T>], x: T) -> Result<T, NumericError> {
    interpolate_exact(points, 3, x)
}

/// Newton polynomial through all `points`, evaluated at `x`.
///
/// # Errors
///
/// See [`DividedDifferences::new`] and [`DividedDifferences::evaluate`].
pub fn newton_interpolate<T: Float>(points: &[Point<T>], x: T) -> Result<T, NumericError> {
    DividedDifferences::new(points)?.evaluate(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use approx::assert_relative_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point<f64>> {
        raw.iter().map(|&p| p.into()).collect()
    }

    // ========================================
    // Table Construction Tests
    // ========================================

    #[test]
    fn test_table_shape() {
        let points = pts(&[(0.0, 1.0), (1.0, 3.0), (3.0, 2.0), (4.0, 5.0)]);
        let dd = DividedDifferences::new(&points).unwrap();

        assert_eq!(dd.len(), 4);
        assert!(!dd.is_empty());
        let lengths: Vec<usize> = dd.table().iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_table_values() {
        // f(x) = x^2 + 1 at 0, 1, 2
        let points = pts(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)]);
        let dd = DividedDifferences::new(&points).unwrap();

        assert_eq!(dd.table()[0], vec![1.0, 1.0, 1.0]);
        assert_eq!(dd.table()[1], vec![2.0, 3.0]);
        assert_eq!(dd.table()[2], vec![5.0]);
        assert_eq!(dd.coefficients(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_single_point_is_constant() {
        let dd = DividedDifferences::new(&pts(&[(2.0, 7.0)])).unwrap();
        assert_eq!(dd.evaluate(-100.0).unwrap(), 7.0);
    }

    #[test]
    fn test_unsorted_points() {
        // x^3 sampled out of order
        let points = pts(&[(2.0, 8.0), (-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)]);
        assert_relative_eq!(newton_interpolate(&points, 1.5).unwrap(), 3.375, epsilon = 1e-12);
    }

    #[test]
    fn test_f32() {
        let points = [Point::new(0.0_f32, 0.0), Point::new(1.0, 2.0)];
        assert_relative_eq!(linear_interpolate(&points, 0.25).unwrap(), 0.5_f32);
    }

    // ========================================
    // Interpolation Tests
    // ========================================

    #[test]
    fn test_linear() {
        let points = pts(&[(1.0, 3.0), (3.0, 7.0)]);
        assert_relative_eq!(linear_interpolate(&points, 2.0).unwrap(), 5.0);
        assert_eq!(linear_interpolate(&points, 1.0).unwrap(), 3.0);
        assert_relative_eq!(linear_interpolate(&points, 3.0).unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_extrapolates() {
        let points = pts(&[(0.0, 0.0), (1.0, 2.0)]);
        assert_relative_eq!(linear_interpolate(&points, -1.0).unwrap(), -2.0);
    }

    #[test]
    fn test_quadratic_passes_through_samples() {
        let points = pts(&[(8.0, 2.079442), (9.0, 2.197225), (9.5, 2.251292)]);
        for p in &points {
            assert_relative_eq!(quadratic_interpolate(&points, p.x).unwrap(), p.fx, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quadratic_ln() {
        // ln(2) from ln(1), ln(4), ln(6)
        let points = pts(&[(1.0, 0.0), (4.0, 1.386294), (6.0, 1.791759)]);
        assert_relative_eq!(quadratic_interpolate(&points, 2.0).unwrap(), 0.5658444, epsilon = 1e-6);
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_wrong_point_counts() {
        let three = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        assert!(matches!(
            linear_interpolate(&three, 0.5),
            Err(NumericError::Validation(ValidationError::PointCount { got: 3, need: 2 }))
        ));
        assert!(matches!(
            quadratic_interpolate(&three[..2], 0.5),
            Err(NumericError::Validation(ValidationError::PointCount { got: 2, need: 3 }))
        ));
        let empty: Vec<Point<f64>> = Vec::new();
        assert!(newton_interpolate(&empty, 0.5).is_err());
    }

    #[test]
    fn test_duplicate_abscissa() {
        let points = pts(&[(1.0, 1.0), (1.0, 2.0)]);
        match linear_interpolate(&points, 0.0) {
            Err(NumericError::Domain(DomainError::DuplicateAbscissa { x })) => assert_eq!(x, 1.0),
            other => panic!("Expected DuplicateAbscissa error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_point() {
        let points = pts(&[(0.0, f64::NAN), (1.0, 2.0)]);
        let err = linear_interpolate(&points, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_overflowing_result() {
        let points = pts(&[(0.0, 0.0), (1e-300, 1e300)]);
        let err = linear_interpolate(&points, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}
