//! Interpolation command.

use numlab_core::math::interpolators::{
    linear_interpolate, newton_interpolate, quadratic_interpolate, select_points,
    DividedDifferences,
};
use numlab_core::types::Point;
use numlab_core::NumericError;
use tracing::info;

use crate::output::{InterpolationMethod, Report};
use crate::Result;

/// Interpolate at `x` through `points`, or through the zero-based
/// `select`ed subset of them.
///
/// Two points give a line, three a parabola, any other count the full
/// Newton polynomial.
pub fn interpolate(points: &[Point<f64>], x: f64, select: Option<&[usize]>) -> Result<Report> {
    let chosen = match select {
        Some(indices) => select_points(points, indices).map_err(NumericError::from)?,
        None => points.to_vec(),
    };

    let kind = InterpolationMethod::for_point_count(chosen.len());
    info!("{} through {} points at x = {}", kind, chosen.len(), x);

    let value = match kind {
        InterpolationMethod::Linear => linear_interpolate(&chosen, x)?,
        InterpolationMethod::Quadratic => quadratic_interpolate(&chosen, x)?,
        InterpolationMethod::Newton => newton_interpolate(&chosen, x)?,
    };
    let coefficients = DividedDifferences::new(&chosen)?.coefficients();

    Ok(Report::Interpolation {
        kind,
        x,
        points: chosen,
        coefficients,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;
    use numlab_core::{DomainError, ValidationError};

    fn samples() -> Vec<Point<f64>> {
        // x^2 + 1
        vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 5.0),
            Point::new(3.0, 10.0),
        ]
    }

    #[test]
    fn test_selects_quadratic() {
        match interpolate(&samples(), 2.5, Some(&[1, 2, 3])).unwrap() {
            Report::Interpolation {
                kind,
                value,
                points,
                coefficients,
                ..
            } => {
                assert_eq!(kind, InterpolationMethod::Quadratic);
                assert_eq!(points.len(), 3);
                assert_eq!(coefficients.len(), 3);
                assert_relative_eq!(value, 7.25, epsilon = 1e-12);
            }
            other => panic!("Expected Interpolation report, got {:?}", other),
        }
    }

    #[test]
    fn test_selects_linear() {
        match interpolate(&samples(), 0.5, Some(&[0, 1])).unwrap() {
            Report::Interpolation { kind, value, .. } => {
                assert_eq!(kind, InterpolationMethod::Linear);
                assert_relative_eq!(value, 1.5, epsilon = 1e-12);
            }
            other => panic!("Expected Interpolation report, got {:?}", other),
        }
    }

    #[test]
    fn test_all_points_newton() {
        match interpolate(&samples(), 1.5, None).unwrap() {
            Report::Interpolation { kind, value, .. } => {
                assert_eq!(kind, InterpolationMethod::Newton);
                assert_relative_eq!(value, 3.25, epsilon = 1e-12);
            }
            other => panic!("Expected Interpolation report, got {:?}", other),
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = interpolate(&samples(), 1.0, Some(&[0, 7])).unwrap_err();
        match err {
            CliError::Numeric(NumericError::Validation(ValidationError::PointIndexOutOfRange {
                index,
                len,
            })) => {
                assert_eq!(index, 7);
                assert_eq!(len, 4);
            }
            other => panic!("Expected PointIndexOutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_selection() {
        let err = interpolate(&samples(), 1.0, Some(&[1, 1])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Numeric(NumericError::Domain(DomainError::DuplicateAbscissa { .. }))
        ));
    }
}
