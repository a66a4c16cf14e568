//! Polynomial interpolation through sampled points.
//!
//! This module provides:
//! - [`DividedDifferences`]: Newton divided-difference table for any number of points
//! - [`linear_interpolate`]: The 2-point case
//! - [`quadratic_interpolate`]: The 3-point case
//! - [`newton_interpolate`]: Any `n >= 1` points
//! - [`select_points`]: Pick a subset of a larger sample by index
//!
//! All functions are generic over `T: num_traits::Float`. Sample x values
//! must be pairwise distinct.
//!
//! ## Example
//!
//! ```
//! use numlab_core::math::interpolators::{quadratic_interpolate, select_points};
//! use numlab_core::types::Point;
//!
//! let samples = [
//!     Point::new(0.0_f64, 1.0),
//!     Point::new(1.0, 2.0),
//!     Point::new(2.0, 5.0),
//!     Point::new(3.0, 10.0),
//! ];
//!
//! // x^2 + 1 through the last three samples
//! let chosen = select_points(&samples, &[1, 2, 3]).unwrap();
//! let y = quadratic_interpolate(&chosen, 2.5).unwrap();
//! assert!((y - 7.25).abs() < 1e-12);
//! ```

mod divided_difference;

pub use divided_difference::{
    linear_interpolate, newton_interpolate, quadratic_interpolate, DividedDifferences,
};

use crate::types::{Point, ValidationError};
use num_traits::Float;

/// Points at the given zero-based `indices`, in the order given.
///
/// Indices may repeat; the interpolators then reject the duplicate x value.
///
/// # Errors
///
/// [`ValidationError::PointIndexOutOfRange`] if an index is past the end.
pub fn select_points<T: Float>(
    points: &[Point<T>],
    indices: &[usize],
) -> Result<Vec<Point<T>>, ValidationError> {
    indices
        .iter()
        .map(|&index| {
            points
                .get(index)
                .copied()
                .ok_or(ValidationError::PointIndexOutOfRange {
                    index,
                    len: points.len(),
                })
        })
        .collect()
}
