//! Sample points for interpolation.

use num_traits::Float;

/// A sampled value `(x, f(x))`.
///
/// # Example
///
/// ```
/// use numlab_core::types::Point;
///
/// let p = Point::new(1.0, 2.5);
/// assert_eq!(p.x, 1.0);
/// assert_eq!(p.fx, 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T: Float> {
    /// Abscissa
    pub x: T,
    /// Sampled function value at `x`
    pub fx: T,
}

impl<T: Float> Point<T> {
    /// Create a point from its coordinates.
    #[inline]
    pub fn new(x: T, fx: T) -> Self {
        Self { x, fx }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.fx.is_finite()
    }
}

impl<T: Float> From<(T, T)> for Point<T> {
    fn from((x, fx): (T, T)) -> Self {
        Self { x, fx }
    }
}
