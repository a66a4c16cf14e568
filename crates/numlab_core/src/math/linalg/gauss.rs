//! Gauss elimination without row interchange.

use super::AugmentedMatrix;
use crate::types::{DomainError, NumericError};
use num_traits::Float;

/// Solution of `A x = b` by Gauss elimination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussSolution<T: Float> {
    /// `x`, one entry per unknown.
    pub solution: Vec<T>,

    /// `[A | b]` before elimination, then once after each pivot column
    /// (`n + 1` snapshots). Empty when `shortcut` is set.
    pub trace: Vec<AugmentedMatrix<T>>,

    /// True if the identical-entries guard answered without eliminating.
    pub shortcut: bool,
}

/// Solve `A x = b` by forward elimination and back-substitution.
///
/// Pivots are taken from the diagonal as they stand; rows are never
/// swapped, so a zero pivot is an error even when the system is solvable.
///
/// For `n >= 2`, if every entry of `A` is the same value and every entry of
/// `b` is the same value `c`, the result is `(c, 0, ..., 0)` with an empty
/// trace. This guard only covers that literal case and is not a general
/// treatment of singular systems.
///
/// # Errors
///
/// - [`NumericError::Validation`] if the system is empty, not square, mismatched or non-finite
/// - [`DomainError::ZeroPivot`] if a diagonal pivot is zero during elimination
/// - [`DomainError::NonFinite`] if any unknown comes out NaN or infinite
///
/// # Example
///
/// ```
/// use numlab_core::math::linalg::gauss_eliminate;
///
/// let a: Vec<Vec<f64>> = vec![
///     vec![2.0, 1.0, -1.0],
///     vec![-3.0, -1.0, 2.0],
///     vec![-2.0, 1.0, 2.0],
/// ];
/// let b = vec![8.0, -11.0, -3.0];
///
/// let result = gauss_eliminate(&a, &b).unwrap();
/// let expected = [2.0, 3.0, -1.0];
/// for (x, e) in result.solution.iter().zip(expected) {
///     assert!((x - e).abs() < 1e-12);
/// }
/// assert_eq!(result.trace.len(), 4);
/// ```
pub fn gauss_eliminate<T: Float>(a: &[Vec<T>], b: &[T]) -> Result<GaussSolution<T>, NumericError> {
    let mut m = AugmentedMatrix::from_system(a, b)?;
    let n = m.size();

    if n >= 2 && all_identical(a.iter().flatten()) && all_identical(b.iter()) {
        tracing::warn!(n, "all coefficients and constants identical, returning (c, 0, ..., 0)");
        let mut solution = vec![T::zero(); n];
        solution[0] = b[0];
        return Ok(GaussSolution {
            solution,
            trace: Vec::new(),
            shortcut: true,
        });
    }

    let mut trace = Vec::with_capacity(n + 1);
    trace.push(m.clone());

    for i in 0..n {
        let pivot = m.get(i, i);
        if pivot == T::zero() || !pivot.is_finite() {
            return Err(DomainError::ZeroPivot { row: i }.into());
        }
        for j in i + 1..n {
            let factor = m.get(j, i) / pivot;
            m.subtract_scaled_row(j, i, factor);
        }
        tracing::debug!(pivot_row = i, "eliminated column");
        trace.push(m.clone());
    }

    let mut solution = vec![T::zero(); n];
    for i in (0..n).rev() {
        let pivot = m.get(i, i);
        let mut xi = m.get(i, n) / pivot;
        for j in i + 1..n {
            xi = xi - (m.get(i, j) / pivot) * solution[j];
        }
        if !xi.is_finite() {
            return Err(NumericError::non_finite(
                format!("x[{}]", i),
                xi.to_f64().unwrap_or(f64::NAN),
            ));
        }
        solution[i] = xi;
    }

    Ok(GaussSolution {
        solution,
        trace,
        shortcut: false,
    })
}

fn all_identical<'a, T: Float + 'a>(mut values: impl Iterator<Item = &'a T>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}
