//! Augmented matrices and input checks for `A x = b`.

use crate::types::ValidationError;
use num_traits::Float;

/// The augmented matrix `[A | b]` of an `n x n` system, `n` rows of `n + 1` entries.
///
/// # Example
///
/// ```
/// use numlab_core::math::linalg::AugmentedMatrix;
///
/// let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
/// let b = vec![3.0, 5.0];
///
/// let m = AugmentedMatrix::from_system(&a, &b).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.rows()[1], vec![1.0, 3.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AugmentedMatrix<T: Float> {
    rows: Vec<Vec<T>>,
}

impl<T: Float> AugmentedMatrix<T> {
    /// Build `[A | b]` after checking the system shape.
    ///
    /// # Errors
    ///
    /// See [`validate_system`].
    pub fn from_system(a: &[Vec<T>], b: &[T]) -> Result<Self, ValidationError> {
        validate_system(a, b)?;
        let rows = a
            .iter()
            .zip(b)
            .map(|(row, &rhs)| {
                let mut augmented = row.clone();
                augmented.push(rhs);
                augmented
            })
            .collect();
        Ok(Self { rows })
    }

    /// Number of equations `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// The rows, each `A[i]` followed by `b[i]`.
    #[inline]
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> T {
        self.rows[row][col]
    }

    /// `row[target] -= factor * row[source]` across all `n + 1` columns.
    pub(crate) fn subtract_scaled_row(&mut self, target: usize, source: usize, factor: T) {
        for k in 0..=self.size() {
            let delta = factor * self.rows[source][k];
            self.rows[target][k] = self.rows[target][k] - delta;
        }
    }
}

/// Check that `A` is a non-empty square matrix, `b` matches it, and every
/// entry is finite. Returns `n`.
///
/// # Errors
///
/// - [`ValidationError::EmptySystem`] if `A` has no rows
/// - [`ValidationError::NonSquareMatrix`] if a row does not have `n` entries
/// - [`ValidationError::DimensionMismatch`] if `b` does not have `n` entries
/// - [`ValidationError::NonFiniteInput`] if an entry is NaN or infinite
pub fn validate_system<T: Float>(a: &[Vec<T>], b: &[T]) -> Result<usize, ValidationError> {
    let n = validate_square(a)?;
    if b.len() != n {
        return Err(ValidationError::DimensionMismatch {
            got: b.len(),
            expected: n,
        });
    }
    if let Some(i) = b.iter().position(|v| !v.is_finite()) {
        return Err(ValidationError::NonFiniteInput {
            name: format!("b[{}]", i),
        });
    }
    Ok(n)
}

/// Check that `A` is a non-empty square matrix of finite entries. Returns `n`.
///
/// # Errors
///
/// Same as [`validate_system`], without the `b` checks.
pub fn validate_square<T: Float>(a: &[Vec<T>]) -> Result<usize, ValidationError> {
    let n = a.len();
    if n == 0 {
        return Err(ValidationError::EmptySystem);
    }
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(ValidationError::NonSquareMatrix {
                row: i,
                len: row.len(),
                expected: n,
            });
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteInput {
                name: format!("A[{}][{}]", i, j),
            });
        }
    }
    Ok(n)
}
