//! Cramer's rule and determinants.

use super::matrix::{validate_square, validate_system};
use crate::types::{DomainError, NumericError};
use num_traits::Float;

/// Solution of `A x = b` by Cramer's rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CramerSolution<T: Float> {
    /// `x_i = det(A_i) / det(A)`.
    pub solution: Vec<T>,
    /// `det(A)`.
    pub determinant: T,
    /// `det(A_i)`, where `A_i` is `A` with column `i` replaced by `b`.
    pub variable_determinants: Vec<T>,
}

/// Determinant by elimination with partial pivoting.
///
/// Returns exactly zero when elimination meets an all-zero column.
///
/// # Errors
///
/// [`NumericError::Validation`] if `a` is empty, not square or non-finite.
///
/// # Example
///
/// ```
/// use numlab_core::math::linalg::determinant;
///
/// let a: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
/// assert!((determinant(&a).unwrap() + 2.0).abs() < 1e-12);
/// ```
pub fn determinant<T: Float>(a: &[Vec<T>]) -> Result<T, NumericError> {
    validate_square(a)?;
    Ok(eliminate_det(a.to_vec()))
}

fn eliminate_det<T: Float>(mut m: Vec<Vec<T>>) -> T {
    let n = m.len();
    let mut det = T::one();

    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if m[row][col].abs() > m[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if m[pivot_row][col] == T::zero() {
            return T::zero();
        }
        if pivot_row != col {
            m.swap(pivot_row, col);
            det = -det;
        }

        let pivot = m[col][col];
        det = det * pivot;
        for row in col + 1..n {
            let factor = m[row][col] / pivot;
            for k in col..n {
                let delta = factor * m[col][k];
                m[row][k] = m[row][k] - delta;
            }
        }
    }
    det
}

/// Product of row Euclidean norms, an upper bound on `|det(A)|`.
fn hadamard_bound<T: Float>(a: &[Vec<T>]) -> T {
    a.iter().fold(T::one(), |acc, row| {
        let norm = row.iter().fold(T::zero(), |s, &v| s + v * v).sqrt();
        acc * norm
    })
}

/// Solve `A x = b` by Cramer's rule.
///
/// `det(A)` is treated as zero when it is within rounding error of zero
/// relative to the Hadamard bound of `A` (`|det| <= n * eps * prod ||row||`).
///
/// # Errors
///
/// - [`NumericError::Validation`] if the system is empty, not square, mismatched or non-finite
/// - [`DomainError::SingularMatrix`] if `det(A)` is zero: no unique solution
/// - [`DomainError::NonFinite`] if a determinant or unknown overflows
///
/// # Example
///
/// ```
/// use numlab_core::math::linalg::cramers_rule;
///
/// let a: Vec<Vec<f64>> = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
/// let result = cramers_rule(&a, &[3.0, 5.0]).unwrap();
///
/// assert!((result.determinant - 5.0).abs() < 1e-12);
/// assert!((result.solution[0] - 0.8).abs() < 1e-12);
/// assert!((result.solution[1] - 1.4).abs() < 1e-12);
/// ```
pub fn cramers_rule<T: Float>(a: &[Vec<T>], b: &[T]) -> Result<CramerSolution<T>, NumericError> {
    let n = validate_system(a, b)?;

    let det = eliminate_det(a.to_vec());
    check_finite(det, "det(A)")?;

    let n_t = T::from(n).unwrap_or_else(T::one);
    let threshold = n_t * T::epsilon() * hadamard_bound(a);
    if det.abs() <= threshold {
        tracing::debug!(n, "determinant is zero to working precision");
        return Err(DomainError::SingularMatrix {
            determinant: det.to_f64().unwrap_or(f64::NAN),
        }
        .into());
    }

    let mut solution = Vec::with_capacity(n);
    let mut variable_determinants = Vec::with_capacity(n);
    for i in 0..n {
        let replaced: Vec<Vec<T>> = a
            .iter()
            .zip(b)
            .map(|(row, &rhs)| {
                let mut row = row.clone();
                row[i] = rhs;
                row
            })
            .collect();
        let det_i = eliminate_det(replaced);
        check_finite(det_i, &format!("det(A_{})", i + 1))?;

        let xi = det_i / det;
        check_finite(xi, &format!("x[{}]", i))?;

        variable_determinants.push(det_i);
        solution.push(xi);
    }

    Ok(CramerSolution {
        solution,
        determinant: det,
        variable_determinants,
    })
}

fn check_finite<T: Float>(value: T, context: &str) -> Result<(), NumericError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NumericError::non_finite(
            context,
            value.to_f64().unwrap_or(f64::NAN),
        ))
    }
}
