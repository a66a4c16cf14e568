//! Dense square linear systems `A x = b`.
//!
//! This module provides:
//! - [`gauss_eliminate`]: Forward elimination and back-substitution, with a snapshot per pivot
//! - [`cramers_rule`]: Ratio of determinants, with every determinant reported
//! - [`determinant`]: Elimination with partial pivoting
//! - [`AugmentedMatrix`]: `[A | b]`, the unit of the elimination trace
//!
//! Matrices are row-major `&[Vec<T>]` with `T: num_traits::Float`. Any
//! `n >= 1` is accepted.

mod cramer;
mod gauss;
mod matrix;

pub use cramer::{cramers_rule, determinant, CramerSolution};
pub use gauss::{gauss_eliminate, GaussSolution};
pub use matrix::{validate_square, validate_system, AugmentedMatrix};
