//! Solver configuration types.

use crate::types::ValidationError;

/// Iteration cap shared by the iterative root finders.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Default stopping tolerance, in percent relative approximate error.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 1e-6;

/// Configuration for the iterative root finders.
///
/// A solver stops when the relative approximate error
/// `|x_new - x_old| / |x_new| * 100` is at or below `tolerance_percent`, or
/// after `max_iterations` iterations, whichever comes first.
///
/// # Example
///
/// ```
/// use numlab_core::math::roots::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.max_iterations, 50);
///
/// let custom = SolverConfig::new(1e-4, 20).unwrap();
/// assert_eq!(custom.tolerance_percent, 1e-4);
///
/// assert!(SolverConfig::new(-1.0, 20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Stopping tolerance on the relative approximate error, in percent.
    pub tolerance_percent: f64,

    /// Maximum number of iterations before giving up.
    ///
    /// Reaching the cap is not an error: the solution reports
    /// `converged == false`.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `tolerance_percent`: 1e-6
    /// - `max_iterations`: 50
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidTolerance`] if the tolerance is negative or not finite
    /// - [`ValidationError::InvalidIterationCap`] if `max_iterations` is zero
    pub fn new(tolerance_percent: f64, max_iterations: usize) -> Result<Self, ValidationError> {
        let config = Self {
            tolerance_percent,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// The default iteration cap with the given tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`SolverConfig::new`].
    pub fn with_tolerance(tolerance_percent: f64) -> Result<Self, ValidationError> {
        Self::new(tolerance_percent, DEFAULT_MAX_ITERATIONS)
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SolverConfig::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(ValidationError::InvalidTolerance(self.tolerance_percent));
        }
        if self.max_iterations == 0 {
            return Err(ValidationError::InvalidIterationCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.tolerance_percent, 1e-6);
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_config() {
        let config = SolverConfig::new(1e-3, 10).unwrap();
        assert_eq!(config.tolerance_percent, 1e-3);
        assert_eq!(config.max_iterations, 10);
    }

    #[test]
    fn test_zero_tolerance_is_allowed() {
        assert!(SolverConfig::new(0.0, 10).is_ok());
    }

    #[test]
    fn test_invalid_tolerance() {
        assert_eq!(
            SolverConfig::new(-1e-3, 10),
            Err(ValidationError::InvalidTolerance(-1e-3))
        );
        assert!(SolverConfig::new(f64::NAN, 10).is_err());
        assert!(SolverConfig::new(f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_invalid_iteration_cap() {
        assert_eq!(
            SolverConfig::new(1e-3, 0),
            Err(ValidationError::InvalidIterationCap)
        );
    }

    #[test]
    fn test_with_tolerance() {
        let config = SolverConfig::with_tolerance(0.5).unwrap();
        assert_eq!(config.tolerance_percent, 0.5);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_config_copy() {
        let config1 = SolverConfig::default();
        let config2 = config1;
        assert_eq!(config1, config2);
    }
}
