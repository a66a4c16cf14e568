//! Root-finding results.

/// Result of an iterative root finder.
///
/// `S` is the per-iteration record: [`BisectionStep`](super::BisectionStep)
/// or [`NewtonStep`](super::NewtonStep).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootSolution<S> {
    /// Last estimate of the root.
    pub root: f64,

    /// True if the tolerance was met before the iteration cap.
    pub converged: bool,

    /// Number of iterations performed (equals `trace.len()`).
    pub iterations: usize,

    /// Relative approximate error of the last iteration, in percent.
    pub error_percent: f64,

    /// One record per iteration, in order.
    pub trace: Vec<S>,
}

impl<S> RootSolution<S> {
    /// The last recorded step, if any iteration ran.
    pub fn last_step(&self) -> Option<&S> {
        self.trace.last()
    }
}

/// Relative approximate error `|new - old| / |new| * 100`.
///
/// When `new` is exactly zero the ratio is undefined: the error is `0` if
/// `old` is also zero and `+inf` otherwise, so iteration continues.
///
/// # Example
///
/// ```
/// use numlab_core::math::roots::relative_error_percent;
///
/// assert_eq!(relative_error_percent(2.0, 1.0), 50.0);
/// assert_eq!(relative_error_percent(0.0, 0.0), 0.0);
/// assert_eq!(relative_error_percent(0.0, 1.0), f64::INFINITY);
/// ```
pub fn relative_error_percent(new: f64, old: f64) -> f64 {
    if new == 0.0 {
        if old == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((new - old) / new).abs() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_error() {
        assert_relative_eq!(relative_error_percent(2.5, 2.0), 20.0);
        assert_relative_eq!(relative_error_percent(-2.0, -1.0), 50.0);
    }

    #[test]
    fn test_relative_error_at_zero() {
        assert_eq!(relative_error_percent(0.0, 0.0), 0.0);
        assert!(relative_error_percent(0.0, -0.1).is_infinite());
    }

    #[test]
    fn test_last_step() {
        let solution = RootSolution {
            root: 1.0,
            converged: true,
            iterations: 2,
            error_percent: 0.0,
            trace: vec![1, 2],
        };
        assert_eq!(solution.last_step(), Some(&2));

        let empty: RootSolution<u8> = RootSolution {
            root: 0.0,
            converged: false,
            iterations: 0,
            error_percent: f64::INFINITY,
            trace: Vec::new(),
        };
        assert!(empty.last_step().is_none());
    }
}
