//! This module provides the base framework for all searches present in this crate, such as the
//! base traits and the return type.
use std::fmt;
use std::time::Duration;

use float_cmp::ApproxEqUlps;

use crate::error::OptimError;

/// Which extremum a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Look for a maximum, e.g. of a (log-)likelihood. Gradient methods ascend.
    Maximize,
    /// Look for a minimum, e.g. of a negative log-likelihood. Gradient methods descend.
    Minimize,
}

impl Direction {
    /// `+1` when maximizing, `-1` when minimizing.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Maximize => 1.0,
            Direction::Minimize => -1.0,
        }
    }

    /// Whether `candidate` is strictly better than `incumbent` in this direction.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }

    /// Like [`Direction::improves`], but values within `ulps` floating point
    /// representations of each other count as equal. See crate float_cmp.
    #[inline]
    pub fn improves_ulps(self, candidate: f64, incumbent: f64, ulps: i64) -> bool {
        self.improves(candidate, incumbent) && !candidate.approx_eq_ulps(&incumbent, ulps)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Maximize
    }
}

/// Search states at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The derivative (or bracket width) met the requested tolerance.
    Converged,
    /// The iteration budget ran out first. The estimate is best-effort only.
    MaxIterReached,
    /// A step made the objective worse by more than the search tolerates, e.g. a step
    /// size too large for the curvature. The estimate is where the search stopped.
    Diverged,
    /// Every grid point was evaluated; exhaustive searches have no other outcome.
    Exhausted,
}

/// A search result, storing the final estimate and details of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimResult {
    /// The final parameter value.
    pub estimate: f64,
    /// The objective value at `estimate`.
    pub value: f64,
    /// Number of update steps taken (grid points evaluated, for grid search).
    pub iterations: usize,
    /// The number of function evaluations performed.
    pub f_evals: usize,
    /// The runtime of the search according to the system clock.
    pub runtime: Duration,
    /// How the search ended.
    pub status: RunStatus,
    /// The extremum that was searched for.
    pub direction: Direction,
}

impl OptimResult {
    /// `false` when the iteration budget ran out or the search diverged.
    pub fn converged(&self) -> bool {
        match self.status {
            RunStatus::Converged | RunStatus::Exhausted => true,
            RunStatus::MaxIterReached | RunStatus::Diverged => false,
        }
    }

    /// Turns a truncated or diverged run into [`OptimError::NonConvergence`], for callers that
    /// have no use for a best-effort estimate.
    pub fn into_converged(self) -> Result<Self, OptimError> {
        if self.converged() {
            Ok(self)
        } else {
            Err(OptimError::NonConvergence {
                iterations: self.iterations,
                estimate: self.estimate,
            })
        }
    }
}

impl fmt::Display for OptimResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "estimate {} (value {}) after {} iterations, {} evaluations: {:?}",
            self.estimate, self.value, self.iterations, self.f_evals, self.status
        )
    }
}

/// A search that walks from a starting point, e.g. gradient ascent or Newton's method.
pub trait Optimizer {
    /// Searches for a stationary point of `func` starting at `x0`.
    /// Derivatives are approximated numerically.
    fn optimize<F: Fn(f64) -> f64>(&self, func: F, x0: f64) -> Result<OptimResult, OptimError>;
}

/// A search confined to an interval, e.g. grid or golden-section search.
pub trait BracketOptimizer {
    /// Searches for the best value of `func` between `lo` and `hi`.
    fn optimize<F: Fn(f64) -> f64>(
        &self,
        func: F,
        lo: f64,
        hi: f64,
    ) -> Result<OptimResult, OptimError>;
}

/// Rejects intervals that are not finite, or where `lo > hi`.
pub(crate) fn check_bracket(lo: f64, hi: f64) -> Result<(), OptimError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(())
    } else {
        Err(OptimError::InvalidBracket { lo, hi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: RunStatus) -> OptimResult {
        OptimResult {
            estimate: 0.25,
            value: 1.0,
            iterations: 7,
            f_evals: 14,
            runtime: Duration::from_millis(1),
            status,
            direction: Direction::Maximize,
        }
    }

    #[test]
    fn truncated_runs_are_not_converged() {
        assert!(result(RunStatus::Converged).converged());
        assert!(result(RunStatus::Exhausted).converged());
        assert!(!result(RunStatus::MaxIterReached).converged());
        assert!(!result(RunStatus::Diverged).converged());
        assert!(result(RunStatus::Diverged).into_converged().is_err());

        assert_eq!(
            result(RunStatus::MaxIterReached).into_converged(),
            Err(OptimError::NonConvergence {
                iterations: 7,
                estimate: 0.25
            })
        );
        assert!(result(RunStatus::Converged).into_converged().is_ok());
    }

    #[test]
    fn direction_ordering() {
        assert!(Direction::Maximize.improves(2.0, 1.0));
        assert!(!Direction::Maximize.improves(1.0, 1.0));
        assert!(Direction::Minimize.improves(1.0, 2.0));
        assert!(Direction::Maximize.improves(0.0, f64::NEG_INFINITY));
        assert_eq!(Direction::Minimize.sign(), -1.0);

        let nudged = 1.0 + std::f64::EPSILON;
        assert!(Direction::Maximize.improves(nudged, 1.0));
        assert!(!Direction::Maximize.improves_ulps(nudged, 1.0, 1));
        assert!(Direction::Minimize.improves_ulps(0.5, 1.0, 1));
    }

    #[test]
    fn brackets() {
        assert!(check_bracket(0.0, 1.0).is_ok());
        assert!(check_bracket(1.0, 1.0).is_ok());
        assert_eq!(
            check_bracket(1.0, 0.0),
            Err(OptimError::InvalidBracket { lo: 1.0, hi: 0.0 })
        );
        assert!(check_bracket(0.0, f64::INFINITY).is_err());
        assert!(check_bracket(f64::NAN, 1.0).is_err());
    }
}
