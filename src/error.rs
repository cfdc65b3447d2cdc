//! Failure outcomes shared by every search strategy.
use thiserror::Error;

/// Errors that can end a search before it produces an estimate, or that
/// reject an estimate the caller asked to be converged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OptimError {
    /// The objective was not finite at an evaluated point, or an iterate
    /// left the configured domain.
    #[error("objective undefined at theta = {theta} (value {value})")]
    Domain { theta: f64, value: f64 },

    /// The search stopped before the derivative tolerance was met, because the
    /// iteration budget ran out or a step made the objective worse.
    #[error("no convergence after {iterations} iterations (last estimate {estimate})")]
    NonConvergence { iterations: usize, estimate: f64 },

    /// Newton's method met a second derivative that is zero or has the
    /// wrong sign for the requested direction.
    #[error("degenerate curvature {curvature} at theta = {theta}")]
    DegenerateCurvature { theta: f64, curvature: f64 },

    /// The search interval is not finite or not ordered.
    #[error("invalid search interval [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    /// The grid spacing would need more points than the search allows.
    #[error("grid needs about {points} points, at most {max_points} allowed")]
    GridTooLarge { points: f64, max_points: usize },
}
