//! Golden-section search on a bracket.
//!
//! The search keeps an interval `[lo, hi]` and two interior points `b < c` placed so that
//! `b - lo == hi - c == (hi - lo) / phi^2`. Each iteration compares `f(b)` with `f(c)` and
//! drops the outer segment on the losing side: `(c, hi]` when `b` is the better point,
//! `[lo, b)` otherwise. "Better" means larger when maximizing and smaller when minimizing.
//! The surviving interior point lands exactly where the next iteration needs one of its own,
//! so every iteration costs a single new evaluation and shrinks the bracket by `1 / phi`.
//!
//! ```text
//! lo        b    c         hi      f(b) wins: keep [lo, c]
//! lo   b'   c'   hi'               c' is the old b
//! ```
//!
//! The search ends [`Converged`](crate::RunStatus::Converged) once the bracket is at most
//! `xtol` wide and [`MaxIterReached`](crate::RunStatus::MaxIterReached) otherwise. The estimate
//! is the midpoint of the final bracket. Only a unimodal objective is guaranteed to lead to
//! its optimum; any other one leads to some local optimum inside the bracket. A non-finite
//! value at any evaluated point, the final midpoint included, is an [`OptimError::Domain`].

use std::time::Instant;

use crate::error::OptimError;
use crate::optimizer::{check_bracket, BracketOptimizer, Direction, OptimResult, RunStatus};
use crate::utils::WrappedFunction;

#[derive(Builder, Debug, Clone, Copy)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GoldenRatio {
    /// The width of the interval at which convergence is satisfactory.
    /// Smaller is more precise.
    #[builder(default = "1e-8")]
    pub xtol: f64,

    /// The maximum number of iterations before the search terminates.
    /// Bigger is more precise.
    #[builder(default = "1000")]
    pub max_iter: usize,

    /// Whether to look for a maximum or a minimum.
    #[builder(default = "Direction::Maximize")]
    pub direction: Direction,
}

impl GoldenRatioBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.xtol {
            Some(xtol) if !(xtol.is_finite() && xtol >= 0.0) => {
                Err(format!("xtol must be finite and non-negative, got {}", xtol))
            }
            _ => Ok(()),
        }
    }
}

/// 1.5 + 0.5 * sqrt(5), the square of the golden ratio.
const RATIO: f64 = 2.618_033_988_749_895;

impl BracketOptimizer for GoldenRatio {
    /// Searches for the optimum of `func` between `left` and `right`.
    fn optimize<F: Fn(f64) -> f64>(
        &self,
        func: F,
        left: f64,
        right: f64,
    ) -> Result<OptimResult, OptimError> {
        check_bracket(left, right)?;
        let start = Instant::now();
        let mut func = WrappedFunction::new(func);
        let mut min = left;
        let mut max = right;
        let mut iter = 0;

        let mut x_b = min + (max - min) / RATIO;
        let mut x_c = max - (max - min) / RATIO;
        let mut f_b = func.call_finite(x_b)?;
        let mut f_c = func.call_finite(x_c)?;

        while (max - min).abs() > self.xtol && iter < self.max_iter {
            iter += 1;
            if self.direction.improves(f_b, f_c) {
                max = x_c;
                x_c = x_b;
                x_b = min + (max - min) / RATIO;

                f_c = f_b;
                f_b = func.call_finite(x_b)?;
            } else {
                min = x_b;
                x_b = x_c;
                x_c = max - (max - min) / RATIO;

                f_b = f_c;
                f_c = func.call_finite(x_c)?;
            }
            debug!("golden ratio iter {}: [{}, {}]", iter, min, max);
        }

        let status = if (max - min).abs() > self.xtol {
            warn!("golden ratio stopped after {} iterations with width {}", iter, max - min);
            RunStatus::MaxIterReached
        } else {
            info!("golden ratio converged after {} iterations", iter);
            RunStatus::Converged
        };

        let estimate = (min + max) / 2.0;
        let value = func.call_finite(estimate)?;
        Ok(OptimResult {
            estimate,
            value,
            iterations: iter,
            f_evals: func.num,
            runtime: start.elapsed(),
            status,
            direction: self.direction,
        })
    }
}
