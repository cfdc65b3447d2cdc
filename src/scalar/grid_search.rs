//! Exhaustive search over an evenly spaced grid.
//!
//! The interval `[lo, hi]` is sampled at `lo, lo + delta, lo + 2 delta, ...` and at `hi`
//! itself, so both ends are always candidates. Every grid point is evaluated and the best
//! one is returned; there is no early termination and no unimodality assumption.
//!
//! For a unimodal objective the optimum lies between the best sampled point and one of its
//! neighbours, so the estimate is within `delta` of it, and within `delta / 2` when the
//! objective is symmetric about its optimum.
//!
//! The cost is one evaluation per grid point, so a spacing that is tiny relative to the
//! interval is refused with [`OptimError::GridTooLarge`] instead of allocating the grid.
//!
//! # Examples
//!
//! ```
//! # use mle_search::scalar::GridSearchBuilder;
//! # use mle_search::BracketOptimizer;
//! let search = GridSearchBuilder::default()
//!     .resolution(1e-3)
//!     .build()
//!     .unwrap();
//! let res = search.optimize(|t: f64| t * (1.0 - t).powi(2), 0.0, 1.0).unwrap();
//! assert!((res.estimate - 1.0 / 3.0).abs() <= 5e-4);
//! ```

use std::time::Instant;

use ndarray::Array1;

use crate::error::OptimError;
use crate::optimizer::{check_bracket, BracketOptimizer, Direction, OptimResult, RunStatus};
use crate::utils::WrappedFunction;

/// Absorbs rounding in `(hi - lo) / delta` when the interval is a whole number of steps.
const GRID_SLACK: f64 = 1e-9;

#[derive(Builder, Debug, Clone, Copy)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GridSearch {
    /// Spacing `delta` between neighbouring grid points.
    #[builder(default = "1e-3")]
    pub resolution: f64,

    /// Whether to return the largest or the smallest sampled value.
    #[builder(default = "Direction::Maximize")]
    pub direction: Direction,

    /// Values within this many floating point representations of the incumbent do not
    /// replace it, so ties go to the lowest grid point. See crate float_cmp.
    #[builder(default = "1")]
    pub ulps: i64,

    /// Largest number of grid points (and so objective evaluations) a search may use.
    #[builder(default = "1_000_000")]
    pub max_points: usize,
}

impl GridSearchBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(delta) = self.resolution {
            if !(delta.is_finite() && delta > 0.0) {
                return Err(format!("resolution must be finite and positive, got {}", delta));
            }
        }
        match self.max_points {
            Some(0) => Err("max_points must be positive".to_string()),
            _ => Ok(()),
        }
    }
}

impl GridSearch {
    /// The points the search evaluates on `[lo, hi]`.
    pub fn grid(&self, lo: f64, hi: f64) -> Result<Array1<f64>, OptimError> {
        check_bracket(lo, hi)?;
        let too_large = |points: f64| OptimError::GridTooLarge {
            points,
            max_points: self.max_points,
        };

        let steps = ((hi - lo) / self.resolution + GRID_SLACK).floor();
        if !(steps.is_finite() && steps + 1.0 <= self.max_points as f64) {
            return Err(too_large(steps + 1.0));
        }
        let steps = steps as usize;

        let mut points: Vec<f64> = (0..=steps)
            .map(|k| (lo + k as f64 * self.resolution).min(hi))
            .collect();
        if let Some(&last) = points.last() {
            if hi - last > GRID_SLACK * self.resolution {
                points.push(hi);
            }
        }
        if points.len() > self.max_points {
            return Err(too_large(points.len() as f64));
        }
        Ok(Array1::from(points))
    }
}

impl BracketOptimizer for GridSearch {
    fn optimize<F: Fn(f64) -> f64>(
        &self,
        func: F,
        lo: f64,
        hi: f64,
    ) -> Result<OptimResult, OptimError> {
        let start = Instant::now();
        let mut func = WrappedFunction::new(func);

        let grid = self.grid(lo, hi).map_err(|e| {
            warn!("grid search on [{}, {}]: {}", lo, hi, e);
            e
        })?;
        let values = grid.mapv(|x| func.call(x));

        let best = grid
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| v.is_finite())
            .fold(None, |best: Option<(f64, f64)>, (&x, &v)| match best {
                Some((_, bv)) if !self.direction.improves_ulps(v, bv, self.ulps) => best,
                _ => Some((x, v)),
            });

        match best {
            Some((estimate, value)) => {
                info!(
                    "grid search over {} points on [{}, {}]: best {} at {}",
                    grid.len(),
                    lo,
                    hi,
                    value,
                    estimate
                );
                Ok(OptimResult {
                    estimate,
                    value,
                    iterations: grid.len(),
                    f_evals: func.num,
                    runtime: start.elapsed(),
                    status: RunStatus::Exhausted,
                    direction: self.direction,
                })
            }
            None => {
                warn!("grid search on [{}, {}]: objective undefined at every point", lo, hi);
                Err(OptimError::Domain {
                    theta: lo,
                    value: values[0],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{bernoulli_log_likelihood, restrict};
    use float_cmp::approx_eq;

    fn search(resolution: f64) -> GridSearch {
        GridSearchBuilder::default()
            .resolution(resolution)
            .build()
            .unwrap()
    }

    #[test]
    fn grid_includes_both_ends() {
        let grid = search(0.3).grid(0.0, 1.0).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[4], 1.0);

        let grid = search(0.25).grid(0.0, 1.0).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[4], 1.0);

        let grid = search(0.1).grid(0.0, 1.0).unwrap();
        assert_eq!(grid.len(), 11);
        assert!(grid.iter().all(|&x| x <= 1.0));

        assert_eq!(search(0.1).grid(2.0, 2.0).unwrap().len(), 1);
    }

    #[test]
    fn tiny_resolutions_are_refused() {
        let f = |t: f64| t * (1.0 - t).powi(2);
        assert!(matches!(
            search(1e-300).optimize(&f, 0.0, 1.0),
            Err(OptimError::GridTooLarge { points, max_points: 1_000_000 }) if points > 1e299
        ));
        // (hi - lo) / delta overflows to infinity
        assert!(matches!(
            search(1e-320).grid(0.0, 1.0),
            Err(OptimError::GridTooLarge { points, .. }) if points.is_infinite()
        ));
    }

    #[test]
    fn max_points_caps_the_grid() {
        let capped = |max_points: usize, resolution: f64| {
            GridSearchBuilder::default()
                .resolution(resolution)
                .max_points(max_points)
                .build()
                .unwrap()
        };
        assert_eq!(capped(11, 0.1).grid(0.0, 1.0).unwrap().len(), 11);
        assert!(matches!(
            capped(10, 0.1).grid(0.0, 1.0),
            Err(OptimError::GridTooLarge { max_points: 10, .. })
        ));
        // four multiples of 0.3 fit, the appended upper end does not
        assert!(matches!(
            capped(4, 0.3).grid(0.0, 1.0),
            Err(OptimError::GridTooLarge { points, max_points: 4 }) if points == 5.0
        ));
        assert_eq!(capped(1, 0.3).grid(0.5, 0.5).unwrap().len(), 1);
    }

    #[test]
    fn cubic_likelihood() {
        let f = |t: f64| t * (1.0 - t).powi(2);
        let res = search(1e-3).optimize(&f, 0.0, 1.0).unwrap();
        assert!(approx_eq!(f64, res.estimate, 1.0 / 3.0, epsilon = 1e-3));
        assert_eq!(res.status, RunStatus::Exhausted);
        assert_eq!(res.iterations, 1001);
        assert_eq!(res.f_evals, 1001);
    }

    #[test]
    fn within_half_a_step_of_a_symmetric_optimum() {
        let f = |t: f64| -(t - 1.0 / 3.0).powi(2);
        for &delta in &[0.1, 0.05, 0.03, 0.007, 1e-3] {
            let res = search(delta).optimize(&f, 0.0, 1.0).unwrap();
            assert!((res.estimate - 1.0 / 3.0).abs() <= delta / 2.0);
        }
    }

    #[test]
    fn within_a_step_of_an_asymmetric_optimum() {
        let f = |t: f64| t * (1.0 - t).powi(2);
        for &delta in &[0.1, 0.07, 0.02] {
            let res = search(delta).optimize(&f, 0.0, 1.0).unwrap();
            assert!((res.estimate - 1.0 / 3.0).abs() <= delta);
        }
    }

    #[test]
    fn minimizes_and_keeps_the_first_tie() {
        let search = GridSearchBuilder::default()
            .resolution(0.5)
            .direction(Direction::Minimize)
            .build()
            .unwrap();
        let res = search.optimize(|t: f64| (t - 1.0).powi(2), 0.0, 2.0).unwrap();
        assert_eq!(res.estimate, 1.0);
        assert_eq!(res.value, 0.0);

        let flat = search.optimize(|_: f64| 3.0, 0.0, 2.0).unwrap();
        assert_eq!(flat.estimate, 0.0);
    }

    #[test]
    fn infeasible_points_are_skipped() {
        let res = search(0.01)
            .optimize(bernoulli_log_likelihood(2, 5), 0.0, 1.0)
            .unwrap();
        assert!(approx_eq!(f64, res.estimate, 0.4, epsilon = 1e-9));
        assert!(res.value.is_finite());

        let nowhere = restrict(|t: f64| t, 5.0, 6.0, f64::NEG_INFINITY);
        assert!(matches!(
            search(0.1).optimize(nowhere, 0.0, 1.0),
            Err(OptimError::Domain { theta, .. }) if theta == 0.0
        ));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(GridSearchBuilder::default().resolution(0.0).build().is_err());
        assert!(GridSearchBuilder::default().resolution(f64::NAN).build().is_err());
        assert!(GridSearchBuilder::default().max_points(0).build().is_err());
        assert!(matches!(
            search(0.1).optimize(|t: f64| t, 1.0, 0.0),
            Err(OptimError::InvalidBracket { .. })
        ));
    }
}
