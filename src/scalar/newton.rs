//! Newton's method on finite-difference derivatives.
//!
//! Each iteration jumps to the stationary point of the local quadratic model,
//! `x <- x - f'(x) / f''(x)`, with both derivatives estimated by forward differences
//! (see [`approx_fprime2`](crate::utils::approx_fprime2)). Near a well-behaved optimum the
//! convergence is quadratic; a likelihood started reasonably close typically needs around
//! five iterations.
//!
//! The step is only taken when the curvature agrees with the direction: negative when
//! maximizing, positive when minimizing, and larger in magnitude than `curvature_tol`.
//! Anything else ends the search with [`OptimError::DegenerateCurvature`] rather than a jump
//! toward the wrong kind of stationary point.
//!
//! # Examples
//!
//! ```
//! # use mle_search::scalar::NewtonBuilder;
//! # use mle_search::objective::bernoulli_log_likelihood;
//! # use mle_search::Optimizer;
//! let newton = NewtonBuilder::default().build().unwrap();
//! let res = newton.optimize(bernoulli_log_likelihood(7, 20), 0.5).unwrap();
//! assert!((res.estimate - 0.35).abs() < 1e-3);
//! ```

use std::time::Instant;

use crate::error::OptimError;
use crate::optimizer::{Direction, OptimResult, Optimizer, RunStatus};
use crate::scalar::{check_domain, validate_domain};
use crate::utils::{approx_fprime2, WrappedFunction};

#[derive(Builder, Debug, Clone, Copy)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Newton {
    /// Convergence is declared once `|f'(x)|` is at most this.
    #[builder(default = "1e-6")]
    pub tolerance: f64,

    /// The maximum number of Newton steps before the search gives up.
    #[builder(default = "100")]
    pub max_iter: usize,

    /// Forward difference step `h` at `|x| <= 1`.
    #[builder(default = "1e-5")]
    pub diff_step: f64,

    /// Second derivatives at most this large in magnitude count as zero.
    #[builder(default = "1e-10")]
    pub curvature_tol: f64,

    /// Which kind of stationary point to look for.
    #[builder(default = "Direction::Maximize")]
    pub direction: Direction,

    /// Interval the iterates have to stay in.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub domain: Option<(f64, f64)>,
}

impl NewtonBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(tol) = self.tolerance {
            if !(tol.is_finite() && tol >= 0.0) {
                return Err(format!("tolerance must be finite and non-negative, got {}", tol));
            }
        }
        if let Some(h) = self.diff_step {
            if !(h.is_finite() && h > 0.0) {
                return Err(format!("diff_step must be finite and positive, got {}", h));
            }
        }
        if let Some(tol) = self.curvature_tol {
            if !(tol.is_finite() && tol >= 0.0) {
                return Err(format!("curvature_tol must be finite and non-negative, got {}", tol));
            }
        }
        validate_domain(self.domain)
    }
}

impl Newton {
    #[inline]
    fn usable_curvature(&self, curvature: f64) -> bool {
        curvature.abs() > self.curvature_tol && self.direction.sign() * curvature < 0.0
    }
}

impl Optimizer for Newton {
    fn optimize<F: Fn(f64) -> f64>(&self, func: F, x0: f64) -> Result<OptimResult, OptimError> {
        let start = Instant::now();
        let mut func = WrappedFunction::new(func);

        check_domain(x0, self.domain)?;
        let mut x = x0;
        let mut fx = func.call_finite(x)?;
        let mut iterations = 0;

        let status = loop {
            let (grad, curvature) = approx_fprime2(&mut func, x, fx, self.diff_step)?;
            debug!(
                "newton iter {}: x = {}, f = {}, f' = {}, f'' = {}",
                iterations, x, fx, grad, curvature
            );

            if grad.abs() <= self.tolerance {
                info!("newton converged after {} iterations at {}", iterations, x);
                break RunStatus::Converged;
            }
            if iterations >= self.max_iter {
                warn!(
                    "newton stopped after {} iterations at {} with f' = {}",
                    iterations, x, grad
                );
                break RunStatus::MaxIterReached;
            }
            if !self.usable_curvature(curvature) {
                warn!("newton: curvature {} at {} is unusable", curvature, x);
                return Err(OptimError::DegenerateCurvature { theta: x, curvature });
            }

            x -= grad / curvature;
            check_domain(x, self.domain)?;
            fx = func.call_finite(x)?;
            iterations += 1;
        };

        Ok(OptimResult {
            estimate: x,
            value: fx,
            iterations,
            f_evals: func.num,
            runtime: start.elapsed(),
            status,
            direction: self.direction,
        })
    }
}
