//! Gradient ascent (or descent) with a fixed step size.
//!
//! Every iteration moves the estimate by `step_size * f'(x)` along the derivative when
//! maximizing and against it when minimizing. The derivative is a forward difference, see
//! [`approx_fprime`](crate::utils::approx_fprime). There is no line search: a step size that
//! is large relative to the curvature makes the iterates oscillate or run away. A step that
//! lowers the objective (raises it, when minimizing) by more than `ftol` ends the search with
//! [`RunStatus::Diverged`]; a run that keeps creeping along ends with
//! [`RunStatus::MaxIterReached`]. Neither is ever reported as converged.
//!
//! Iterates are not clamped. Set `domain` to have excursions outside it reported as
//! [`OptimError::Domain`]; without it the objective's own guard is all there is.

use std::time::Instant;

use crate::error::OptimError;
use crate::optimizer::{Direction, OptimResult, Optimizer, RunStatus};
use crate::scalar::{check_domain, validate_domain};
use crate::utils::{approx_fprime, WrappedFunction};

#[derive(Builder, Debug, Clone, Copy)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GradientAscent {
    /// The learning rate `gamma`.
    #[builder(default = "0.1")]
    pub step_size: f64,

    /// Convergence is declared once `|f'(x)|` is at most this.
    #[builder(default = "1e-6")]
    pub tolerance: f64,

    /// The maximum number of update steps before the search gives up.
    #[builder(default = "1000")]
    pub max_iter: usize,

    /// Forward difference step `h` at `|x| <= 1`.
    #[builder(default = "1e-5")]
    pub diff_step: f64,

    /// Worsening of the objective tolerated on a single step, relative to `max(1, |f(x)|)`.
    #[builder(default = "1e-8")]
    pub ftol: f64,

    /// Ascend when maximizing, descend when minimizing.
    #[builder(default = "Direction::Maximize")]
    pub direction: Direction,

    /// Interval the iterates have to stay in.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub domain: Option<(f64, f64)>,
}

impl GradientAscentBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(step) = self.step_size {
            if !(step.is_finite() && step > 0.0) {
                return Err(format!("step_size must be finite and positive, got {}", step));
            }
        }
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
        if let Some(tol) = self.ftol {
            if !(tol.is_finite() && tol >= 0.0) {
                return Err(format!("ftol must be finite and non-negative, got {}", tol));
            }
        }
        validate_domain(self.domain)
    }
}

impl Optimizer for GradientAscent {
    fn optimize<F: Fn(f64) -> f64>(&self, func: F, x0: f64) -> Result<OptimResult, OptimError> {
        let start = Instant::now();
        let mut func = WrappedFunction::new(func);
        let sign = self.direction.sign();

        check_domain(x0, self.domain)?;
        let mut x = x0;
        let mut fx = func.call_finite(x)?;
        let mut iterations = 0;

        let status = loop {
            let grad = approx_fprime(&mut func, x, fx, self.diff_step)?;
            debug!("gradient iter {}: x = {}, f = {}, f' = {}", iterations, x, fx, grad);

            if grad.abs() <= self.tolerance {
                info!("gradient search converged after {} iterations at {}", iterations, x);
                break RunStatus::Converged;
            }
            if iterations >= self.max_iter {
                warn!(
                    "gradient search stopped after {} iterations at {} with f' = {}",
                    iterations, x, grad
                );
                break RunStatus::MaxIterReached;
            }

            let previous = fx;
            x += sign * self.step_size * grad;
            check_domain(x, self.domain)?;
            fx = func.call_finite(x)?;
            iterations += 1;

            if sign * (fx - previous) < -self.ftol * previous.abs().max(1.0) {
                warn!(
                    "gradient search diverged at iteration {}: f went from {} to {} at {}",
                    iterations, previous, fx, x
                );
                break RunStatus::Diverged;
            }
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
