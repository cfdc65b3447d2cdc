//! One-dimensional searches for maximum-likelihood estimates.
//!
//! Four strategies share one result type, [`OptimResult`]:
//!
//! * [`scalar::GridSearch`] evaluates every point of an evenly spaced grid,
//! * [`scalar::GradientAscent`] follows the derivative with a fixed step size,
//! * [`scalar::Newton`] uses first and second derivatives,
//! * [`scalar::GoldenRatio`] shrinks a bracket by the golden ratio.
//!
//! Derivatives are forward finite differences, so the objective only has to be callable.
//! Each strategy is configured through its builder; nothing is shared between calls.
//!
//! # Examples
//!
//! ```
//! # use mle_search::objective::bernoulli_log_likelihood;
//! # use mle_search::scalar::NewtonBuilder;
//! # use mle_search::{Optimizer, RunStatus};
//! // one success in three trials
//! let loglik = bernoulli_log_likelihood(1, 3);
//! let newton = NewtonBuilder::default().domain((0.0, 1.0)).build().unwrap();
//! let res = newton.optimize(&loglik, 0.5).unwrap();
//! assert_eq!(res.status, RunStatus::Converged);
//! assert!((res.estimate - 1.0 / 3.0).abs() < 1e-3);
//! ```

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;

pub mod error;
pub mod objective;
pub mod optimizer;
pub mod scalar;
pub mod utils;

pub use crate::error::OptimError;
pub use crate::optimizer::{BracketOptimizer, Direction, OptimResult, Optimizer, RunStatus};
