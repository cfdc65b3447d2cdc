//! This module contains algorithms that search for optima of functions along a single dimension.
//!
//! [`GradientAscent`] and [`Newton`] walk from a starting point and implement
//! [`Optimizer`](crate::Optimizer); [`GridSearch`] and [`GoldenRatio`] work on an interval
//! and implement [`BracketOptimizer`](crate::BracketOptimizer).

mod golden_ratio;
mod gradient;
mod grid_search;
mod newton;

pub use self::golden_ratio::{GoldenRatio, GoldenRatioBuilder};
pub use self::gradient::{GradientAscent, GradientAscentBuilder};
pub use self::grid_search::{GridSearch, GridSearchBuilder};
pub use self::newton::{Newton, NewtonBuilder};

use crate::error::OptimError;

/// Reports an iterate outside `domain` as a [`OptimError::Domain`]. There is no objective
/// value for such a point, so the error carries NaN.
pub(crate) fn check_domain(x: f64, domain: Option<(f64, f64)>) -> Result<(), OptimError> {
    match domain {
        Some((lo, hi)) if !(lo <= x && x <= hi) => Err(OptimError::Domain {
            theta: x,
            value: f64::NAN,
        }),
        _ => Ok(()),
    }
}

/// Builder check for an optional `domain`: both ends finite and `lo <= hi`.
pub(crate) fn validate_domain(domain: Option<Option<(f64, f64)>>) -> Result<(), String> {
    match domain {
        Some(Some((lo, hi))) if !(lo.is_finite() && hi.is_finite() && lo <= hi) => {
            Err(format!("domain must be a finite interval, got [{}, {}]", lo, hi))
        }
        _ => Ok(()),
    }
}
