//! Objective bookkeeping and forward finite differences.
//!
//! Both estimates carry an `O(h)` truncation bias: the first derivative is off by about
//! `h * f''(x) / 2`, so gradient and Newton iterations settle roughly `h / 2` away from the
//! exact stationary point. A smaller `h` shrinks that bias but loses digits to cancellation
//! in `f(x + h) - f(x)`.
use crate::error::OptimError;

/// Counts evaluations of the wrapped objective and rejects non-finite values.
pub struct WrappedFunction<F: Fn(f64) -> f64> {
    pub num: usize,
    pub func: F,
}

impl<F: Fn(f64) -> f64> WrappedFunction<F> {
    pub fn new(func: F) -> Self {
        WrappedFunction { num: 0, func }
    }

    pub fn call(&mut self, arg: f64) -> f64 {
        self.num += 1;
        (self.func)(arg)
    }

    /// Like `call`, but a NaN or infinite value is a [`OptimError::Domain`].
    pub fn call_finite(&mut self, arg: f64) -> Result<f64, OptimError> {
        let value = self.call(arg);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(OptimError::Domain { theta: arg, value })
        }
    }
}

/// Difference step actually used at `x`: `epsilon` for `|x| <= 1`, relative beyond that so
/// that `x + h != x` for large iterates.
#[inline]
pub fn diff_step(x: f64, epsilon: f64) -> f64 {
    epsilon * x.abs().max(1.0)
}

/// Forward-difference first derivative `(f(x + h) - f(x)) / h`, given `fx = f(x)`.
pub fn approx_fprime<F>(
    func: &mut WrappedFunction<F>,
    x: f64,
    fx: f64,
    epsilon: f64,
) -> Result<f64, OptimError>
where
    F: Fn(f64) -> f64,
{
    let h = diff_step(x, epsilon);
    let f1 = func.call_finite(x + h)?;
    Ok((f1 - fx) / h)
}

/// Forward-difference first and second derivatives at `x`, given `fx = f(x)`:
/// `f' ~ (f(x + h) - f(x)) / h` and `f'' ~ (f(x + 2h) - 2 f(x + h) + f(x)) / h^2`.
pub fn approx_fprime2<F>(
    func: &mut WrappedFunction<F>,
    x: f64,
    fx: f64,
    epsilon: f64,
) -> Result<(f64, f64), OptimError>
where
    F: Fn(f64) -> f64,
{
    let h = diff_step(x, epsilon);
    let f1 = func.call_finite(x + h)?;
    let f2 = func.call_finite(x + 2.0 * h)?;
    Ok(((f1 - fx) / h, (f2 - 2.0 * f1 + fx) / (h * h)))
}
