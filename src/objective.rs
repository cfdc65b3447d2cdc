//! Likelihood objectives for a success probability `theta`, and a guard that confines any
//! objective to an interval.
//!
//! With `k` successes in `n` independent trials the likelihood is
//! `theta^k (1 - theta)^(n - k)`, maximized at `theta = k / n`. One success in three trials
//! gives `theta (1 - theta)^2`, maximized at `1 / 3`.

/// Evaluates `func` inside `[lo, hi]` and returns `outside` everywhere else.
///
/// ```
/// # use mle_search::objective::restrict;
/// let f = restrict(|t: f64| t * (1.0 - t).powi(2), 0.0, 1.0, 0.0);
/// assert_eq!(f(-0.1), 0.0);
/// ```
pub fn restrict<F>(func: F, lo: f64, hi: f64, outside: f64) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |theta: f64| {
        if lo <= theta && theta <= hi {
            func(theta)
        } else {
            outside
        }
    }
}

/// Likelihood of `successes` in `trials` Bernoulli draws; zero outside `[0, 1]`.
pub fn bernoulli_likelihood(successes: u32, trials: u32) -> impl Fn(f64) -> f64 {
    let failures = trials.saturating_sub(successes) as i32;
    let successes = successes as i32;
    restrict(
        move |theta: f64| theta.powi(successes) * (1.0 - theta).powi(failures),
        0.0,
        1.0,
        0.0,
    )
}

/// Log-likelihood of `successes` in `trials` Bernoulli draws; negative infinity where
/// the likelihood vanishes or `theta` leaves `[0, 1]`.
pub fn bernoulli_log_likelihood(successes: u32, trials: u32) -> impl Fn(f64) -> f64 {
    let failures = f64::from(trials.saturating_sub(successes));
    let successes = f64::from(successes);
    move |theta: f64| {
        if !(0.0..=1.0).contains(&theta) {
            return f64::NEG_INFINITY;
        }
        // 0 * ln(0) counts as 0
        let term = |count: f64, p: f64| if count == 0.0 { 0.0 } else { count * p.ln() };
        term(successes, theta) + term(failures, 1.0 - theta)
    }
}

/// Negated log-likelihood, for searches run with [`Direction::Minimize`](crate::Direction).
pub fn bernoulli_neg_log_likelihood(successes: u32, trials: u32) -> impl Fn(f64) -> f64 {
    let loglik = bernoulli_log_likelihood(successes, trials);
    move |theta: f64| -loglik(theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn restricted_objective_is_flat_outside() {
        let f = restrict(|t: f64| t * (1.0 - t).powi(2), 0.0, 1.0, 0.0);
        assert_eq!(f(-0.1), 0.0);
        assert_eq!(f(1.5), 0.0);
        assert!(approx_eq!(f64, f(0.5), 0.125, ulps = 2));
    }

    #[test]
    fn one_success_in_three() {
        let lik = bernoulli_likelihood(1, 3);
        assert!(approx_eq!(f64, lik(1.0 / 3.0), 4.0 / 27.0, epsilon = 1e-15));
        assert_eq!(lik(-0.1), 0.0);

        let loglik = bernoulli_log_likelihood(1, 3);
        assert!(approx_eq!(f64, loglik(0.5), 3.0 * 0.5f64.ln(), epsilon = 1e-12));
        assert_eq!(loglik(0.0), f64::NEG_INFINITY);
        assert_eq!(loglik(1.2), f64::NEG_INFINITY);

        let nll = bernoulli_neg_log_likelihood(1, 3);
        assert!(approx_eq!(f64, nll(0.5), -loglik(0.5), ulps = 1));
    }

    #[test]
    fn degenerate_samples_stay_finite_at_the_boundary() {
        let all_heads = bernoulli_log_likelihood(4, 4);
        assert_eq!(all_heads(1.0), 0.0);
        assert_eq!(all_heads(0.0), f64::NEG_INFINITY);
    }
}
