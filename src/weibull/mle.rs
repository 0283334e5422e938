//! Maximum Likelihood Estimation (MLE) for Weibull parameters.
//!
//! Solves the profile likelihood equation for the shape parameter with a
//! bracketed Newton-Raphson iteration, then derives the scale parameter
//! analytically. Location is fixed at zero: failure times are used as
//! observed, without a shift.

use serde::Serialize;

use super::params::WeibullParams;
use crate::error::EstimationError;
use crate::sample::LifetimeSample;

/// Result of Weibull MLE fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeibullFit {
    /// Fitted shape and scale.
    pub params: WeibullParams,
    /// Log-likelihood at the fitted parameters.
    pub log_likelihood: f64,
    /// Number of shape iterations used.
    pub iterations: usize,
}

/// Maximum shape iterations.
const MAX_ITER: usize = 200;

/// Relative convergence tolerance on the shape step.
const TOL: f64 = 1e-10;

/// Initial shape, slightly above exponential.
const INITIAL_SHAPE: f64 = 1.2;

/// Fit a Weibull distribution to failure time data using MLE.
///
/// Given failure times t_1, ..., t_n, the log-likelihood is:
///
/// ```text
/// L(k, λ) = n*ln(k) - n*k*ln(λ) + (k-1)*sum(ln(t_i)) - sum((t_i/λ)^k)
/// ```
///
/// For fixed k the maximising scale is `λ = (sum(t_i^k) / n)^(1/k)`.
/// Substituting gives the profile score for k:
///
/// ```text
/// g(k) = 1/k + mean(ln(t_i)) - sum(t_i^k * ln(t_i)) / sum(t_i^k) = 0
/// ```
///
/// `g` is strictly decreasing whenever the sample has two distinct values,
/// so the root is unique. Each iteration tightens a bracket around it and
/// falls back to bisection when a Newton step would leave the bracket.
/// Times are divided by the sample maximum before powering, which leaves
/// the root unchanged and keeps every `t_i^k` in (0, 1].
///
/// # Errors
/// - [`EstimationError::TooFewDistinct`] if fewer than 2 distinct values
/// - [`EstimationError::NotConverged`] if the iteration budget runs out
/// - [`EstimationError::Degenerate`] if the fitted scale is not finite
///
/// # Examples
///
/// ```
/// use u_replacement::sample::LifetimeSample;
/// use u_replacement::weibull::weibull_mle;
/// let sample = LifetimeSample::new(vec![10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
/// let fit = weibull_mle(&sample).unwrap();
/// assert!(fit.params.shape() > 1.0);
/// assert!(fit.params.scale() > 20.0 && fit.params.scale() < 50.0);
/// ```
///
/// # Reference
/// Lawless (2003), *Statistical Models and Methods for Lifetime Data*, 2nd ed.
pub fn weibull_mle(sample: &LifetimeSample) -> Result<WeibullFit, EstimationError> {
    let distinct = sample.distinct_count();
    if distinct < 2 {
        return Err(EstimationError::TooFewDistinct { distinct });
    }

    let data = sample.values();
    let n_f = data.len() as f64;
    let t_max = sample.max();

    // ln(u_i) with u_i = t_i / t_max, all <= 0
    let ln_u: Vec<f64> = data.iter().map(|&t| (t / t_max).ln()).collect();
    let mean_ln_u = ln_u.iter().sum::<f64>() / n_f;

    let mut beta = INITIAL_SHAPE;
    let mut lo = 0.0_f64;
    let mut hi = f64::INFINITY;
    let mut last_step = f64::INFINITY;
    let mut converged = None;

    for iter in 1..=MAX_ITER {
        let (s0, s1, s2) = power_sums(&ln_u, beta);
        let g = 1.0 / beta + mean_ln_u - s1 / s0;
        let g_prime = -1.0 / (beta * beta) - (s2 * s0 - s1 * s1) / (s0 * s0);

        if g == 0.0 {
            converged = Some(iter);
            break;
        }
        // g is decreasing: a positive score means the root lies above beta
        if g > 0.0 {
            lo = beta;
        } else {
            hi = beta;
        }

        let mut next = beta - g / g_prime;
        if !(next.is_finite() && next > lo && next < hi) {
            next = if hi.is_finite() {
                0.5 * (lo + hi)
            } else {
                2.0 * beta
            };
        }

        last_step = (next - beta).abs();
        beta = next;

        if last_step < TOL * beta.max(1.0) {
            converged = Some(iter);
            break;
        }
    }

    let iterations = converged.ok_or(EstimationError::NotConverged {
        iterations: MAX_ITER,
        last_step,
    })?;

    // λ = t_max * (sum(u_i^k) / n)^(1/k)
    let (s0, _, _) = power_sums(&ln_u, beta);
    let eta = t_max * (s0 / n_f).powf(1.0 / beta);

    let params = WeibullParams::new(beta, eta)
        .map_err(|e| EstimationError::Degenerate(e.to_string()))?;

    Ok(WeibullFit {
        params,
        log_likelihood: log_likelihood(&params, sample),
        iterations,
    })
}

/// Weibull log-likelihood of `sample` under `params`.
pub fn log_likelihood(params: &WeibullParams, sample: &LifetimeSample) -> f64 {
    let (k, lam) = (params.shape(), params.scale());
    let n_f = sample.len() as f64;
    let sum_ln_t: f64 = sample.values().iter().map(|t| t.ln()).sum();
    let sum_z: f64 = sample
        .values()
        .iter()
        .map(|&t| (t / lam).powf(k))
        .sum();
    n_f * k.ln() - n_f * k * lam.ln() + (k - 1.0) * sum_ln_t - sum_z
}

/// Returns (sum(u^k), sum(u^k ln u), sum(u^k ln² u)) from precomputed ln u.
fn power_sums(ln_u: &[f64], beta: f64) -> (f64, f64, f64) {
    ln_u.iter().fold((0.0, 0.0, 0.0), |(s0, s1, s2), &lu| {
        let u_beta = (beta * lu).exp();
        (s0 + u_beta, s1 + u_beta * lu, s2 + u_beta * lu * lu)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> LifetimeSample {
        LifetimeSample::from_slice(values).expect("valid sample")
    }

    #[test]
    fn test_mle_uniform_spacing() {
        let data = sample(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let fit = weibull_mle(&data).expect("MLE should converge");

        assert!(
            fit.params.shape() > 1.5 && fit.params.shape() < 5.0,
            "shape = {}, expected in [1.5, 5.0]",
            fit.params.shape()
        );
        assert!(
            fit.params.scale() > 40.0 && fit.params.scale() < 100.0,
            "scale = {}, expected in [40, 100]",
            fit.params.scale()
        );
        assert!(fit.log_likelihood.is_finite());
        assert!(fit.log_likelihood < 0.0);
    }

    #[test]
    fn test_mle_near_exponential() {
        let data = sample(&[5.0, 10.0, 15.0, 25.0, 35.0, 50.0, 75.0, 100.0]);
        let fit = weibull_mle(&data).expect("MLE should converge");
        assert!(
            fit.params.shape() > 0.5 && fit.params.shape() < 2.0,
            "shape = {}, expected near 1.0",
            fit.params.shape()
        );
    }

    #[test]
    fn test_mle_quantile_data() {
        // t_i = λ * (-ln(1 - F_i))^(1/k) with F_i = (i - 0.5) / n, k=2, λ=50
        let data: Vec<f64> = (1..=10)
            .map(|i| {
                let f = (i as f64 - 0.5) / 10.0;
                50.0 * (-(1.0 - f).ln()).powf(0.5)
            })
            .collect();
        let fit = weibull_mle(&sample(&data)).expect("MLE should converge");

        assert!(
            (fit.params.shape() - 2.0).abs() < 0.5,
            "shape = {}, expected near 2.0",
            fit.params.shape()
        );
        assert!(
            (fit.params.scale() - 50.0).abs() < 15.0,
            "scale = {}, expected near 50.0",
            fit.params.scale()
        );
    }

    #[test]
    fn test_mle_stationary_point() {
        let data = sample(&[410.0, 655.0, 902.0, 1130.0, 388.0, 975.0, 720.0, 1402.0]);
        let fit = weibull_mle(&data).expect("MLE should converge");
        let best = fit.log_likelihood;
        let (k, lam) = (fit.params.shape(), fit.params.scale());
        for (dk, dl) in [(0.05, 0.0), (-0.05, 0.0), (0.0, 10.0), (0.0, -10.0)] {
            let nearby = WeibullParams::new(k + dk, lam + dl).expect("valid parameters");
            assert!(
                log_likelihood(&nearby, &data) < best,
                "perturbation ({dk}, {dl}) increased the likelihood"
            );
        }
    }

    #[test]
    fn test_mle_scale_invariance() {
        let base = [3.0, 7.0, 8.5, 12.0, 15.0, 21.0];
        let scaled: Vec<f64> = base.iter().map(|t| t * 1000.0).collect();
        let a = weibull_mle(&sample(&base)).expect("MLE should converge");
        let b = weibull_mle(&sample(&scaled)).expect("MLE should converge");
        assert!((a.params.shape() - b.params.shape()).abs() < 1e-8);
        assert!((a.params.scale() * 1000.0 - b.params.scale()).abs() < 1e-5);
    }

    #[test]
    fn test_mle_tight_cluster_high_shape() {
        // Very narrow spread drives the shape far above 1.
        let data = sample(&[
            999.0, 1000.0, 1001.0, 1000.5, 999.5, 1000.2, 999.8, 1000.1,
        ]);
        let fit = weibull_mle(&data).expect("MLE should converge");
        assert!(fit.params.shape() > 500.0, "shape = {}", fit.params.shape());
        assert!((fit.params.scale() - 1000.0).abs() < 5.0);
    }

    #[test]
    fn test_mle_identical_values() {
        let data = sample(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        assert_eq!(
            weibull_mle(&data),
            Err(EstimationError::TooFewDistinct { distinct: 1 })
        );
    }

    #[test]
    fn test_mle_iterations_reported() {
        let data = sample(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let fit = weibull_mle(&data).expect("MLE should converge");
        assert!(fit.iterations > 0);
        assert!(fit.iterations <= MAX_ITER);
    }

    #[test]
    fn test_mle_two_points() {
        let fit = weibull_mle(&sample(&[100.0, 300.0])).expect("MLE should converge");
        assert!(fit.params.shape().is_finite() && fit.params.shape() > 0.0);
        assert!(fit.params.scale() > 100.0 && fit.params.scale() < 300.0);
    }
}
