//! Closed-form Weibull functions.
//!
//! Free functions of `(t, shape, scale)` with location fixed at zero. They
//! assume `shape > 0` and `scale > 0`; use [`WeibullParams`](super::WeibullParams)
//! for validated access.
//!
//! For t < 0 the usual lifetime convention applies: no failure mass lies
//! below zero, so pdf = 0, cdf = 0, reliability = 1, hazard = 0.

/// Probability density f(t).
///
/// ```text
/// f(t) = (k/λ) * (t/λ)^(k-1) * exp(-(t/λ)^k)
/// ```
///
/// At t = 0 the density is `+∞` for k < 1, `1/λ` for k = 1 and `0` for
/// k > 1.
///
/// # Examples
///
/// ```
/// use u_replacement::weibull::pdf;
/// // Exponential special case: f(0) = 1/λ
/// assert!((pdf(0.0, 1.0, 50.0) - 0.02).abs() < 1e-15);
/// assert_eq!(pdf(0.0, 0.5, 50.0), f64::INFINITY);
/// ```
pub fn pdf(t: f64, shape: f64, scale: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t == 0.0 {
        return if shape < 1.0 {
            f64::INFINITY
        } else if shape == 1.0 {
            1.0 / scale
        } else {
            0.0
        };
    }
    let z = t / scale;
    (shape / scale) * z.powf(shape - 1.0) * (-z.powf(shape)).exp()
}

/// Cumulative distribution F(t) = 1 - exp(-(t/λ)^k).
///
/// Evaluated as `-expm1(-(t/λ)^k)`, which keeps full relative precision
/// for small t.
pub fn cdf(t: f64, shape: f64, scale: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    -(-(t / scale).powf(shape)).exp_m1()
}

/// Reliability (survival) R(t) = exp(-(t/λ)^k).
///
/// Computed directly rather than as `1 - cdf`, so it stays accurate
/// (and reaches exact zero only by underflow) for large t.
///
/// # Examples
///
/// ```
/// use u_replacement::weibull::{cdf, reliability};
/// assert_eq!(reliability(0.0, 2.0, 100.0), 1.0);
/// let t = 80.0;
/// assert!((reliability(t, 2.0, 100.0) + cdf(t, 2.0, 100.0) - 1.0).abs() < 1e-12);
/// ```
pub fn reliability(t: f64, shape: f64, scale: f64) -> f64 {
    if t <= 0.0 {
        return 1.0;
    }
    (-(t / scale).powf(shape)).exp()
}

/// Hazard rate h(t) = f(t) / R(t).
///
/// Returns `+∞` once R(t) has underflowed to zero, where the ratio is no
/// longer representable. At t = 0 the limits of the ratio are returned
/// (`+∞`, `1/λ` or `0` depending on the shape).
pub fn hazard(t: f64, shape: f64, scale: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    let r = reliability(t, shape, scale);
    if r == 0.0 {
        return f64::INFINITY;
    }
    pdf(t, shape, scale) / r
}

/// Location of the density peak.
///
/// ```text
/// mode = λ * ((k-1)/k)^(1/k)   for k > 1
///      = 0                     for k <= 1
/// ```
///
/// For k ≤ 1 the density is non-increasing on (0, ∞), so the peak sits
/// at the origin.
///
/// # Examples
///
/// ```
/// use u_replacement::weibull::mode;
/// assert_eq!(mode(1.0, 100.0), 0.0);
/// assert!((mode(2.0, 100.0) - 70.710678).abs() < 1e-5);
/// ```
pub fn mode(shape: f64, scale: f64) -> f64 {
    if shape <= 1.0 {
        return 0.0;
    }
    scale * ((shape - 1.0) / shape).powf(1.0 / shape)
}
