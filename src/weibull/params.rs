//! Validated Weibull parameters and the functions derived from them.

use serde::Serialize;
use statrs::function::gamma::ln_gamma;

use super::functions;
use crate::error::DomainError;

/// Fitted two-parameter Weibull distribution (location fixed at zero).
///
/// # Mathematical Background
///
/// Given shape k > 0 and scale λ > 0:
/// - Reliability: R(t) = exp(-(t/λ)^k)
/// - Hazard rate: h(t) = (k/λ) * (t/λ)^(k-1)
/// - MTBF: λ * Γ(1 + 1/k)
///
/// # Examples
///
/// ```
/// use u_replacement::weibull::WeibullParams;
/// let params = WeibullParams::new(2.0, 900.0).unwrap();
/// let point = params.evaluate(450.0);
/// assert!((point.reliability + point.cdf - 1.0).abs() < 1e-12);
/// assert!(params.hazard(600.0) > params.hazard(300.0));
/// ```
///
/// # Reference
/// Meeker & Escobar (1998), *Statistical Methods for Reliability Data*, Wiley.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeibullParams {
    shape: f64,
    scale: f64,
}

/// The four distribution functions evaluated at one time point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReliabilityPoint {
    /// Time (hours).
    pub t: f64,
    /// Failure density f(t).
    pub pdf: f64,
    /// Cumulative failure probability F(t).
    pub cdf: f64,
    /// Survival probability R(t).
    pub reliability: f64,
    /// Hazard rate h(t).
    pub hazard: f64,
}

impl WeibullParams {
    /// Creates parameters from shape k and scale λ.
    ///
    /// # Errors
    /// [`DomainError::InvalidParameter`] if either value is non-positive or
    /// non-finite.
    ///
    /// ```
    /// use u_replacement::weibull::WeibullParams;
    /// assert!(WeibullParams::new(2.0, 100.0).is_ok());
    /// assert!(WeibullParams::new(-1.0, 100.0).is_err());
    /// assert!(WeibullParams::new(2.0, 0.0).is_err());
    /// ```
    pub fn new(shape: f64, scale: f64) -> Result<Self, DomainError> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(DomainError::InvalidParameter {
                name: "shape",
                value: shape,
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DomainError::InvalidParameter {
                name: "scale",
                value: scale,
            });
        }
        Ok(Self { shape, scale })
    }

    /// Shape parameter k.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter λ (hours).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pdf(&self, t: f64) -> f64 {
        functions::pdf(t, self.shape, self.scale)
    }

    pub fn cdf(&self, t: f64) -> f64 {
        functions::cdf(t, self.shape, self.scale)
    }

    pub fn reliability(&self, t: f64) -> f64 {
        functions::reliability(t, self.shape, self.scale)
    }

    /// Hazard rate; `+∞` where R(t) underflows.
    pub fn hazard(&self, t: f64) -> f64 {
        functions::hazard(t, self.shape, self.scale)
    }

    /// Time of peak failure density.
    pub fn mode(&self) -> f64 {
        functions::mode(self.shape, self.scale)
    }

    /// Evaluates pdf, cdf, reliability and hazard at `t`.
    pub fn evaluate(&self, t: f64) -> ReliabilityPoint {
        ReliabilityPoint {
            t,
            pdf: self.pdf(t),
            cdf: self.cdf(t),
            reliability: self.reliability(t),
            hazard: self.hazard(t),
        }
    }

    /// Mean time between failures, λ * Γ(1 + 1/k).
    ///
    /// ```
    /// use u_replacement::weibull::WeibullParams;
    /// // k = 1 is exponential: MTBF = λ
    /// let params = WeibullParams::new(1.0, 50.0).unwrap();
    /// assert!((params.mtbf() - 50.0).abs() < 1e-8);
    /// ```
    pub fn mtbf(&self) -> f64 {
        self.scale * ln_gamma(1.0 + 1.0 / self.shape).exp()
    }

    /// Time at which reliability drops to `p`, λ * (-ln p)^(1/k).
    ///
    /// # Errors
    /// [`DomainError::InvalidProbability`] unless `0 < p < 1`.
    pub fn time_to_reliability(&self, p: f64) -> Result<f64, DomainError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(DomainError::InvalidProbability { p });
        }
        Ok(self.scale * (-p.ln()).powf(1.0 / self.shape))
    }

    /// B-life: time by which `fraction_failed` of the population has failed.
    ///
    /// B10 = `b_life(0.10)` = `time_to_reliability(0.90)`.
    ///
    /// # Reference
    /// Abernethy (2006), *The New Weibull Handbook*, 5th ed., Chapter 2.
    pub fn b_life(&self, fraction_failed: f64) -> Result<f64, DomainError> {
        if !(fraction_failed > 0.0 && fraction_failed < 1.0) {
            return Err(DomainError::InvalidProbability { p: fraction_failed });
        }
        self.time_to_reliability(1.0 - fraction_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invalid() {
        assert!(WeibullParams::new(0.0, 50.0).is_err());
        assert!(WeibullParams::new(-1.0, 50.0).is_err());
        assert!(WeibullParams::new(2.0, -1.0).is_err());
        assert!(WeibullParams::new(f64::NAN, 50.0).is_err());
        assert_eq!(
            WeibullParams::new(2.0, f64::INFINITY),
            Err(DomainError::InvalidParameter {
                name: "scale",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_accessors() {
        let params = WeibullParams::new(2.5, 100.0).expect("valid parameters");
        assert!((params.shape() - 2.5).abs() < 1e-15);
        assert!((params.scale() - 100.0).abs() < 1e-15);
    }

    #[test]
    fn test_evaluate_matches_methods() {
        let params = WeibullParams::new(2.0, 900.0).expect("valid parameters");
        for t in [0.0, 100.0, 864.0, 1500.0] {
            let point = params.evaluate(t);
            assert_eq!(point.t, t);
            assert_eq!(point.pdf, params.pdf(t));
            assert_eq!(point.cdf, params.cdf(t));
            assert_eq!(point.reliability, params.reliability(t));
            assert_eq!(point.hazard, params.hazard(t));
        }
    }

    #[test]
    fn test_mode_reference_value() {
        let params = WeibullParams::new(2.0, 100.0).expect("valid parameters");
        assert!((params.mode() - 70.71).abs() < 0.01);
    }

    #[test]
    fn test_mtbf_rayleigh() {
        // k=2, λ=1 => MTBF = Γ(1.5) = sqrt(pi)/2
        let params = WeibullParams::new(2.0, 1.0).expect("valid parameters");
        let expected = std::f64::consts::PI.sqrt() / 2.0;
        assert!(
            (params.mtbf() - expected).abs() < 1e-10,
            "MTBF = {}, expected {}",
            params.mtbf(),
            expected
        );
    }

    #[test]
    fn test_time_to_reliability_roundtrip() {
        let params = WeibullParams::new(2.5, 100.0).expect("valid parameters");
        for p in [0.1, 0.5, 0.9] {
            let t = params.time_to_reliability(p).expect("valid p");
            assert!((params.reliability(t) - p).abs() < 1e-10);
        }
    }

    #[test]
    fn test_probability_bounds() {
        let params = WeibullParams::new(2.0, 50.0).expect("valid parameters");
        assert!(params.time_to_reliability(0.0).is_err());
        assert!(params.time_to_reliability(1.0).is_err());
        assert!(params.time_to_reliability(f64::NAN).is_err());
        assert!(params.b_life(1.5).is_err());
    }

    #[test]
    fn test_b_life_ordering() {
        let params = WeibullParams::new(2.0, 50.0).expect("valid parameters");
        let b5 = params.b_life(0.05).expect("valid");
        let b10 = params.b_life(0.10).expect("valid");
        let b50 = params.b_life(0.50).expect("valid");
        assert!(b5 < b10 && b10 < b50);
        let r90 = params.time_to_reliability(0.90).expect("valid");
        assert!((b10 - r90).abs() < 1e-12);
    }
}
