//! Empirical failure density.
//!
//! Gaussian kernel density estimate of the raw failure times, for
//! comparison against the fitted Weibull density.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::sample::LifetimeSample;

/// Bandwidth selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandwidthMethod {
    /// Scott's factor applied to the sample standard deviation:
    /// h = σ * n^(-1/5).
    ///
    /// Reference: Scott (1992), "Multivariate Density Estimation"
    Scott,
    /// Silverman's rule of thumb: h = 0.9 * min(σ, IQR/1.34) * n^(-1/5).
    ///
    /// Reference: Silverman (1986), "Density Estimation for Statistics and
    /// Data Analysis"
    Silverman,
    /// Fixed bandwidth.
    Manual(f64),
}

/// KDE evaluated on a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    /// Evaluation points (hours).
    pub t: Vec<f64>,
    /// Estimated density at each point.
    pub density: Vec<f64>,
    /// Bandwidth used.
    pub bandwidth: f64,
}

/// Computes the bandwidth for `sample` under `method`.
///
/// Returns `None` for zero spread (every observation equal) or an
/// invalid manual bandwidth.
pub fn bandwidth(sample: &LifetimeSample, method: BandwidthMethod) -> Option<f64> {
    let data = sample.values();
    let n_factor = (data.len() as f64).powf(-0.2);

    let h = match method {
        BandwidthMethod::Scott => data.std_dev() * n_factor,
        BandwidthMethod::Silverman => {
            let sd = data.std_dev();
            let iqr = Data::new(data.to_vec()).interquartile_range();
            let spread = if iqr > 1e-300 { sd.min(iqr / 1.34) } else { sd };
            0.9 * spread * n_factor
        }
        BandwidthMethod::Manual(h) => h,
    };

    (h.is_finite() && h > 1e-300).then_some(h)
}

/// Gaussian kernel density estimate of `sample` at each point of `grid`.
///
/// ```text
/// f̂(t) = (1/nh) Σᵢ φ((t - tᵢ)/h)
/// ```
///
/// # Examples
///
/// ```
/// use u_replacement::density::{kde, BandwidthMethod};
/// use u_replacement::sample::LifetimeSample;
/// use u_replacement::tabulate::linspace;
///
/// let sample = LifetimeSample::new(vec![400.0, 520.0, 610.0, 700.0, 880.0]).unwrap();
/// let grid = linspace(0.0, 2000.0, 2001);
/// let curve = kde(&sample, BandwidthMethod::Scott, &grid).unwrap();
/// let integral: f64 = curve.density.iter().sum::<f64>() * 1.0;
/// assert!((integral - 1.0).abs() < 0.01);
/// ```
pub fn kde(sample: &LifetimeSample, method: BandwidthMethod, grid: &[f64]) -> Option<DensityCurve> {
    let h = bandwidth(sample, method)?;
    let data = sample.values();

    let inv_h = 1.0 / h;
    let inv_nh = inv_h / data.len() as f64;
    let inv_sqrt_2pi = 1.0 / (2.0 * std::f64::consts::PI).sqrt();

    let density = grid
        .iter()
        .map(|&t| {
            let sum: f64 = data
                .iter()
                .map(|&ti| {
                    let u = (t - ti) * inv_h;
                    inv_sqrt_2pi * (-0.5 * u * u).exp()
                })
                .sum();
            sum * inv_nh
        })
        .collect();

    Some(DensityCurve {
        t: grid.to_vec(),
        density,
        bandwidth: h,
    })
}
