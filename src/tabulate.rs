//! Data series for reporting and plotting.
//!
//! Pure producers of `(t, value)` records over caller-chosen grids. No
//! rendering happens here.

use serde::Serialize;

use crate::cost::CostModel;
use crate::error::DomainError;
use crate::weibull::{ReliabilityPoint, WeibullParams};

/// `n` evenly spaced points from `start` to `stop` inclusive.
///
/// Returns `[start]` for `n == 1` and an empty vector for `n == 0`.
///
/// ```
/// use u_replacement::tabulate::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// `start, start + step, ...` up to and including `stop` when it falls on
/// the grid.
///
/// Returns an empty vector unless `step > 0` and `start <= stop`.
///
/// ```
/// use u_replacement::tabulate::stepped;
/// assert_eq!(stepped(200.0, 1000.0, 200.0), vec![200.0, 400.0, 600.0, 800.0, 1000.0]);
/// ```
pub fn stepped(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && start <= stop) {
        return Vec::new();
    }
    // Small slack so `stop` survives accumulated rounding.
    let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Evaluates pdf, cdf, reliability and hazard at every grid point.
pub fn reliability_curve(params: &WeibullParams, grid: &[f64]) -> Vec<ReliabilityPoint> {
    grid.iter().map(|&t| params.evaluate(t)).collect()
}

/// One row of a cost table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostPoint {
    /// Replacement interval (hours).
    pub t: f64,
    /// Expected cost per replacement cycle.
    pub expected_cost: f64,
    /// Expected cost per operating hour.
    pub cost_per_hour: f64,
}

/// Evaluates expected cost and cost per hour at every grid point.
///
/// # Errors
/// [`DomainError`] at the first grid point that is not a positive finite
/// time.
pub fn cost_curve(model: &CostModel, grid: &[f64]) -> Result<Vec<CostPoint>, DomainError> {
    grid.iter()
        .map(|&t| {
            Ok(CostPoint {
                t,
                expected_cost: model.expected_cost(t)?,
                cost_per_hour: model.cost_per_hour(t)?,
            })
        })
        .collect()
}
