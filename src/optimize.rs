//! Bounded univariate minimisation of the cost-per-hour objective.
//!
//! Brent's method on a closed interval: golden-section steps combined with
//! successive parabolic interpolation, stopping when the bracket around the
//! best point is narrower than an absolute tolerance. The objective is
//! never evaluated exactly at the bounds.
//!
//! The search is fully deterministic: identical objective, bounds and
//! settings give bit-identical results.
//!
//! # Reference
//! Brent, R.P. (1973), *Algorithms for Minimization without Derivatives*,
//! Prentice-Hall, Chapter 5.

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::OptimizationError;

/// Default absolute tolerance on the minimiser (hours).
pub const DEFAULT_XATOL: f64 = 1e-5;

/// Default objective evaluation budget.
pub const DEFAULT_MAX_EVALUATIONS: usize = 500;

/// Closed search interval `[lo, hi]` with `0 < lo < hi < ∞`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchBounds {
    lo: f64,
    hi: f64,
}

impl SearchBounds {
    /// # Errors
    /// [`OptimizationError::InvalidBounds`] unless `0 < lo < hi` and both
    /// are finite.
    ///
    /// ```
    /// use u_replacement::optimize::SearchBounds;
    /// assert!(SearchBounds::new(100.0, 1800.0).is_ok());
    /// assert!(SearchBounds::new(500.0, 100.0).is_err());
    /// assert!(SearchBounds::new(0.0, 100.0).is_err());
    /// ```
    pub fn new(lo: f64, hi: f64) -> Result<Self, OptimizationError> {
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(OptimizationError::InvalidBounds { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }
}

/// Tolerance and budget of the bounded search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Absolute tolerance on the minimiser.
    pub xatol: f64,
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            xatol: DEFAULT_XATOL,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

impl SearchSettings {
    /// # Errors
    /// [`OptimizationError::InvalidSettings`] for a non-positive tolerance
    /// or a budget below 2 evaluations.
    pub fn validate(&self) -> Result<(), OptimizationError> {
        if !(self.xatol.is_finite() && self.xatol > 0.0) {
            return Err(OptimizationError::InvalidSettings(format!(
                "xatol must be positive and finite, got {}",
                self.xatol
            )));
        }
        if self.max_evaluations < 2 {
            return Err(OptimizationError::InvalidSettings(format!(
                "max_evaluations must be at least 2, got {}",
                self.max_evaluations
            )));
        }
        Ok(())
    }
}

/// Located minimum of a univariate objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Minimum {
    /// Minimiser.
    pub x: f64,
    /// Objective value at `x`.
    pub fx: f64,
    /// Number of bracket-reduction steps.
    pub iterations: usize,
    /// Number of objective evaluations.
    pub evaluations: usize,
}

/// Minimises `f` over `bounds` with Brent's bounded method.
///
/// # Errors
/// - [`OptimizationError::InvalidSettings`] if `settings` fail validation
/// - [`OptimizationError::NonFiniteObjective`] if `f` returns NaN or ±∞
/// - [`OptimizationError::NotConverged`] if the evaluation budget runs out
///
/// # Examples
///
/// ```
/// use u_replacement::optimize::{minimize_bounded, SearchBounds, SearchSettings};
/// let bounds = SearchBounds::new(1.0, 10.0).unwrap();
/// let min = minimize_bounded(|x| (x - 3.0).powi(2), bounds, SearchSettings::default()).unwrap();
/// assert!((min.x - 3.0).abs() < 1e-5);
/// ```
pub fn minimize_bounded<F>(
    mut f: F,
    bounds: SearchBounds,
    settings: SearchSettings,
) -> Result<Minimum, OptimizationError>
where
    F: FnMut(f64) -> f64,
{
    settings.validate()?;

    let mut eval = |x: f64| -> Result<f64, OptimizationError> {
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(OptimizationError::NonFiniteObjective { t: x })
        }
    };

    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());
    let sqrt_eps = f64::EPSILON.sqrt();
    let xatol = settings.xatol;

    let (mut a, mut b) = (bounds.lo, bounds.hi);

    // xf: best point, nfc: second best, fulc: previous second best
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut fx = eval(xf)?;
    let mut ffulc = fx;
    let mut fnfc = fx;
    let mut evaluations = 1;
    let mut iterations = 0;

    let mut rat = 0.0_f64;
    let mut e = 0.0_f64;
    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
    let mut tol2 = 2.0 * tol1;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        if evaluations >= settings.max_evaluations {
            return Err(OptimizationError::NotConverged { iterations });
        }
        iterations += 1;

        let mut golden = true;
        if e.abs() > tol1 {
            // Fit a parabola through the three best points.
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                golden = false;
                rat = p / q;
                let x = xf + rat;
                // Keep the trial point away from the bracket ends.
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = if xm >= xf { tol1 } else { -tol1 };
                }
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let step = if rat < 0.0 { -1.0 } else { 1.0 };
        let x = xf + step * rat.abs().max(tol1);
        let fu = eval(x)?;
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
        tol2 = 2.0 * tol1;
    }

    Ok(Minimum {
        x: xf,
        fx,
        iterations,
        evaluations,
    })
}

/// Cost-optimal preventive replacement interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplacementOptimum {
    /// Optimal replacement interval t* (hours).
    pub interval_hours: f64,
    /// Expected cost per hour at t*.
    pub cost_per_hour: f64,
    /// Expected cost per replacement cycle at t*.
    pub expected_cost: f64,
    /// `true` when t* converged onto a search bound, meaning the objective
    /// still decreases towards that bound.
    pub on_boundary: bool,
    pub iterations: usize,
    pub evaluations: usize,
}

/// Finds the replacement interval minimising `model.cost_per_hour` on
/// `bounds`.
///
/// # Errors
/// See [`minimize_bounded`].
///
/// # Examples
///
/// ```
/// use u_replacement::cost::{CostModel, CostStructure};
/// use u_replacement::optimize::{optimal_interval, SearchBounds, SearchSettings};
/// use u_replacement::weibull::WeibullParams;
///
/// let params = WeibullParams::new(2.0, 900.0).unwrap();
/// let model = CostModel::new(params, CostStructure::default()).unwrap();
/// let bounds = SearchBounds::new(100.0, 1800.0).unwrap();
/// let best = optimal_interval(&model, bounds, SearchSettings::default()).unwrap();
/// assert!(best.interval_hours > 100.0 && best.interval_hours < 1800.0);
/// ```
pub fn optimal_interval(
    model: &CostModel,
    bounds: SearchBounds,
    settings: SearchSettings,
) -> Result<ReplacementOptimum, OptimizationError> {
    // Bounds are strictly positive, so cost_per_hour only fails on NaN,
    // which the search reports as a non-finite objective.
    let min = minimize_bounded(
        |t| model.cost_per_hour(t).unwrap_or(f64::NAN),
        bounds,
        settings,
    )?;

    let expected_cost = model
        .expected_cost(min.x)
        .map_err(|_| OptimizationError::NonFiniteObjective { t: min.x })?;
    // Twice the final bracket half-width.
    let edge = 4.0 * (f64::EPSILON.sqrt() * min.x.abs() + settings.xatol / 3.0);

    Ok(ReplacementOptimum {
        interval_hours: min.x,
        cost_per_hour: min.fx,
        expected_cost,
        on_boundary: min.x - bounds.lo <= edge || bounds.hi - min.x <= edge,
        iterations: min.iterations,
        evaluations: min.evaluations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostStructure;
    use crate::weibull::WeibullParams;

    fn bounds(lo: f64, hi: f64) -> SearchBounds {
        SearchBounds::new(lo, hi).expect("valid bounds")
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(
            SearchBounds::new(500.0, 100.0),
            Err(OptimizationError::InvalidBounds { lo: 500.0, hi: 100.0 })
        );
        assert!(SearchBounds::new(100.0, 100.0).is_err());
        assert!(SearchBounds::new(-1.0, 100.0).is_err());
        assert!(SearchBounds::new(1.0, f64::INFINITY).is_err());
        assert!(SearchBounds::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        let bad_tol = SearchSettings {
            xatol: 0.0,
            ..SearchSettings::default()
        };
        assert!(matches!(
            minimize_bounded(|x| x, bounds(1.0, 2.0), bad_tol),
            Err(OptimizationError::InvalidSettings(_))
        ));
        let bad_budget = SearchSettings {
            max_evaluations: 1,
            ..SearchSettings::default()
        };
        assert!(bad_budget.validate().is_err());
    }

    #[test]
    fn test_quadratic_minimum() {
        let min = minimize_bounded(
            |x| (x - 3.0).powi(2),
            bounds(0.5, 10.0),
            SearchSettings::default(),
        )
        .expect("should converge");
        assert!((min.x - 3.0).abs() < 1e-5, "x = {}", min.x);
        assert!(min.fx < 1e-9);
        assert!(min.evaluations <= 20);
    }

    #[test]
    fn test_cosine_minimum() {
        let min = minimize_bounded(f64::cos, bounds(0.1, 6.0), SearchSettings::default())
            .expect("should converge");
        assert!((min.x - std::f64::consts::PI).abs() < 1e-4);
        assert!((min.fx + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_objective_approaches_bound() {
        let min = minimize_bounded(|x| 1.0 / x, bounds(1.0, 5.0), SearchSettings::default())
            .expect("should converge");
        assert!(min.x < 5.0);
        assert!(5.0 - min.x < 1e-4, "x = {}", min.x);
    }

    #[test]
    fn test_non_finite_objective() {
        let result = minimize_bounded(|_| f64::NAN, bounds(1.0, 5.0), SearchSettings::default());
        assert!(matches!(
            result,
            Err(OptimizationError::NonFiniteObjective { .. })
        ));
    }

    #[test]
    fn test_budget_exhausted() {
        let settings = SearchSettings {
            xatol: 1e-12,
            max_evaluations: 3,
        };
        assert!(matches!(
            minimize_bounded(f64::cos, bounds(0.1, 6.0), settings),
            Err(OptimizationError::NotConverged { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let run = || {
            minimize_bounded(
                |x| (x - 2.0).powi(4) + x.sin(),
                bounds(0.5, 7.0),
                SearchSettings::default(),
            )
            .expect("should converge")
        };
        let (a, b) = (run(), run());
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.fx.to_bits(), b.fx.to_bits());
        assert_eq!(a.evaluations, b.evaluations);
    }

    #[test]
    fn test_interior_replacement_optimum() {
        // Steep wear-out with an expensive failure: clear interior minimum
        // near 364 h.
        let params = WeibullParams::new(4.0, 900.0).expect("valid parameters");
        let costs = CostStructure {
            unplanned_repair: 15300.0,
            ..CostStructure::default()
        };
        assert_eq!(costs.total_failure_cost(), 20000.0);
        let model = CostModel::new(params, costs).expect("valid costs");
        let best = optimal_interval(&model, bounds(100.0, 1800.0), SearchSettings::default())
            .expect("should converge");

        assert!(!best.on_boundary);
        assert!(
            (best.interval_hours - 364.27).abs() < 0.5,
            "t* = {}",
            best.interval_hours
        );
        for i in 0..=1700 {
            let t = 100.0 + i as f64;
            let cph = model.cost_per_hour(t).expect("valid t");
            assert!(
                best.cost_per_hour <= cph + 1e-9,
                "cph({t}) = {cph} < {}",
                best.cost_per_hour
            );
        }
        let expected = model.expected_cost(best.interval_hours).expect("valid t");
        assert_eq!(best.expected_cost, expected);
    }

    #[test]
    fn test_reference_optimum_runs_to_upper_bound() {
        let params = WeibullParams::new(2.0, 900.0).expect("valid parameters");
        let model = CostModel::new(params, CostStructure::default()).expect("valid costs");
        let best = optimal_interval(&model, bounds(100.0, 1800.0), SearchSettings::default())
            .expect("should converge");
        assert!(best.on_boundary);
        assert!(best.interval_hours < 1800.0);
        assert!(1800.0 - best.interval_hours < 1e-3);
    }
}
