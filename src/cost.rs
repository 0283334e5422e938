//! Expected replacement cost as a function of the replacement interval.
//!
//! Combines a fitted Weibull distribution with a [`CostStructure`] into a
//! [`CostModel`] whose `cost_per_hour` is the objective minimised by
//! [`optimize`](crate::optimize).
//!
//! # Cost terms
//!
//! For a planned replacement at age t, with R = reliability and F = cdf:
//!
//! ```text
//! E[C](t) = C_p * R(t)                 planned replacement, unit survived
//!         + C_f * (1 - R(t))           unplanned failure before t
//!         + C_a * R(t) * (1 - F(t))    residual life discarded at t
//! ```
//!
//! The residual-life term is a heuristic weighting, not an expectation
//! over a horizon, and is evaluated exactly as written.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, InputError};
use crate::weibull::WeibullParams;

/// Cost figures of one piece of equipment, in currency units.
///
/// `Default` holds the reference pump figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostStructure {
    /// Cost of a planned (preventive) replacement, C_p.
    pub planned_replacement: f64,
    /// Direct repair cost of an unplanned failure.
    pub unplanned_repair: f64,
    /// Hours of downtime caused by one failure.
    pub downtime_hours: f64,
    /// Cost per hour of downtime.
    pub downtime_cost_per_hour: f64,
    /// Production lost per hour of downtime.
    pub production_loss_per_hour: f64,
    /// Fixed penalty / risk cost per failure.
    pub penalty: f64,
}

impl Default for CostStructure {
    fn default() -> Self {
        Self {
            planned_replacement: 700.0,
            unplanned_repair: 1000.0,
            downtime_hours: 8.0,
            downtime_cost_per_hour: 400.0,
            production_loss_per_hour: 150.0,
            penalty: 300.0,
        }
    }
}

impl CostStructure {
    /// Checks every figure is finite and non-negative, and that the
    /// planned-replacement and repair costs are strictly positive.
    ///
    /// # Errors
    /// [`InputError::InvalidCost`] naming the first offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("planned_replacement", self.planned_replacement, true),
            ("unplanned_repair", self.unplanned_repair, true),
            ("downtime_hours", self.downtime_hours, false),
            ("downtime_cost_per_hour", self.downtime_cost_per_hour, false),
            ("production_loss_per_hour", self.production_loss_per_hour, false),
            ("penalty", self.penalty, false),
        ];
        for (name, value, strictly_positive) in fields {
            if !value.is_finite() {
                return Err(InputError::InvalidCost {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(InputError::InvalidCost {
                    name,
                    value,
                    reason: "must not be negative",
                });
            }
            if strictly_positive && value == 0.0 {
                return Err(InputError::InvalidCost {
                    name,
                    value,
                    reason: "must be positive",
                });
            }
        }
        Ok(())
    }

    /// Total cost of one unplanned failure:
    /// repair + downtime_hours * (downtime cost + production loss) + penalty.
    ///
    /// ```
    /// use u_replacement::cost::CostStructure;
    /// assert_eq!(CostStructure::default().total_failure_cost(), 5700.0);
    /// ```
    pub fn total_failure_cost(&self) -> f64 {
        self.unplanned_repair
            + self.downtime_hours * (self.downtime_cost_per_hour + self.production_loss_per_hour)
            + self.penalty
    }

    /// Value of unused life discarded by an early replacement. Taken equal
    /// to the planned-replacement cost.
    pub fn amortization_cost(&self) -> f64 {
        self.planned_replacement
    }
}

/// The three expected-cost terms at one replacement interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub t: f64,
    pub planned: f64,
    pub failure: f64,
    pub lost_resource: f64,
    pub total: f64,
}

/// Expected cost of replacing at age `t` under fitted parameters.
///
/// # Examples
///
/// ```
/// use u_replacement::cost::{CostModel, CostStructure};
/// use u_replacement::weibull::WeibullParams;
///
/// let params = WeibullParams::new(2.0, 900.0).unwrap();
/// let model = CostModel::new(params, CostStructure::default()).unwrap();
/// let cph = model.cost_per_hour(600.0).unwrap();
/// assert!(cph > 0.0 && cph.is_finite());
/// assert!(model.cost_per_hour(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    params: WeibullParams,
    costs: CostStructure,
    failure_cost: f64,
    amortization_cost: f64,
}

impl CostModel {
    /// # Errors
    /// [`InputError::InvalidCost`] if `costs` fails validation.
    pub fn new(params: WeibullParams, costs: CostStructure) -> Result<Self, InputError> {
        costs.validate()?;
        Ok(Self {
            params,
            costs,
            failure_cost: costs.total_failure_cost(),
            amortization_cost: costs.amortization_cost(),
        })
    }

    pub fn params(&self) -> &WeibullParams {
        &self.params
    }

    pub fn costs(&self) -> &CostStructure {
        &self.costs
    }

    /// Per-term expected cost at `t`.
    ///
    /// # Errors
    /// [`DomainError`] if `t` is negative or non-finite.
    pub fn breakdown(&self, t: f64) -> Result<CostBreakdown, DomainError> {
        if !t.is_finite() {
            return Err(DomainError::NonFiniteTime { t });
        }
        if t < 0.0 {
            return Err(DomainError::NonPositiveTime { t });
        }
        let r = self.params.reliability(t);
        let f = self.params.cdf(t);

        let planned = self.costs.planned_replacement * r;
        let failure = self.failure_cost * (1.0 - r);
        let lost_resource = self.amortization_cost * r * (1.0 - f);

        Ok(CostBreakdown {
            t,
            planned,
            failure,
            lost_resource,
            total: planned + failure + lost_resource,
        })
    }

    /// Expected cost E[C](t) of a replacement policy with interval `t`.
    ///
    /// # Errors
    /// [`DomainError`] if `t` is negative or non-finite.
    pub fn expected_cost(&self, t: f64) -> Result<f64, DomainError> {
        self.breakdown(t).map(|b| b.total)
    }

    /// Expected cost per operating hour, E[C](t) / t.
    ///
    /// # Errors
    /// [`DomainError`] if `t <= 0` or non-finite.
    pub fn cost_per_hour(&self, t: f64) -> Result<f64, DomainError> {
        if t.is_finite() && t <= 0.0 {
            return Err(DomainError::NonPositiveTime { t });
        }
        Ok(self.expected_cost(t)? / t)
    }
}
