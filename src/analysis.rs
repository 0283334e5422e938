//! End-to-end replacement analysis.
//!
//! Runs the fixed chain sample → MLE fit → cost model → bounded search and
//! collects every value a reporting layer needs into one
//! [`AnalysisReport`].

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::cost::{CostModel, CostStructure};
use crate::density::{self, DensityCurve};
use crate::error::Result;
use crate::optimize::{optimal_interval, ReplacementOptimum};
use crate::sample::LifetimeSample;
use crate::tabulate::{self, CostPoint};
use crate::weibull::{weibull_mle, ReliabilityPoint, WeibullFit, WeibullParams};

/// Summary statistics of the fitted distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitSummary {
    pub shape: f64,
    pub scale: f64,
    pub mode: f64,
    pub mtbf: f64,
    pub b10_life: f64,
    pub log_likelihood: f64,
    pub iterations: usize,
}

/// Cost constants used by the objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub structure: CostStructure,
    pub total_failure_cost: f64,
    pub amortization_cost: f64,
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub observations: usize,
    pub fit: FitSummary,
    pub costs: CostSummary,
    pub optimum: ReplacementOptimum,
    /// Fitted pdf / cdf / reliability / hazard on `[0, curve_horizon]`.
    pub reliability_curve: Vec<ReliabilityPoint>,
    /// Cost per hour across the search domain.
    pub cost_curve: Vec<CostPoint>,
    /// Cost per hour every `table_step` hours.
    pub cost_table: Vec<CostPoint>,
    /// Kernel density of the raw data; absent when disabled or when every
    /// observation is identical.
    pub empirical_density: Option<DensityCurve>,
}

/// Fits `sample` and evaluates the replacement problem described by
/// `config`.
///
/// # Errors
/// Any [`Error`](crate::Error) raised by a stage of the chain.
pub fn analyze(sample: &LifetimeSample, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let fit = weibull_mle(sample)?;
    analyze_fitted(sample, fit, config)
}

/// Like [`analyze`] but takes raw values.
///
/// # Examples
///
/// ```
/// use u_replacement::analysis::analyze_values;
/// use u_replacement::config::AnalysisConfig;
///
/// let hours = [412.0, 655.0, 870.0, 903.0, 1120.0, 760.0, 598.0, 1350.0];
/// let report = analyze_values(&hours, &AnalysisConfig::default()).unwrap();
/// assert!(report.fit.shape > 1.0);
/// assert!(report.optimum.interval_hours >= 100.0);
/// assert_eq!(report.cost_table.len(), 10);
/// ```
pub fn analyze_values(values: &[f64], config: &AnalysisConfig) -> Result<AnalysisReport> {
    let sample = LifetimeSample::from_slice(values)?;
    analyze(&sample, config)
}

/// Evaluates the replacement problem for already-known parameters.
pub fn evaluate_params(
    params: WeibullParams,
    config: &AnalysisConfig,
) -> Result<ReplacementOptimum> {
    let model = CostModel::new(params, config.costs)?;
    Ok(optimal_interval(&model, config.bounds()?, config.search.settings())?)
}

fn analyze_fitted(
    sample: &LifetimeSample,
    fit: WeibullFit,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let params = fit.params;
    let model = CostModel::new(params, config.costs)?;
    let bounds = config.bounds()?;
    let optimum = optimal_interval(&model, bounds, config.search.settings())?;

    let report = &config.report;
    let reliability_curve = tabulate::reliability_curve(
        &params,
        &tabulate::linspace(0.0, report.curve_horizon_hours, report.curve_points),
    );
    let cost_curve = tabulate::cost_curve(
        &model,
        &tabulate::linspace(bounds.lo(), bounds.hi(), report.cost_curve_points),
    )?;
    let cost_table = tabulate::cost_curve(
        &model,
        &tabulate::stepped(
            report.table_step_hours,
            report.table_horizon_hours,
            report.table_step_hours,
        ),
    )?;
    let empirical_density = (report.density_points > 0)
        .then(|| {
            let grid = tabulate::linspace(0.0, sample.max(), report.density_points);
            density::kde(sample, report.density_bandwidth, &grid)
        })
        .flatten();

    Ok(AnalysisReport {
        observations: sample.len(),
        fit: FitSummary {
            shape: params.shape(),
            scale: params.scale(),
            mode: params.mode(),
            mtbf: params.mtbf(),
            b10_life: params.b_life(0.10)?,
            log_likelihood: fit.log_likelihood,
            iterations: fit.iterations,
        },
        costs: CostSummary {
            structure: config.costs,
            total_failure_cost: config.costs.total_failure_cost(),
            amortization_cost: config.costs.amortization_cost(),
        },
        optimum,
        reliability_curve,
        cost_curve,
        cost_table,
        empirical_density,
    })
}
