//! # u-replacement
//!
//! Weibull reliability fitting and cost-optimal preventive replacement.
//!
//! Fits a two-parameter Weibull distribution to observed hours-to-failure,
//! derives the reliability functions from the fitted parameters, and finds
//! the replacement interval that minimises expected cost per operating
//! hour.
//!
//! ## Modules
//!
//! - [`sample`] — Validated lifetime samples
//! - [`weibull`] — Weibull functions (pdf, cdf, reliability, hazard, mode) and MLE fitting
//! - [`cost`] — Expected cost and cost per hour of a replacement interval
//! - [`optimize`] — Bounded Brent search for the optimal interval
//! - [`tabulate`] — Grids and `(t, value)` series for reporting
//! - [`density`] — Kernel density estimate of the raw failure times
//! - [`analysis`] — The full chain in one call, with a serialisable report
//! - [`config`] — TOML configuration of costs, search domain and report grids
//! - [`input`] — CSV reading of failure times
//!
//! ## Example
//!
//! ```
//! use u_replacement::cost::{CostModel, CostStructure};
//! use u_replacement::optimize::{optimal_interval, SearchBounds, SearchSettings};
//! use u_replacement::sample::LifetimeSample;
//! use u_replacement::weibull::weibull_mle;
//!
//! let sample = LifetimeSample::new(vec![412.0, 655.0, 870.0, 903.0, 1120.0, 760.0]).unwrap();
//! let fit = weibull_mle(&sample).unwrap();
//! let model = CostModel::new(fit.params, CostStructure::default()).unwrap();
//! let bounds = SearchBounds::new(100.0, 1800.0).unwrap();
//! let best = optimal_interval(&model, bounds, SearchSettings::default()).unwrap();
//! assert!(best.cost_per_hour > 0.0);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Pure core**: the numerical modules never print or log
//! - **Explicit configuration**: cost figures and parameters are values, not globals
//! - **Errors by stage**: input, estimation, domain and optimisation failures are distinct types

pub mod analysis;
pub mod config;
pub mod cost;
pub mod density;
pub mod error;
pub mod input;
pub mod optimize;
pub mod sample;
pub mod tabulate;
pub mod weibull;

pub use error::{DomainError, Error, EstimationError, InputError, OptimizationError, Result};
