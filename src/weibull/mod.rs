//! Weibull parameter estimation and reliability functions.
//!
//! Provides the closed-form two-parameter Weibull functions (location
//! fixed at zero) and maximum likelihood fitting to failure data.
//!
//! # Modules
//!
//! - [`pdf`], [`cdf`], [`reliability`], [`hazard`], [`mode`] — free functions of `(t, k, λ)`
//! - [`WeibullParams`] — validated (k, λ) with MTBF and B-life
//! - [`weibull_mle`] — bracketed Newton-Raphson MLE for shape and scale
//!
//! # References
//!
//! - Abernethy, R.B. (2006). *The New Weibull Handbook*, 5th ed.
//! - Lawless, J.F. (2003). *Statistical Models and Methods for Lifetime Data*, 2nd ed.

mod functions;
mod mle;
mod params;

pub use functions::{cdf, hazard, mode, pdf, reliability};
pub use mle::{log_likelihood, weibull_mle, WeibullFit};
pub use params::{ReliabilityPoint, WeibullParams};
