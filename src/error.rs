//! Error taxonomy for the numerical core.
//!
//! Each stage of the pipeline has its own error type so callers can match
//! on exactly the failure a stage can produce. [`Error`] wraps all of them
//! for code that runs the whole chain.

use thiserror::Error;

/// Invalid input data or configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The sample has fewer observations than a fit needs.
    #[error("sample has {count} observation(s), at least {required} required")]
    TooFewObservations { count: usize, required: usize },

    /// An observation is zero or negative.
    #[error("observation #{index} is not positive: {value}")]
    NonPositive { index: usize, value: f64 },

    /// An observation is NaN or infinite.
    #[error("observation #{index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    /// A cost figure is outside its allowed range.
    #[error("cost `{name}` is invalid: {value} ({reason})")]
    InvalidCost {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Failure of the maximum likelihood fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// All observations (but at most one) are identical.
    #[error("sample has {distinct} distinct value(s), at least 2 required")]
    TooFewDistinct { distinct: usize },

    /// The shape equation was not solved within the iteration budget.
    #[error(
        "shape equation did not converge after {iterations} iterations (last step {last_step:e})"
    )]
    NotConverged { iterations: usize, last_step: f64 },

    /// The solver reached a state it cannot continue from.
    #[error("degenerate likelihood: {0}")]
    Degenerate(String),
}

/// A function was evaluated outside its valid domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Time argument must be strictly positive.
    #[error("time must be positive, got {t}")]
    NonPositiveTime { t: f64 },

    /// Time argument is NaN or infinite.
    #[error("time must be finite, got {t}")]
    NonFiniteTime { t: f64 },

    /// A distribution parameter is non-positive or non-finite.
    #[error("parameter `{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A probability argument lies outside the open unit interval.
    #[error("probability must lie in (0, 1), got {p}")]
    InvalidProbability { p: f64 },
}

/// Failure of the bounded interval search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizationError {
    /// Bounds do not describe `0 < lo < hi < ∞`.
    #[error("invalid search bounds [{lo}, {hi}]: require 0 < lo < hi")]
    InvalidBounds { lo: f64, hi: f64 },

    /// Tolerance or iteration budget is unusable.
    #[error("invalid search settings: {0}")]
    InvalidSettings(String),

    /// The objective returned NaN or infinity.
    #[error("objective is not finite at t = {t}")]
    NonFiniteObjective { t: f64 },

    /// The iteration budget ran out before the bracket shrank to tolerance.
    #[error("bounded search did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

/// Any failure of the analysis chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Estimation(#[from] EstimationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Optimization(#[from] OptimizationError),
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_values() {
        let err = InputError::NonPositive {
            index: 3,
            value: -2.5,
        };
        assert_eq!(err.to_string(), "observation #3 is not positive: -2.5");

        let err = OptimizationError::InvalidBounds { lo: 500.0, hi: 100.0 };
        assert!(err.to_string().contains("[500, 100]"));
    }

    #[test]
    fn test_wrapping_is_transparent() {
        let inner = DomainError::NonPositiveTime { t: 0.0 };
        let outer: Error = inner.clone().into();
        assert_eq!(outer.to_string(), inner.to_string());
        assert!(matches!(outer, Error::Domain(_)));
    }
}
