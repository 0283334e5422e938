//! Validated lifetime samples.

use crate::error::InputError;

/// Minimum number of observations a fit can work with.
pub const MIN_OBSERVATIONS: usize = 2;

/// An immutable multiset of observed hours-to-failure.
///
/// Every value is finite and strictly positive and there are at least
/// [`MIN_OBSERVATIONS`] of them. Order carries no meaning.
///
/// # Examples
///
/// ```
/// use u_replacement::sample::LifetimeSample;
/// let sample = LifetimeSample::new(vec![410.0, 655.0, 902.0]).unwrap();
/// assert_eq!(sample.len(), 3);
/// assert!(LifetimeSample::new(vec![410.0, -1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeSample {
    values: Vec<f64>,
}

impl LifetimeSample {
    /// Validates `values` and wraps them.
    ///
    /// # Errors
    /// - [`InputError::TooFewObservations`] for fewer than 2 values
    /// - [`InputError::NonFinite`] for NaN or infinite values
    /// - [`InputError::NonPositive`] for zero or negative values
    pub fn new(values: Vec<f64>) -> Result<Self, InputError> {
        if values.len() < MIN_OBSERVATIONS {
            return Err(InputError::TooFewObservations {
                count: values.len(),
                required: MIN_OBSERVATIONS,
            });
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(InputError::NonFinite { index, value });
            }
            if value <= 0.0 {
                return Err(InputError::NonPositive { index, value });
            }
        }
        Ok(Self { values })
    }

    /// Copies and validates a slice.
    pub fn from_slice(values: &[f64]) -> Result<Self, InputError> {
        Self::new(values.to_vec())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a valid sample holds at least two values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest observation.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::MIN_POSITIVE, f64::max)
    }

    /// Number of distinct observations (exact comparison).
    pub fn distinct_count(&self) -> usize {
        let mut sorted = self.values.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        sorted.dedup();
        sorted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sample() {
        let sample = LifetimeSample::new(vec![120.0, 80.0, 300.0]).expect("valid sample");
        assert_eq!(sample.len(), 3);
        assert!(!sample.is_empty());
        assert!((sample.max() - 300.0).abs() < 1e-15);
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            LifetimeSample::new(vec![]),
            Err(InputError::TooFewObservations {
                count: 0,
                required: 2
            })
        );
        assert!(matches!(
            LifetimeSample::new(vec![10.0]),
            Err(InputError::TooFewObservations { count: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            LifetimeSample::new(vec![10.0, 0.0]),
            Err(InputError::NonPositive { index: 1, .. })
        ));
        assert!(matches!(
            LifetimeSample::new(vec![-3.0, 10.0]),
            Err(InputError::NonPositive { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            LifetimeSample::new(vec![10.0, f64::NAN]),
            Err(InputError::NonFinite { index: 1, .. })
        ));
        assert!(matches!(
            LifetimeSample::new(vec![f64::INFINITY, 10.0]),
            Err(InputError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn test_distinct_count() {
        let sample = LifetimeSample::new(vec![5.0, 5.0, 7.0, 5.0]).expect("valid sample");
        assert_eq!(sample.distinct_count(), 2);
    }
}
