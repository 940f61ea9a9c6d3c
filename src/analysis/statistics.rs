//! Summary statistics and evaluation domains for sample data
//!
//! The readings are a flat numeric list; everything downstream needs only
//! their mean, population standard deviation, and range. Helpers are generic
//! over the float type, with an `f64` summary struct for the pipeline.

use crate::io::error::{EstimationError, Result};
use ndarray::Array1;
use num_traits::{Float, FromPrimitive};

/// Arithmetic mean of `values`, or `None` for an empty slice
pub fn mean<F: Float + FromPrimitive>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let count = F::from_usize(values.len())?;
    let sum = values.iter().fold(F::zero(), |acc, &v| acc + v);
    Some(sum / count)
}

/// Population standard deviation (divisor `n`), or `None` for an empty slice
///
/// The population form matches the closed-form maximum-likelihood estimate
/// of a normal distribution's σ.
pub fn population_std_dev<F: Float + FromPrimitive>(values: &[F]) -> Option<F> {
    let mu = mean(values)?;
    let count = F::from_usize(values.len())?;
    let sum_sq = values.iter().fold(F::zero(), |acc, &v| {
        let delta = v - mu;
        acc + delta * delta
    });
    Some((sum_sq / count).sqrt())
}

/// Minimum and maximum of `values`, or `None` for an empty slice
pub fn sample_bounds<F: Float>(values: &[F]) -> Option<(F, F)> {
    let first = values.first()?;
    let bounds = values
        .iter()
        .fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some(bounds)
}

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Evenly spaced evaluation grid of `points` values over `[lo, hi]`
pub fn density_domain(lo: f64, hi: f64, points: usize) -> Array1<f64> {
    Array1::linspace(lo, hi, points)
}

/// Moments and range of a set of readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Arithmetic mean of the samples
    pub mean: f64,
    /// Population standard deviation of the samples
    pub std_dev: f64,
    /// Smallest sample value
    pub min: f64,
    /// Largest sample value
    pub max: f64,
}

impl SampleSummary {
    /// Summarize a slice of readings
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two samples are given, if any sample is
    /// non-finite, or if all samples are identical (a zero-width fit cannot
    /// be drawn or searched).
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(EstimationError::InvalidSamples {
                reason: format!("at least two samples are required, got {}", samples.len()),
            });
        }
        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(EstimationError::InvalidSamples {
                reason: format!("samples must be finite numbers, got {bad}"),
            });
        }

        let mu = mean(samples).unwrap_or(f64::NAN);
        let sigma = population_std_dev(samples).unwrap_or(f64::NAN);
        let (min, max) = sample_bounds(samples).unwrap_or((f64::NAN, f64::NAN));

        if sigma <= 0.0 || !sigma.is_finite() {
            return Err(EstimationError::InvalidSamples {
                reason: "samples are all identical; the standard deviation must be positive"
                    .to_string(),
            });
        }

        Ok(Self {
            mean: mu,
            std_dev: sigma,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SampleSummary, density_domain, mean, population_std_dev, round_to, sample_bounds};
    use crate::io::configuration::DEFAULT_SAMPLES;

    #[test]
    fn test_mean_of_default_samples() {
        let mu = mean(&DEFAULT_SAMPLES).unwrap();
        assert!((mu - 168.428_571_428_571_43).abs() < 1e-12);
    }

    #[test]
    fn test_population_std_dev_of_default_samples() {
        // Divisor n, not n - 1
        let sigma = population_std_dev(&DEFAULT_SAMPLES).unwrap();
        assert!((sigma - 4.686_062_698_510_95).abs() < 1e-6);
    }

    #[test]
    fn test_empty_slices_have_no_statistics() {
        let empty: [f64; 0] = [];
        assert!(mean(&empty).is_none());
        assert!(population_std_dev(&empty).is_none());
        assert!(sample_bounds(&empty).is_none());
    }

    #[test]
    fn test_sample_bounds() {
        assert_eq!(sample_bounds(&DEFAULT_SAMPLES), Some((160.0, 175.0)));
    }

    #[test]
    fn test_round_to_places() {
        assert!((round_to(168.428_571_43, 2) - 168.43).abs() < 1e-12);
        assert!((round_to(4.686_062_698, 5) - 4.686_06).abs() < 1e-12);
        assert!((round_to(-1.005, 0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_domain_endpoints() {
        let domain = density_domain(158.0, 178.0, 50);
        assert_eq!(domain.len(), 50);
        assert!((domain.first().copied().unwrap() - 158.0).abs() < 1e-12);
        assert!((domain.last().copied().unwrap() - 178.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_default_samples() {
        let summary = SampleSummary::from_samples(&DEFAULT_SAMPLES).unwrap();
        assert!((summary.mean - 168.428_571_428_571_43).abs() < 1e-12);
        assert_eq!(summary.min, 160.0);
        assert_eq!(summary.max, 175.0);
    }

    #[test]
    fn test_summary_rejects_degenerate_inputs() {
        assert!(SampleSummary::from_samples(&[]).is_err());
        assert!(SampleSummary::from_samples(&[170.0]).is_err());
        assert!(SampleSummary::from_samples(&[170.0, 170.0, 170.0]).is_err());
        assert!(SampleSummary::from_samples(&[170.0, f64::NAN]).is_err());
    }
}
