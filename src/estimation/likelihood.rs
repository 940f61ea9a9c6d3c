//! Closed-form normal fit and likelihood scoring over candidate means

use crate::analysis::statistics::SampleSummary;
use crate::io::error::Result;
use crate::math::probability::Normal;

/// Closed-form maximum-likelihood normal fit of the samples
///
/// The MLE of a univariate normal is the sample mean and the population
/// standard deviation.
///
/// # Errors
///
/// Returns an error if the samples cannot be summarized (fewer than two
/// values, non-finite values, or zero spread).
pub fn fit(samples: &[f64]) -> Result<Normal> {
    let summary = SampleSummary::from_samples(samples)?;
    Normal::new(summary.mean, summary.std_dev)
}

/// Sum of per-sample densities Σⱼ N(xⱼ; μ, σ)
///
/// The likelihood score the candidate search maximizes. A sum rather than a
/// product keeps the scores on a plottable scale.
pub fn density_sum(normal: &Normal, samples: &[f64]) -> f64 {
    samples.iter().map(|&x| normal.pdf(x)).sum()
}

/// Log-likelihood of the samples under `normal`, Σⱼ ln N(xⱼ; μ, σ)
pub fn log_likelihood(normal: &Normal, samples: &[f64]) -> f64 {
    samples.iter().map(|&x| normal.ln_pdf(x)).sum()
}

#[cfg(test)]
mod tests {
    use super::{density_sum, fit, log_likelihood};
    use crate::io::configuration::DEFAULT_SAMPLES;
    use crate::math::probability::Normal;

    #[test]
    fn test_fit_recovers_sample_moments() {
        let fitted = fit(&DEFAULT_SAMPLES).unwrap();
        assert!((fitted.mean() - 168.428_571_428_571_43).abs() < 1e-12);
        assert!((fitted.std_dev() - 4.686_062_698_510_95).abs() < 1e-6);
    }

    #[test]
    fn test_density_sum_peaks_near_the_fitted_mean() {
        let fitted = fit(&DEFAULT_SAMPLES).unwrap();
        let at_fit = density_sum(&fitted, &DEFAULT_SAMPLES);

        let shifted = Normal::new(fitted.mean() + 5.0, fitted.std_dev()).unwrap();
        let off_fit = density_sum(&shifted, &DEFAULT_SAMPLES);

        assert!(at_fit > off_fit);
    }

    #[test]
    fn test_log_likelihood_is_maximized_by_the_fit() {
        let fitted = fit(&DEFAULT_SAMPLES).unwrap();
        let reference = log_likelihood(&fitted, &DEFAULT_SAMPLES);

        for offset in [-2.0, -0.5, 0.5, 2.0] {
            let candidate = Normal::new(fitted.mean() + offset, fitted.std_dev()).unwrap();
            assert!(log_likelihood(&candidate, &DEFAULT_SAMPLES) < reference);
        }
    }

    #[test]
    fn test_fit_rejects_constant_samples() {
        assert!(fit(&[170.0, 170.0]).is_err());
    }
}
