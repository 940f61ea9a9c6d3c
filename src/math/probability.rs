//! Univariate normal distribution with checked parameters
//!
//! All figure math reduces to evaluating this density over a domain or over
//! the observed samples. Parameters are validated once at construction so the
//! evaluation methods stay total.

use crate::io::error::{Result, invalid_parameter};

/// Natural log of `sqrt(2π)`, precomputed to keep the constructors const-friendly
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// A univariate normal distribution `N(mean, std_dev)`
///
/// Construction rejects non-finite parameters and non-positive standard
/// deviations, so `pdf` and `ln_pdf` never see a degenerate distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Create a normal distribution from its mean and standard deviation
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is non-finite or if the standard
    /// deviation is not strictly positive.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(invalid_parameter(
                "mean",
                &mean,
                &"mean must be a finite number",
            ));
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(invalid_parameter(
                "std_dev",
                &std_dev,
                &"standard deviation must be finite and positive",
            ));
        }
        Ok(Self { mean, std_dev })
    }

    /// The distribution mean
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// The distribution standard deviation
    pub const fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Log-density at `x`
    ///
    /// `ln p(x) = -0.5 ((x - μ)/σ)² - ln σ - ln √(2π)`
    pub fn ln_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z).mul_add(z, -self.std_dev.ln()) - LN_SQRT_2PI
    }

    /// Density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Density at the mean, `1 / (σ √(2π))`
    ///
    /// The curve's maximum, used to size chart axes.
    pub fn peak_density(&self) -> f64 {
        (-self.std_dev.ln() - LN_SQRT_2PI).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::Normal;

    #[test]
    fn test_standard_density_at_zero() {
        let standard = Normal::new(0.0, 1.0).unwrap();
        assert!((standard.pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-12);
        assert!((standard.ln_pdf(0.0) + 0.918_938_533_204_672_7).abs() < 1e-12);
    }

    #[test]
    fn test_density_is_symmetric_about_the_mean() {
        let normal = Normal::new(168.43, 4.69).unwrap();
        let left = normal.pdf(168.43 - 3.2);
        let right = normal.pdf(168.43 + 3.2);
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn test_peak_density_matches_pdf_at_mean() {
        let normal = Normal::new(171.0, 3.0).unwrap();
        assert!((normal.peak_density() - normal.pdf(171.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
    }
}
