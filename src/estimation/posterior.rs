//! Posterior-like scoring of candidate means against the clinical prior

use crate::estimation::likelihood::density_sum;
use crate::math::probability::Normal;

/// Unnormalized posterior-like score of a candidate mean
///
/// `candidate` is the normal `N(x, σ_prior)` centered on the candidate mean
/// with the prior's width. With `m = Σⱼ N(xⱼ; x, σ_prior)`, the score is
///
/// `Πⱼ [N(xⱼ; x, σ_prior) · m]`
///
/// This mixes a density product with a density sum and so is not a proper
/// posterior; it is the instructional quantity this tool demonstrates, kept
/// bit-for-bit with its reference behavior. Scores are tiny (products of
/// densities) and are flattened with a display exponent before plotting.
pub fn posterior_score(candidate: &Normal, samples: &[f64]) -> f64 {
    let marginal = density_sum(candidate, samples);
    samples
        .iter()
        .map(|&x| candidate.pdf(x) * marginal)
        .product()
}
