//! Estimation of normal-model parameters from sample data

/// Closed-form maximum-likelihood fit and likelihood scoring
pub mod likelihood;
/// Posterior-like scoring against the clinical prior
pub mod posterior;
/// Seeded Monte Carlo search over candidate means
pub mod search;
