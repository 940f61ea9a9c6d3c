//! Analysis modules for sample preprocessing

/// Summary statistics, decimal rounding, and evaluation domains
pub mod statistics;
