//! Mathematical utilities for the estimation figures

/// Normal probability density and checked distribution parameters
pub mod probability;
