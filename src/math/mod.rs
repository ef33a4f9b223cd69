//! Mathematical utilities for the statistics

/// Smoothing kernels for density estimation
pub mod kernel;
