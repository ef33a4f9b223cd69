//! Smoothing kernels for density-type estimators

/// Epanechnikov kernel with compact support `[-half_width, half_width]`
///
/// Integrates to one for any positive half-width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epanechnikov {
    half_width: f64,
}

impl Epanechnikov {
    /// Create a kernel with the given half-width
    pub const fn new(half_width: f64) -> Self {
        Self { half_width }
    }

    /// Kernel with half-width chosen by Stoyan's rule `coefficient / sqrt(intensity)`
    pub fn stoyan(coefficient: f64, intensity: f64) -> Self {
        Self::new(coefficient / intensity.sqrt())
    }

    /// Support half-width
    pub const fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Kernel density at offset `t`
    pub fn density(&self, t: f64) -> f64 {
        let h = self.half_width;
        if h.is_nan() || h <= 0.0 || t.abs() > h {
            return 0.0;
        }
        let u = t / h;
        0.75 * u.mul_add(-u, 1.0) / h
    }
}
