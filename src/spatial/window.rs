//! Rectangular observation windows and uniform point sampling
//!
//! Windows are axis-aligned rectangles. Every geometric quantity the
//! statistic estimators need (area, boundary distance, eroded area, overlap of
//! a shifted copy) has a closed form on a rectangle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::io::error::{Result, invalid_pattern};
use crate::spatial::pattern::{Point, PointConfiguration};

/// Axis-aligned rectangular window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Minimum x coordinate (inclusive)
    pub x_min: f64,
    /// Maximum x coordinate (inclusive)
    pub x_max: f64,
    /// Minimum y coordinate (inclusive)
    pub y_min: f64,
    /// Maximum y coordinate (inclusive)
    pub y_max: f64,
}

impl Window {
    /// Create a window, rejecting empty or non-finite extents
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is not finite or the window has zero or
    /// negative width or height
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        if !finite {
            return Err(invalid_pattern(&"window bounds must be finite"));
        }
        if x_max <= x_min || y_max <= y_min {
            return Err(invalid_pattern(&format!(
                "window [{x_min}, {x_max}] x [{y_min}, {y_max}] has no area"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Unit square `[0, 1] x [0, 1]`
    pub const fn unit() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }

    /// Smallest window enclosing all points
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two distinct coordinates on
    /// either axis, since the enclosing rectangle would have no area
    pub fn bounding(points: &[Point]) -> Result<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        Self::new(x_min, x_max, y_min, y_max)
    }

    /// Horizontal extent
    pub const fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent
    pub const fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Window area
    pub const fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Length of the shorter side
    pub const fn short_side(&self) -> f64 {
        self.width().min(self.height())
    }

    /// Check if a point lies within the window (boundary included)
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    /// Distance from an interior point to the nearest window edge
    pub const fn boundary_distance(&self, point: Point) -> f64 {
        let dx = (point.x - self.x_min).min(self.x_max - point.x);
        let dy = (point.y - self.y_min).min(self.y_max - point.y);
        dx.min(dy).max(0.0)
    }

    /// Area of the window eroded by distance `r`
    pub fn eroded_area(&self, r: f64) -> f64 {
        let w = 2.0f64.mul_add(-r, self.width()).max(0.0);
        let h = 2.0f64.mul_add(-r, self.height()).max(0.0);
        w * h
    }

    /// Area of the intersection of the window with itself shifted by `(dx, dy)`
    pub const fn translated_overlap(&self, dx: f64, dy: f64) -> f64 {
        let w = (self.width() - dx.abs()).max(0.0);
        let h = (self.height() - dy.abs()).max(0.0);
        w * h
    }

    /// Draw one point uniformly inside the window
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point {
            x: rng.random::<f64>().mul_add(self.width(), self.x_min),
            y: rng.random::<f64>().mul_add(self.height(), self.y_min),
        }
    }
}

/// Source of uniformly distributed point configurations
///
/// Used both for the initial configuration of each run and for the candidate
/// coordinates of every relocation.
pub trait UniformSampler: Sync {
    /// Draw `count` independent points uniformly inside `window`
    fn sample<R: Rng + ?Sized>(&self, count: usize, window: &Window, rng: &mut R)
    -> PointConfiguration;
}

/// Complete spatial randomness: a binomial process on the window
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteSpatialRandomness;

impl UniformSampler for CompleteSpatialRandomness {
    fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        window: &Window,
        rng: &mut R,
    ) -> PointConfiguration {
        let points = (0..count).map(|_| window.sample_point(rng)).collect();
        PointConfiguration::new(*window, points)
    }
}
