//! Point configurations with a fixed point count

use serde::{Deserialize, Serialize};

use crate::spatial::window::Window;

/// Location in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Ordered collection of points inside a window
///
/// The point count never changes during a reconstruction run. Relocations
/// produce a new configuration so the current one stays available for
/// comparison until the proposal is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointConfiguration {
    window: Window,
    points: Vec<Point>,
}

impl PointConfiguration {
    /// Create a configuration from its window and points
    pub const fn new(window: Window, points: Vec<Point>) -> Self {
        Self { window, points }
    }

    /// Configuration with no points in `window`
    pub const fn empty(window: Window) -> Self {
        Self {
            window,
            points: Vec::new(),
        }
    }

    /// Observation window
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Points in their fixed order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the configuration, keeping only its points
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of points
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the configuration holds no points
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points per unit area
    pub const fn intensity(&self) -> f64 {
        self.points.len() as f64 / self.window.area()
    }

    /// Number of points lying outside the window
    pub fn count_outside(&self) -> usize {
        self.points
            .iter()
            .filter(|&&p| !self.window.contains(p))
            .count()
    }

    /// Copy of this configuration with one point moved
    ///
    /// An out-of-range index returns an unchanged copy.
    #[must_use]
    pub fn with_relocated(&self, index: usize, point: Point) -> Self {
        let mut points = self.points.clone();
        if let Some(slot) = points.get_mut(index) {
            *slot = point;
        }
        Self {
            window: self.window,
            points,
        }
    }
}
