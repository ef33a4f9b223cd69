//! Spatial data structures
//!
//! This module contains:
//! - Points and point configurations
//! - Rectangular observation windows and uniform sampling
//! - A cell index for neighbour queries on large patterns

/// Grid-based spatial index
pub mod index;
/// Points and point configurations
pub mod pattern;
/// Observation windows and uniform point sampling
pub mod window;

pub use pattern::{Point, PointConfiguration};
pub use window::Window;
