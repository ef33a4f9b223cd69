//! Reconstruction of homogeneous spatial point patterns by simulated annealing
//!
//! An observed pattern is summarised by its nearest-neighbour distance
//! distribution G(r) and pair correlation function g(r). Starting from
//! complete spatial randomness, single points are relocated one at a time
//! and a move is kept when it lowers the weighted discrepancy between the
//! observed and simulated curves, or with a small annealing probability
//! otherwise.

#![forbid(unsafe_code)]

/// Energy, perturbation plans, the annealing loop and run orchestration
pub mod algorithm;
/// Summary statistics of point patterns
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Smoothing kernels
pub mod math;
/// Points, windows and neighbour search
pub mod spatial;

pub use io::error::{ReconstructionError, Result};
