//! Spatial data structures and canvas construction
//!
//! This module contains spatial-related functionality including:
//! - Density grid normalization from map text
//! - Random tile selection and resized tile caching
//! - Canvas assembly

/// Canvas assembly from a grid and two image pools
pub mod canvas;
/// Density grid construction and queries
pub mod grid;
/// Random source construction and pool selection
pub mod selection;
/// Resized tile copies
pub mod tiles;

pub use canvas::{Canvas, ImagePool, assemble};
pub use grid::{DensityGrid, normalize};
