//! Photo mosaics laid out by a text density map
//!
//! A map of filled and empty cells is normalized into a boolean grid. Source
//! images are summarized by their mean colors and clustered; the most
//! distinctive sizeable cluster becomes the primary pool for filled cells and
//! the rest the secondary pool for empty cells. The canvas is then tiled with
//! randomly chosen, resized pool members.

#![forbid(unsafe_code)]

/// Mean colors, clustering and classification
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Density grids, tile selection and canvas assembly
pub mod spatial;

pub use io::error::{MosaicError, Result};
