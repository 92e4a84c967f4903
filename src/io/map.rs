//! Map file reading

use std::path::Path;

use crate::io::error::{Result, WithContext};
use crate::spatial::grid::DensityGrid;

/// Read a map file and normalize it into a density grid
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or is not valid UTF-8
/// - The file contains no lines
pub fn load_map(path: &Path, border_width: usize) -> Result<DensityGrid> {
    let text = std::fs::read_to_string(path).with_operation(path, "read map")?;
    DensityGrid::from_map_text(&text, border_width)
}
