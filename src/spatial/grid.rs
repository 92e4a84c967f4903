//! Density grid construction from map text
//!
//! A map is a block of text where any non-space character marks a filled cell.
//! Lines are padded on the right to a common width and the whole block is
//! wrapped in a border of empty cells, producing an immutable boolean grid.

use std::fmt;

use ndarray::Array2;

use crate::io::error::{MosaicError, Result};

/// Rectangular boolean layout of the mosaic, `true` for filled cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityGrid {
    cells: Array2<bool>,
    border_width: usize,
}

impl DensityGrid {
    /// Split map text into lines and normalize them
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyInput`] if the text has no lines
    pub fn from_map_text(text: &str, border_width: usize) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        normalize(&lines, border_width)
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Width of the empty border surrounding the map content
    pub const fn border_width(&self) -> usize {
        self.border_width
    }

    /// Cell value at `(row, col)`, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.cells.get([row, col]).copied()
    }

    /// Read-only view of the underlying cells
    pub const fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.filled_count()
    }

    /// Whether any cell is filled
    pub fn has_filled(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    /// Whether any cell is empty
    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|&cell| !cell)
    }
}

impl fmt::Display for DensityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", if cell { '#' } else { ' ' })?;
            }
        }
        Ok(())
    }
}

/// Build a density grid from raw map lines
///
/// Trailing carriage returns are stripped, lines are right-padded with empty
/// cells to the longest line, and `border_width` empty rows and columns are
/// added on every side.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyInput`] if `lines` is empty or the resulting
/// grid would have no columns
pub fn normalize<S: AsRef<str>>(lines: &[S], border_width: usize) -> Result<DensityGrid> {
    if lines.is_empty() {
        return Err(MosaicError::EmptyInput);
    }

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            line.strip_suffix('\r').unwrap_or(line)
        })
        .collect();

    let max_length = stripped
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let rows = stripped.len() + 2 * border_width;
    let cols = max_length + 2 * border_width;
    if cols == 0 {
        return Err(MosaicError::EmptyInput);
    }

    // Padding and border cells keep the default `false`
    let mut cells = Array2::from_elem((rows, cols), false);
    for (row, line) in stripped.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if let Some(cell) = cells.get_mut([row + border_width, col + border_width]) {
                *cell = ch != ' ';
            }
        }
    }

    Ok(DensityGrid {
        cells,
        border_width,
    })
}
