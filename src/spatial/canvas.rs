//! Canvas assembly from a density grid and two image pools

use image::{RgbImage, imageops};
use log::debug;
use rand::Rng;

use crate::io::configuration::{MAX_CANVAS_DIMENSION, MAX_CANVAS_PIXELS};
use crate::io::error::{MosaicError, PoolKind, Result, invalid_parameter};
use crate::spatial::grid::DensityGrid;
use crate::spatial::selection::choose_index;
use crate::spatial::tiles::TileCache;

/// The assembled mosaic image
pub type Canvas = RgbImage;

/// Ordered, read-only references to caller-owned images
#[derive(Debug, Clone, Default)]
pub struct ImagePool<'a> {
    images: Vec<&'a RgbImage>,
}

impl<'a> ImagePool<'a> {
    /// Create a pool from image references
    pub const fn new(images: Vec<&'a RgbImage>) -> Self {
        Self { images }
    }

    /// Number of images in the pool
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the pool has no images
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image at `index`
    pub fn get(&self, index: usize) -> Option<&'a RgbImage> {
        self.images.get(index).copied()
    }

    /// All images in pool order
    pub fn images(&self) -> &[&'a RgbImage] {
        &self.images
    }
}

impl<'a> FromIterator<&'a RgbImage> for ImagePool<'a> {
    fn from_iter<I: IntoIterator<Item = &'a RgbImage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Pixel dimensions `(width, height)` of the canvas for a grid
///
/// # Errors
///
/// Returns an invalid parameter error if `tile_size` is zero, either
/// dimension exceeds [`MAX_CANVAS_DIMENSION`], or the area exceeds
/// [`MAX_CANVAS_PIXELS`]
pub fn canvas_dimensions(grid: &DensityGrid, tile_size: u32) -> Result<(u32, u32)> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"must be positive",
        ));
    }

    let scale = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(tile_size))
            .filter(|&pixels| pixels <= MAX_CANVAS_DIMENSION)
    };

    match (scale(grid.cols()), scale(grid.rows())) {
        (Some(width), Some(height))
            if u64::from(width) * u64::from(height) <= MAX_CANVAS_PIXELS =>
        {
            Ok((width, height))
        }
        (Some(width), Some(height)) => Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &format!(
                "a {width}x{height} canvas exceeds the maximum area of {MAX_CANVAS_PIXELS} pixels"
            ),
        )),
        _ => Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &format!(
                "a {}x{} grid would exceed the maximum canvas dimension of {MAX_CANVAS_DIMENSION} pixels",
                grid.cols(),
                grid.rows()
            ),
        )),
    }
}

/// Tile the grid with images drawn uniformly at random from the pools
///
/// Filled cells draw from `primary`, empty cells from `secondary`, with
/// replacement, in row-major order. Every drawn image is stretched to a
/// `tile_size` square. The canvas is `tile_size * cols` by
/// `tile_size * rows` pixels.
///
/// # Errors
///
/// Returns:
/// - [`MosaicError::EmptyPool`] if the grid needs a pool that has no images
/// - an invalid parameter error for a zero or oversized `tile_size`
pub fn assemble<R: Rng>(
    grid: &DensityGrid,
    primary: &ImagePool<'_>,
    secondary: &ImagePool<'_>,
    tile_size: u32,
    rng: &mut R,
) -> Result<Canvas> {
    let (width, height) = canvas_dimensions(grid, tile_size)?;

    let filled = grid.filled_count();
    let empty = grid.empty_count();
    if filled > 0 && primary.is_empty() {
        return Err(MosaicError::EmptyPool {
            pool: PoolKind::Primary,
            cells: filled,
        });
    }
    if empty > 0 && secondary.is_empty() {
        return Err(MosaicError::EmptyPool {
            pool: PoolKind::Secondary,
            cells: empty,
        });
    }

    let mut primary_tiles = TileCache::new(primary.images(), tile_size);
    let mut secondary_tiles = TileCache::new(secondary.images(), tile_size);
    let mut canvas = Canvas::new(width, height);

    for ((row, col), &is_filled) in grid.cells().indexed_iter() {
        let (tiles, pool) = if is_filled {
            (&mut primary_tiles, PoolKind::Primary)
        } else {
            (&mut secondary_tiles, PoolKind::Secondary)
        };

        let index =
            choose_index(rng, tiles.len()).ok_or(MosaicError::EmptyPool { pool, cells: 1 })?;
        let tile = tiles
            .tile(index)
            .ok_or(MosaicError::EmptyPool { pool, cells: 1 })?;

        let x = i64::from(col as u32 * tile_size);
        let y = i64::from(row as u32 * tile_size);
        imageops::replace(&mut canvas, tile, x, y);
    }

    debug!(
        "Assembled {width}x{height} canvas: {} primary and {} secondary tiles resized",
        primary_tiles.stats.misses, secondary_tiles.stats.misses
    );

    Ok(canvas)
}
