//! Resized tile copies of pool images
//!
//! Tiles are produced on first use and reused for every later cell drawing the
//! same pool member. Source images are only read.

use image::RgbImage;
use image::imageops::{self, FilterType};

/// Stretch an image to a `tile_size` square, ignoring its aspect ratio
pub fn resize_tile(source: &RgbImage, tile_size: u32) -> RgbImage {
    imageops::resize(source, tile_size, tile_size, FilterType::Triangle)
}

/// Performance metrics for tile reuse
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of tiles served from the cache
    pub hits: usize,
    /// Number of tiles that had to be resized
    pub misses: usize,
}

/// Lazily resized tiles for one image pool
pub struct TileCache<'p> {
    sources: &'p [&'p RgbImage],
    tile_size: u32,
    tiles: Vec<Option<RgbImage>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl<'p> TileCache<'p> {
    /// Create an empty cache over `sources`
    pub fn new(sources: &'p [&'p RgbImage], tile_size: u32) -> Self {
        Self {
            sources,
            tile_size,
            tiles: vec![None; sources.len()],
            stats: CacheStats::default(),
        }
    }

    /// Number of source images
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the pool has no images
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resized copy of the source at `index`, `None` when out of range
    pub fn tile(&mut self, index: usize) -> Option<&RgbImage> {
        let source = self.sources.get(index)?;
        let slot = self.tiles.get_mut(index)?;

        if slot.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        let tile_size = self.tile_size;
        Some(slot.get_or_insert_with(|| resize_tile(source, tile_size)))
    }
}
