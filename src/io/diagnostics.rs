//! Contact sheets of the intermediate classification artifacts
//!
//! Kept out of the main pipeline; the driver only writes these when a
//! diagnostics directory is requested.

use std::path::{Path, PathBuf};

use image::{RgbImage, imageops};
use log::debug;

use crate::analysis::classification::Classification;
use crate::analysis::color::MeanColor;
use crate::io::configuration::{DIAGNOSTIC_PANEL_SIZE, DIAGNOSTIC_SWATCH_SIZE};
use crate::io::error::{MosaicError, Result};
use crate::io::image::save_canvas;
use crate::spatial::tiles::resize_tile;

/// Lay images out left to right, `per_row` per row, each stretched to a
/// `cell_size` square on a black background
///
/// An empty input yields a zero-sized image.
pub fn contact_sheet<'a, I>(images: I, cell_size: u32, per_row: usize) -> RgbImage
where
    I: IntoIterator<Item = &'a RgbImage>,
{
    let images: Vec<&RgbImage> = images.into_iter().collect();
    let per_row = per_row.max(1);
    let columns = images.len().min(per_row) as u32;
    let rows = images.len().div_ceil(per_row) as u32;

    let mut sheet = RgbImage::new(cell_size * columns, cell_size * rows);
    for (index, image) in images.iter().enumerate() {
        let x = i64::from((index % per_row) as u32 * cell_size);
        let y = i64::from((index / per_row) as u32 * cell_size);
        imageops::replace(&mut sheet, &resize_tile(image, cell_size), x, y);
    }
    sheet
}

/// Solid square of a single color
pub fn swatch(color: MeanColor, size: u32) -> RgbImage {
    RgbImage::from_pixel(size, size, color.into())
}

/// Images per row and cell size for a sheet of `count` images
pub fn sheet_layout(count: usize) -> (usize, u32) {
    let per_row = ((count as f64).sqrt().ceil() as usize).max(1);
    let cell_size = (DIAGNOSTIC_PANEL_SIZE / per_row as u32).max(1);
    (per_row, cell_size)
}

/// Everything needed to render the diagnostic sheets of one run
pub struct DiagnosticReport<'a> {
    images: &'a [RgbImage],
    colors: &'a [MeanColor],
    classification: &'a Classification,
}

impl<'a> DiagnosticReport<'a> {
    /// Bundle the source images, their mean colors and their classification
    pub const fn new(
        images: &'a [RgbImage],
        colors: &'a [MeanColor],
        classification: &'a Classification,
    ) -> Self {
        Self {
            images,
            colors,
            classification,
        }
    }

    /// Render every non-empty sheet, keyed by file stem
    pub fn render(&self) -> Vec<(&'static str, RgbImage)> {
        let (per_row, cell_size) = sheet_layout(self.images.len());
        let (primary, secondary) = self.classification.partition(self.images);

        let averaged: Vec<RgbImage> = self
            .colors
            .iter()
            .map(|&color| swatch(color, cell_size))
            .collect();

        let clustered: Vec<RgbImage> = self
            .colors
            .iter()
            .enumerate()
            .map(|(index, &color)| {
                let centroid = self
                    .classification
                    .assignment()
                    .and_then(|assignment| assignment.centroid_of(index))
                    .unwrap_or(color);
                swatch(centroid, cell_size)
            })
            .collect();

        let mut cluster_colors: Vec<MeanColor> =
            self.classification.global_average().into_iter().collect();
        if let Some(assignment) = self.classification.assignment() {
            cluster_colors.extend_from_slice(assignment.centroids());
        }
        let clusters: Vec<RgbImage> = cluster_colors
            .iter()
            .map(|&color| swatch(color, DIAGNOSTIC_SWATCH_SIZE))
            .collect();

        let sheets = [
            ("images", contact_sheet(self.images, cell_size, per_row)),
            ("averaged", contact_sheet(&averaged, cell_size, per_row)),
            ("clustered", contact_sheet(&clustered, cell_size, per_row)),
            ("primary", contact_sheet(primary, cell_size, per_row)),
            ("secondary", contact_sheet(secondary, cell_size, per_row)),
            (
                "clusters",
                contact_sheet(&clusters, DIAGNOSTIC_SWATCH_SIZE, clusters.len() + 1),
            ),
        ];

        sheets
            .into_iter()
            .filter(|(_, sheet)| sheet.width() > 0 && sheet.height() > 0)
            .collect()
    }

    /// Write every non-empty sheet as a PNG into `directory`
    ///
    /// Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a sheet cannot
    /// be saved
    pub fn write_to(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(directory).map_err(|e| MosaicError::FileSystem {
            path: directory.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;

        let mut written = Vec::new();
        for (name, sheet) in self.render() {
            let path = directory.join(format!("{name}.png"));
            save_canvas(&sheet, &path)?;
            debug!("Wrote diagnostic sheet {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
