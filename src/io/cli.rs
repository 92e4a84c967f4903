//! Command-line interface and the end-to-end mosaic pipeline

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use image::RgbImage;
use log::{info, warn};

use crate::analysis::classification::classify;
use crate::analysis::color::{MeanColor, mean_color};
use crate::io::configuration::{DEFAULT_BORDER_WIDTH, OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::diagnostics::DiagnosticReport;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{collect_image_paths, load_image, save_canvas};
use crate::io::map::load_map;
use crate::io::progress::ProgressManager;
use crate::spatial::canvas::{ImagePool, assemble, canvas_dimensions};
use crate::spatial::selection::{rng_from_seed, time_seed};

#[derive(Parser, Debug)]
#[command(name = "mapcollage")]
#[command(
    author,
    version,
    about = "Assemble a photo mosaic shaped by a text density map"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Directory containing the source images (jpg, jpeg, png)
    #[arg(value_name = "IMAGE_DIRECTORY")]
    pub image_directory: PathBuf,

    /// Text map; any non-space character marks a filled cell
    #[arg(value_name = "INPUT_MAP_FILE")]
    pub map_file: PathBuf,

    /// Edge length of each tile in pixels
    #[arg(value_name = "TILE_SIZE")]
    pub tile_size: u32,

    /// Output image (defaults to <map>_mosaic.png next to the map)
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible clustering and tile choice
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Empty cells added around the map on every side
    #[arg(short, long, default_value_t = DEFAULT_BORDER_WIDTH)]
    pub border: usize,

    /// Directory to write diagnostic contact sheets into
    #[arg(short, long, value_name = "DIR")]
    pub diagnostics: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse arguments, reporting missing positionals as
    /// [`MosaicError::MissingArgument`]
    ///
    /// Help, version and malformed values are handled by clap, which prints
    /// its message and exits.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MissingArgument`] when a required argument is
    /// absent
    pub fn parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
                Err(MosaicError::MissingArgument {
                    usage: Self::usage(),
                })
            }
            Err(err) => err.exit(),
        }
    }

    /// One-line usage summary
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.map_file))
    }
}

/// `<stem>_mosaic.png` beside the map file
pub fn default_output_path(map_file: &Path) -> PathBuf {
    let stem = map_file.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
        stem.to_string_lossy()
    );

    if let Some(parent) = map_file.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs the pipeline: map, images, mean colors, classification, canvas
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl MosaicProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the mosaic and save it, returning the output path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The map is unreadable or empty
    /// - The tile size is zero or the canvas would be too large
    /// - The image directory is unreadable, has no images, or an image fails
    ///   to decode
    /// - Clustering fails or a pool required by the map is empty
    /// - The output or diagnostics cannot be written
    pub fn process(&self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output_path = self.cli.output_path();

        info!("Image directory: {}", self.cli.image_directory.display());
        info!("Input file: {}", self.cli.map_file.display());
        info!("Tile size: {}", self.cli.tile_size);
        info!("Output file: {}", output_path.display());

        let grid = load_map(&self.cli.map_file, self.cli.border)?;
        let (width, height) = canvas_dimensions(&grid, self.cli.tile_size)?;
        info!(
            "Normalized map ({} rows x {} columns):\n{grid}",
            grid.rows(),
            grid.cols()
        );
        if !grid.has_filled() {
            warn!("Map has no filled cells; only secondary images will be used");
        } else if !grid.has_empty() {
            warn!("Map has no empty cells; only primary images will be used");
        }

        let paths = collect_image_paths(&self.cli.image_directory)?;
        if paths.is_empty() {
            return Err(invalid_parameter(
                "image_directory",
                &self.cli.image_directory.display(),
                &"contains no jpg, jpeg or png images",
            ));
        }
        let (images, colors) = self.load_images(&paths)?;

        let seed = self.cli.seed.unwrap_or_else(time_seed);
        info!("Seed: {seed}");
        let mut rng = rng_from_seed(Some(seed));

        let classification = classify(&colors, &mut rng)?;
        let (primary, secondary) = classification.partition(&images);
        let canvas = assemble(
            &grid,
            &ImagePool::new(primary),
            &ImagePool::new(secondary),
            self.cli.tile_size,
            &mut rng,
        )?;

        if let Some(directory) = &self.cli.diagnostics {
            let written =
                DiagnosticReport::new(&images, &colors, &classification).write_to(directory)?;
            info!(
                "Wrote {} diagnostic sheets to {}",
                written.len(),
                directory.display()
            );
        }

        save_canvas(&canvas, &output_path)?;
        info!(
            "Wrote {width}x{height} mosaic to {} in {:.2?}",
            output_path.display(),
            start_time.elapsed()
        );

        Ok(output_path)
    }

    fn load_images(&self, paths: &[PathBuf]) -> Result<(Vec<RgbImage>, Vec<MeanColor>)> {
        self.progress_manager.initialize(paths.len());

        let mut images = Vec::with_capacity(paths.len());
        let mut colors = Vec::with_capacity(paths.len());
        for path in paths {
            let image = load_image(path)?;
            colors.push(mean_color(&image));
            images.push(image);
            self.progress_manager.image_loaded(path);
        }

        self.progress_manager.finish();
        info!("Loaded {} images", images.len());
        Ok((images, colors))
    }
}
