//! Pipeline constants and runtime configuration defaults

// Map normalization
/// Rows/columns of empty cells wrapped around the map
pub const DEFAULT_BORDER_WIDTH: usize = 1;

// Clustering parameters
/// Independent k-means runs; the most compact one wins
pub const CLUSTERING_ATTEMPTS: usize = 3;
/// Lower bound on the number of clusters so a primary/secondary split exists
pub const MIN_CLUSTER_COUNT: usize = 2;
/// Iteration cap for a single k-means run
pub const KMEANS_MAX_ITERATIONS: usize = 10_000;
/// Centroid movement below which a k-means run is considered converged
pub const KMEANS_EPSILON: f64 = 1e-4;

// Safety limit to prevent excessive memory allocation
/// Maximum canvas width or height in pixels
pub const MAX_CANVAS_DIMENSION: u32 = 65_535;
/// Maximum canvas area in pixels (768 MiB of RGB data)
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

// Input discovery
/// File extensions accepted as source images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to the map file stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of the default output file
pub const OUTPUT_EXTENSION: &str = "png";

// Diagnostics
/// Edge length of the image contact sheets in pixels
pub const DIAGNOSTIC_PANEL_SIZE: u32 = 350;
/// Edge length of a single color swatch on the cluster sheet
pub const DIAGNOSTIC_SWATCH_SIZE: u32 = 30;
