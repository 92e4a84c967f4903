//! Color analysis and image classification

/// Primary/secondary classification by cluster distinctiveness
pub mod classification;
/// K-means clustering of mean colors
pub mod clustering;
/// Mean colors and color distance
pub mod color;

pub use classification::{Classification, classify};
pub use color::{MeanColor, color_distance};
