//! Per-image color summaries and color-space arithmetic

use image::RgbImage;

/// Representative 8-bit color of an image or cluster, in R, G, B order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeanColor(pub [u8; 3]);

impl MeanColor {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channel values in R, G, B order
    pub const fn channels(self) -> [u8; 3] {
        self.0
    }

    /// Channel values widened to `f64` for clustering
    pub fn to_f64(self) -> [f64; 3] {
        self.0.map(f64::from)
    }

    /// Convert floating point channels, truncating toward zero
    ///
    /// Values outside `0..=255` saturate and NaN maps to 0.
    pub fn from_f64(channels: [f64; 3]) -> Self {
        Self(channels.map(|c| c as u8))
    }
}

impl From<MeanColor> for image::Rgb<u8> {
    fn from(color: MeanColor) -> Self {
        Self(color.0)
    }
}

/// Euclidean distance between two colors over all three channels
pub fn color_distance(a: MeanColor, b: MeanColor) -> f64 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let diff = f64::from(y) - f64::from(x);
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Average pixel color of an image, truncated per channel
///
/// An image without pixels summarizes to black.
pub fn mean_color(image: &RgbImage) -> MeanColor {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return MeanColor::default();
    }

    let sums = image.pixels().fold([0u64; 3], |mut acc, pixel| {
        for (sum, &value) in acc.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(value);
        }
        acc
    });

    MeanColor(sums.map(|sum| (sum / pixel_count) as u8))
}

/// Running per-channel total used to average a sequence of colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorAccumulator {
    sums: [u64; 3],
    count: u64,
}

impl ColorAccumulator {
    /// Fold one more color into the total
    #[must_use]
    pub fn add(self, color: MeanColor) -> Self {
        let mut sums = self.sums;
        for (sum, &value) in sums.iter_mut().zip(color.0.iter()) {
            *sum += u64::from(value);
        }
        Self {
            sums,
            count: self.count + 1,
        }
    }

    /// Number of colors folded in so far
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Per-channel average with truncating integer division
    ///
    /// Returns `None` when no colors were added.
    pub fn average(&self) -> Option<MeanColor> {
        if self.count == 0 {
            return None;
        }
        Some(MeanColor(self.sums.map(|sum| (sum / self.count) as u8)))
    }
}

/// Truncated per-channel average of a sequence of colors
pub fn average_color<I>(colors: I) -> Option<MeanColor>
where
    I: IntoIterator<Item = MeanColor>,
{
    colors
        .into_iter()
        .fold(ColorAccumulator::default(), ColorAccumulator::add)
        .average()
}
