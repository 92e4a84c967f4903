//! Progress display while decoding and summarizing source images

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static LOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{percent}}%) {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many source images have been loaded
///
/// A hidden manager accepts every call but draws nothing, so callers need no
/// branching for quiet runs.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that draws to the terminal
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(LOAD_STYLE.clone());
        Self { bar }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Set the number of images to load
    pub fn initialize(&self, image_count: usize) {
        self.bar.set_length(image_count as u64);
        self.bar.set_position(0);
    }

    /// Record that the image at `path` has been loaded
    pub fn image_loaded(&self, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(name);
        self.bar.inc(1);
    }

    /// Number of images recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
