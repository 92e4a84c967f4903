//! Tests for pipeline constants

#[cfg(test)]
mod tests {
    use mapcollage::io::configuration::{
        CLUSTERING_ATTEMPTS, DEFAULT_BORDER_WIDTH, DIAGNOSTIC_PANEL_SIZE, DIAGNOSTIC_SWATCH_SIZE,
        IMAGE_EXTENSIONS, MAX_CANVAS_DIMENSION, MAX_CANVAS_PIXELS, MIN_CLUSTER_COUNT,
        OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    };

    // Tests clustering always asks for at least a two-way split
    // Verified by lowering the minimum cluster count
    #[test]
    fn test_clustering_parameters() {
        assert_eq!(MIN_CLUSTER_COUNT, 2);
        assert_eq!(CLUSTERING_ATTEMPTS, 3);
    }

    // Tests the default border is one cell
    #[test]
    fn test_default_border_width() {
        assert_eq!(DEFAULT_BORDER_WIDTH, 1);
    }

    // Tests accepted extensions are lowercase and include the output format
    #[test]
    fn test_image_extensions() {
        assert_eq!(IMAGE_EXTENSIONS, &["jpg", "jpeg", "png"]);
        assert!(IMAGE_EXTENSIONS.contains(&OUTPUT_EXTENSION));
        assert_eq!(OUTPUT_SUFFIX, "_mosaic");
    }

    // Tests canvas and diagnostic size limits
    #[test]
    fn test_size_limits() {
        assert_eq!(MAX_CANVAS_DIMENSION, 65_535);
        assert_eq!(MAX_CANVAS_PIXELS, 268_435_456);
        assert_eq!(DIAGNOSTIC_PANEL_SIZE, 350);
        assert_eq!(DIAGNOSTIC_SWATCH_SIZE, 30);
    }
}
