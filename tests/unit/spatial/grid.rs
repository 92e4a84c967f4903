//! Tests for map normalization into density grids

#[cfg(test)]
mod tests {
    use mapcollage::MosaicError;
    use mapcollage::spatial::grid::{DensityGrid, normalize};

    fn assert_border_empty(grid: &DensityGrid) {
        let border = grid.border_width();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let on_border = row < border
                    || col < border
                    || row >= grid.rows() - border
                    || col >= grid.cols() - border;
                if on_border {
                    assert_eq!(
                        grid.get(row, col),
                        Some(false),
                        "Border cell ({row}, {col}) should be empty"
                    );
                }
            }
        }
    }

    // Tests the diagonal two-line map lands offset by the border
    // Verified by dropping the border offset when copying characters
    #[test]
    fn test_diagonal_map_with_border() {
        let grid = normalize(&["X ", " X"], 1).unwrap();

        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.filled_count(), 2);
        assert_eq!(grid.get(1, 1), Some(true));
        assert_eq!(grid.get(2, 2), Some(true));
        assert_eq!(grid.get(1, 2), Some(false));
        assert_eq!(grid.get(2, 1), Some(false));
        assert_border_empty(&grid);
    }

    // Tests ragged lines are padded to the longest line plus border
    // Verified by sizing columns from the first line
    #[test]
    fn test_ragged_lines_are_rectangular() {
        let lines = ["#", "#####", "", "##"];
        for border in 0..4 {
            let grid = normalize(&lines, border).unwrap();
            assert_eq!(grid.rows(), lines.len() + 2 * border);
            assert_eq!(grid.cols(), 5 + 2 * border);
            assert_eq!(grid.cells().ncols(), grid.cols());
            assert_border_empty(&grid);
        }
    }

    // Tests trailing carriage returns are not treated as filled cells
    // Verified by skipping the carriage return strip
    #[test]
    fn test_carriage_returns_are_stripped() {
        let grid = normalize(&["X\r", " X\r"], 0).unwrap();

        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(0, 0), Some(true));
        assert_eq!(grid.get(0, 1), Some(false));
        assert_eq!(grid.get(1, 1), Some(true));
        assert_eq!(grid.filled_count(), 2);
    }

    // Tests any non-space character counts as filled
    #[test]
    fn test_non_space_characters_are_filled() {
        let grid = normalize(&[".o*\t"], 0).unwrap();
        assert_eq!(grid.filled_count(), 4);
        assert!(!grid.has_empty());
    }

    // Tests empty input is rejected before any grid is built
    // Verified by returning an empty grid instead
    #[test]
    fn test_empty_input_is_rejected() {
        let lines: [&str; 0] = [];
        assert!(matches!(normalize(&lines, 1), Err(MosaicError::EmptyInput)));
        assert!(matches!(
            DensityGrid::from_map_text("", 1),
            Err(MosaicError::EmptyInput)
        ));
    }

    // Tests a map of blank lines without border has no columns and is rejected
    #[test]
    fn test_zero_width_grid_is_rejected() {
        assert!(matches!(
            normalize(&["", ""], 0),
            Err(MosaicError::EmptyInput)
        ));

        let bordered = normalize(&["", ""], 1).unwrap();
        assert_eq!((bordered.rows(), bordered.cols()), (4, 2));
        assert!(!bordered.has_filled());
    }

    // Tests normalization is a pure function of its input
    #[test]
    fn test_normalize_is_idempotent() {
        let lines = ["  ##  ", " #  # ", "#    #\r", " #  #", "  ##"];
        let first = normalize(&lines, 2).unwrap();
        let second = normalize(&lines, 2).unwrap();
        assert_eq!(first, second);
    }

    // Tests map text splitting matches line-oriented reading
    #[test]
    fn test_from_map_text_handles_line_endings() {
        let grid = DensityGrid::from_map_text("X \r\n X\r\n", 1).unwrap();
        assert_eq!(grid, normalize(&["X ", " X"], 1).unwrap());
    }

    // Tests the text rendering used for logging
    #[test]
    fn test_display_renders_cells() {
        let grid = normalize(&["X ", " X"], 0).unwrap();
        assert_eq!(grid.to_string(), "# \n #");
    }

    // Tests filled and empty counts cover every cell
    #[test]
    fn test_counts_cover_grid() {
        let grid = normalize(&["XX", "X"], 1).unwrap();
        assert_eq!(grid.filled_count(), 3);
        assert_eq!(grid.filled_count() + grid.empty_count(), 16);
        assert!(grid.has_filled());
        assert!(grid.has_empty());
        assert_eq!(grid.get(4, 0), None);
    }
}
