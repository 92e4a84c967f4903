//! Tests for canvas assembly from density grids and image pools

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use mapcollage::MosaicError;
    use mapcollage::io::configuration::{MAX_CANVAS_DIMENSION, MAX_CANVAS_PIXELS};
    use mapcollage::io::error::PoolKind;
    use mapcollage::spatial::canvas::{ImagePool, assemble, canvas_dimensions};
    use mapcollage::spatial::grid::normalize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RED: Rgb<u8> = Rgb([220, 20, 20]);
    const GREEN: Rgb<u8> = Rgb([20, 220, 20]);
    const BLUE: Rgb<u8> = Rgb([20, 20, 220]);

    fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
        RgbImage::from_pixel(width, height, color)
    }

    // Tests the diagonal map produces a 40x40 canvas at tile size 10
    // Verified by sizing the canvas from the unpadded map
    #[test]
    fn test_diagonal_map_canvas_size() {
        let grid = normalize(&["X ", " X"], 1).unwrap();
        let red = solid(8, 8, RED);
        let blue = solid(8, 8, BLUE);
        let mut rng = StdRng::seed_from_u64(1);

        let canvas = assemble(
            &grid,
            &ImagePool::new(vec![&red]),
            &ImagePool::new(vec![&blue]),
            10,
            &mut rng,
        )
        .unwrap();

        assert_eq!(canvas.dimensions(), (40, 40));
    }

    // Tests filled cells get primary tiles and empty cells secondary tiles
    // Verified by swapping the pools in the cell loop
    #[test]
    fn test_tiles_follow_grid_cells() {
        let grid = normalize(&["X ", " X"], 1).unwrap();
        let red = solid(5, 7, RED);
        let blue = solid(9, 3, BLUE);
        let mut rng = StdRng::seed_from_u64(2);

        let canvas = assemble(
            &grid,
            &ImagePool::new(vec![&red]),
            &ImagePool::new(vec![&blue]),
            10,
            &mut rng,
        )
        .unwrap();

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let expected = if grid.get(row, col) == Some(true) {
                    RED
                } else {
                    BLUE
                };
                for (dx, dy) in [(0, 0), (9, 9), (4, 6)] {
                    let x = col as u32 * 10 + dx;
                    let y = row as u32 * 10 + dy;
                    assert_eq!(
                        *canvas.get_pixel(x, y),
                        expected,
                        "Pixel ({x}, {y}) of cell ({row}, {col})"
                    );
                }
            }
        }
    }

    // Tests canvas dimensions are tile size times grid size for many shapes
    #[test]
    fn test_canvas_dimension_law() {
        let red = solid(4, 4, RED);
        let blue = solid(4, 4, BLUE);
        let maps: [&[&str]; 3] = [&["X"], &["X  X", "", " XX"], &["   ", "   "]];

        for lines in maps {
            for border in [0, 2] {
                for tile_size in [1, 3, 16] {
                    let grid = normalize(lines, border).unwrap();
                    let mut rng = StdRng::seed_from_u64(5);
                    let canvas = assemble(
                        &grid,
                        &ImagePool::new(vec![&red]),
                        &ImagePool::new(vec![&blue]),
                        tile_size,
                        &mut rng,
                    )
                    .unwrap();

                    assert_eq!(canvas.width(), tile_size * grid.cols() as u32);
                    assert_eq!(canvas.height(), tile_size * grid.rows() as u32);
                }
            }
        }
    }

    // Tests an all-empty grid with no secondary images reports the secondary pool
    // Verified by skipping the pool check
    #[test]
    fn test_empty_secondary_pool_is_rejected() {
        let grid = normalize(&["   "], 1).unwrap();
        let red = solid(4, 4, RED);
        let mut rng = StdRng::seed_from_u64(3);

        let result = assemble(
            &grid,
            &ImagePool::new(vec![&red]),
            &ImagePool::default(),
            10,
            &mut rng,
        );

        match result {
            Err(MosaicError::EmptyPool { pool, cells }) => {
                assert_eq!(pool, PoolKind::Secondary);
                assert_eq!(cells, 15);
            }
            other => unreachable!("Expected EmptyPool error, got {other:?}"),
        }
    }

    // Tests filled cells with no primary images report the primary pool
    #[test]
    fn test_empty_primary_pool_is_rejected() {
        let grid = normalize(&["X"], 0).unwrap();
        let blue = solid(4, 4, BLUE);
        let mut rng = StdRng::seed_from_u64(3);

        let result = assemble(
            &grid,
            &ImagePool::default(),
            &ImagePool::new(vec![&blue]),
            10,
            &mut rng,
        );

        assert!(matches!(
            result,
            Err(MosaicError::EmptyPool {
                pool: PoolKind::Primary,
                cells: 1
            })
        ));
    }

    // Tests a pool the grid never draws from may be empty
    #[test]
    fn test_unused_pool_may_be_empty() {
        let grid = normalize(&["XX", "XX"], 0).unwrap();
        let red = solid(4, 4, RED);
        let mut rng = StdRng::seed_from_u64(4);

        let canvas = assemble(
            &grid,
            &ImagePool::new(vec![&red]),
            &ImagePool::default(),
            2,
            &mut rng,
        )
        .unwrap();

        assert!(canvas.pixels().all(|pixel| *pixel == RED));
    }

    // Tests equal seeds reproduce the same canvas
    // Verified by reseeding the generator from the clock
    #[test]
    fn test_equal_seeds_give_equal_canvases() {
        let grid = normalize(&["X X X X", " X X X ", "XXXXXXX"], 1).unwrap();
        let red = solid(6, 6, RED);
        let green = solid(6, 6, GREEN);
        let blue = solid(6, 6, BLUE);
        let primary = ImagePool::new(vec![&red, &green]);
        let secondary = ImagePool::new(vec![&blue, &green]);

        let first = assemble(&grid, &primary, &secondary, 4, &mut StdRng::seed_from_u64(9));
        let second = assemble(&grid, &primary, &secondary, 4, &mut StdRng::seed_from_u64(9));

        assert_eq!(first.unwrap(), second.unwrap());
    }

    // Tests every pool member can be drawn
    #[test]
    fn test_selection_uses_whole_pool() {
        let grid = normalize(&["XXXXXXXXXX"; 10], 0).unwrap();
        let red = solid(2, 2, RED);
        let green = solid(2, 2, GREEN);
        let mut rng = StdRng::seed_from_u64(11);

        let canvas = assemble(
            &grid,
            &ImagePool::new(vec![&red, &green]),
            &ImagePool::default(),
            1,
            &mut rng,
        )
        .unwrap();

        assert!(canvas.pixels().any(|pixel| *pixel == RED));
        assert!(canvas.pixels().any(|pixel| *pixel == GREEN));
    }

    // Tests zero tile size is an invalid parameter
    #[test]
    fn test_zero_tile_size_is_rejected() {
        let grid = normalize(&["X"], 1).unwrap();
        assert!(matches!(
            canvas_dimensions(&grid, 0),
            Err(MosaicError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));
    }

    // Tests oversized canvases are rejected before allocation
    #[test]
    fn test_oversized_canvas_is_rejected() {
        let grid = normalize(&["XXXX"], 0).unwrap();
        let tile_size = MAX_CANVAS_DIMENSION / 2;

        assert!(canvas_dimensions(&grid, tile_size).is_err());
        assert_eq!(canvas_dimensions(&grid, 100).unwrap(), (400, 100));
    }

    // Tests the total canvas area is capped even when each side fits
    // Verified by checking only the per-side limit
    #[test]
    fn test_oversized_canvas_area_is_rejected() {
        let grid = normalize(&["XXXXXXXXXXXXXXXXXXXX"; 20], 0).unwrap();

        assert!(matches!(
            canvas_dimensions(&grid, 1000),
            Err(MosaicError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));

        let (width, height) = canvas_dimensions(&grid, 800).unwrap();
        assert_eq!((width, height), (16_000, 16_000));
        assert!(u64::from(width) * u64::from(height) <= MAX_CANVAS_PIXELS);
    }

    // Tests pools collect from iterators in order
    #[test]
    fn test_image_pool_from_iterator() {
        let images = [solid(1, 1, RED), solid(1, 1, BLUE)];
        let pool: ImagePool<'_> = images.iter().collect();

        assert_eq!(pool.len(), 2);
        assert!(!pool.is_empty());
        assert_eq!(pool.get(1).map(|image| *image.get_pixel(0, 0)), Some(BLUE));
        assert!(pool.get(2).is_none());
    }
}
