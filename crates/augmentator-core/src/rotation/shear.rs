//! Center rotation by three successive shears.
//!
//! A rotation by θ factors into a horizontal shear by `-tan(θ/2)`, a
//! vertical shear by `sin θ` and another horizontal shear by `-tan(θ/2)`.
//! Each shear only moves pixels along one axis, and rounding after every
//! step keeps neighbouring source pixels in neighbouring destination cells,
//! so the result has none of the holes a direct matrix mapping leaves.
//!
//! The mapping is forward: each source pixel is written to exactly one
//! destination cell. Two sources may round to the same cell, in which case
//! the later one in row-major order wins.
//!
//! Positive angles turn the image clockwise.
//!
//! # Large angles
//!
//! `tan(θ/2)` grows without bound as θ approaches 180°, and the shears then
//! cancel out only up to floating point error. For angles in (90°, 270°)
//! the offsets are first turned by a half turn, which is exact on integers,
//! and only the remaining `θ - 180°` is sheared. This changes the rounding,
//! and so the exact output, for every angle in that range.

use super::geometry::{center_index, degrees_to_radians, expanded_canvas, round_half_even};
use crate::buffer::PixelBuffer;

/// Anti-aliased rotation around the image center with an expanding canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterShearRotator {
    angle_degrees: u16,
}

impl CenterShearRotator {
    pub fn new(angle_degrees: u16) -> Self {
        Self { angle_degrees }
    }

    pub fn angle_degrees(&self) -> u16 {
        self.angle_degrees
    }

    /// Rotate `image` into a new, possibly larger, buffer.
    ///
    /// The output is `round(|h·cos| + |w·sin|) + 1` rows by
    /// `round(|w·cos| + |h·sin|) + 1` columns. Cells no source pixel maps
    /// to keep the background fill.
    pub fn rotate(&self, image: &PixelBuffer) -> PixelBuffer {
        let angle = degrees_to_radians(f64::from(self.angle_degrees));
        let (new_width, new_height) = expanded_canvas(image.width, image.height, angle);
        let mut output = PixelBuffer::background(new_width, new_height);

        if image.is_empty() {
            return output;
        }

        let (height, width) = (i64::from(image.height), i64::from(image.width));
        let center_row = center_index(image.height);
        let center_col = center_index(image.width);
        let new_center_row = center_index(new_height);
        let new_center_col = center_index(new_width);
        let max_row = i64::from(new_height) - 1;
        let max_col = i64::from(new_width) - 1;

        let (half_turn, shear_angle) = split_half_turn(self.angle_degrees);
        let shears = ShearFactors::new(shear_angle);

        for row in 0..height {
            for col in 0..width {
                // Offsets are measured from the far corner, so the image is
                // point-reflected on the way in and again on the way out
                let mut y = height - 1 - row - center_row;
                let mut x = width - 1 - col - center_col;
                if half_turn {
                    x = -x;
                    y = -y;
                }

                let (x, y) = shears.apply(x, y);

                // Rounding may overshoot the padded canvas by one cell
                let dst_row = (new_center_row - y).clamp(0, max_row);
                let dst_col = (new_center_col - x).clamp(0, max_col);

                output.set_pixel(
                    dst_row as usize,
                    dst_col as usize,
                    image.pixel(row as usize, col as usize),
                );
            }
        }

        output
    }
}

/// Split an angle into an optional half turn and the remainder in radians.
fn split_half_turn(angle_degrees: u16) -> (bool, f64) {
    let degrees = f64::from(angle_degrees);
    if angle_degrees > 90 && angle_degrees < 270 {
        (true, degrees_to_radians(degrees - 180.0))
    } else {
        (false, degrees_to_radians(degrees))
    }
}

/// Shear coefficients for one rotation angle.
#[derive(Debug, Clone, Copy)]
struct ShearFactors {
    tangent: f64,
    sine: f64,
}

impl ShearFactors {
    fn new(angle_rad: f64) -> Self {
        Self {
            tangent: (angle_rad / 2.0).tan(),
            sine: angle_rad.sin(),
        }
    }

    /// Shear the integer offset `(x, y)`, rounding after each step.
    #[inline]
    fn apply(&self, x: i64, y: i64) -> (i64, i64) {
        let (x, y) = (x as f64, y as f64);

        let x = round_half_even(x - y * self.tangent) as f64;
        let y = round_half_even(x * self.sine + y) as f64;
        let x = round_half_even(x - y * self.tangent);

        (x, y as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BACKGROUND_FILL;

    /// Image where each pixel encodes its own position: (row, col, 0).
    fn position_image(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::filled(width, height, [0, 0, 0]);
        for row in 0..height as usize {
            for col in 0..width as usize {
                img.set_pixel(row, col, [row as u8, col as u8, 0]);
            }
        }
        img
    }

    fn count_background(img: &PixelBuffer) -> usize {
        img.pixels
            .chunks_exact(3)
            .filter(|p| *p == BACKGROUND_FILL)
            .count()
    }

    #[test]
    fn test_shear_factors_zero() {
        let shears = ShearFactors::new(0.0);
        assert_eq!(shears.apply(3, -2), (3, -2));
    }

    #[test]
    fn test_shear_factors_quarter_turn() {
        let shears = ShearFactors::new(degrees_to_radians(90.0));
        // (x, y) -> (-y, x)
        assert_eq!(shears.apply(1, 0), (0, 1));
        assert_eq!(shears.apply(0, 1), (-1, 0));
        assert_eq!(shears.apply(-2, -2), (2, -2));
    }

    #[test]
    fn test_split_half_turn() {
        assert_eq!(split_half_turn(90), (false, degrees_to_radians(90.0)));
        assert_eq!(split_half_turn(270), (false, degrees_to_radians(270.0)));
        assert_eq!(split_half_turn(180), (true, 0.0));
        let (half, rest) = split_half_turn(200);
        assert!(half);
        assert!((rest - degrees_to_radians(20.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_angle_pads_and_preserves() {
        let img = position_image(4, 4);
        let result = CenterShearRotator::new(0).rotate(&img);

        assert_eq!(result.width, 5);
        assert_eq!(result.height, 5);

        // The 4x4 center rounds to (2, 2) and the 5x5 center to (2, 2),
        // so the content moves one cell down and right
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(result.pixel(row + 1, col + 1), img.pixel(row, col));
            }
        }
        for i in 0..5 {
            assert_eq!(result.pixel(0, i), BACKGROUND_FILL);
            assert_eq!(result.pixel(i, 0), BACKGROUND_FILL);
        }
    }

    #[test]
    fn test_zero_angle_odd_height() {
        let img = position_image(3, 5);
        let result = CenterShearRotator::new(0).rotate(&img);

        assert_eq!((result.width, result.height), (4, 6));
        for row in 0..5 {
            for col in 0..3 {
                assert_eq!(result.pixel(row, col + 1), img.pixel(row, col));
            }
        }
        for col in 0..4 {
            assert_eq!(result.pixel(5, col), BACKGROUND_FILL);
        }
    }

    #[test]
    fn test_uniform_quarter_turn() {
        let img = PixelBuffer::filled(4, 4, [10, 10, 10]);
        let result = CenterShearRotator::new(90).rotate(&img);

        assert_eq!((result.width, result.height), (5, 5));
        for row in 0..5 {
            for col in 0..5 {
                let expected = if row == 0 || col == 4 {
                    BACKGROUND_FILL
                } else {
                    [10, 10, 10]
                };
                assert_eq!(result.pixel(row, col), expected, "cell ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let img = position_image(4, 4);
        let result = CenterShearRotator::new(90).rotate(&img);

        // The top row ends up as the right-most filled column, read downwards
        for col in 0..4 {
            assert_eq!(result.pixel(col + 1, 3), img.pixel(0, col));
        }
        // The left column ends up as the top filled row, read right to left
        for row in 0..4 {
            assert_eq!(result.pixel(1, 3 - row), img.pixel(row, 0));
        }
    }

    #[test]
    fn test_half_turn_point_reflects() {
        let img = position_image(4, 4);
        let result = CenterShearRotator::new(180).rotate(&img);

        assert_eq!((result.width, result.height), (5, 5));
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(result.pixel(3 - row, 3 - col), img.pixel(row, col));
            }
        }
        assert_eq!(count_background(&result), 9);
    }

    #[test]
    fn test_half_turn_rectangular() {
        let img = position_image(30, 20);
        let result = CenterShearRotator::new(180).rotate(&img);

        assert_eq!((result.width, result.height), (31, 21));
        // Every source pixel lands in its own cell
        assert_eq!(count_background(&result), 31 * 21 - 30 * 20);
    }

    #[test]
    fn test_full_turn_matches_zero() {
        let img = position_image(6, 8);
        let zero = CenterShearRotator::new(0).rotate(&img);
        let full = CenterShearRotator::new(360).rotate(&img);
        assert_eq!(zero, full);
    }

    #[test]
    fn test_diagonal_expands_canvas() {
        let img = PixelBuffer::filled(20, 20, [0, 0, 0]);
        let result = CenterShearRotator::new(45).rotate(&img);

        assert!(result.width > img.width);
        assert!(result.height > img.height);
        // Shearing leaves no holes at 45 degrees: all 400 pixels survive
        assert_eq!(result.pixel_count() - count_background(&result), 400);
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let img = position_image(30, 20);
        let result = CenterShearRotator::new(270).rotate(&img);
        assert_eq!((result.width, result.height), (21, 31));
        assert_eq!(count_background(&result), 21 * 31 - 600);
    }

    #[test]
    fn test_overshoot_clamped_to_edge() {
        let img = position_image(20, 14);
        let result = CenterShearRotator::new(12).rotate(&img);
        assert_eq!((result.width, result.height), (23, 19));

        // The top-right source pixel rounds to column 23, one past the canvas
        let corner = img.pixel(0, 19);
        let mut cells = Vec::new();
        for row in 0..result.height as usize {
            for col in 0..result.width as usize {
                if result.pixel(row, col) == corner {
                    cells.push((row, col));
                }
            }
        }
        assert_eq!(cells, vec![(4, 22)]);

        // Its left neighbour rounded to the same edge cell and was overwritten
        let neighbour = img.pixel(0, 18);
        assert!(result.pixels.chunks_exact(3).all(|p| p != neighbour));
        assert_eq!(count_background(&result), 23 * 19 - 279);
    }

    #[test]
    fn test_single_pixel() {
        let img = PixelBuffer::filled(1, 1, [7, 7, 7]);
        for angle in [0, 45, 90, 137, 180, 270, 360] {
            let result = CenterShearRotator::new(angle).rotate(&img);
            assert_eq!((result.width, result.height), (2, 2), "angle {}", angle);
            assert_eq!(count_background(&result), 3, "angle {}", angle);
        }
    }

    #[test]
    fn test_empty_image() {
        let img = PixelBuffer::background(0, 0);
        let result = CenterShearRotator::new(30).rotate(&img);
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_input_untouched() {
        let img = position_image(5, 5);
        let before = img.clone();
        let _ = CenterShearRotator::new(33).rotate(&img);
        assert_eq!(img, before);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the canvas never shrinks the image area and stays bounded.
        #[test]
        fn prop_canvas_at_least_source_extent(
            width in 1u32..=40,
            height in 1u32..=40,
            angle in 0u16..=360,
        ) {
            let img = PixelBuffer::filled(width, height, [0, 0, 0]);
            let result = CenterShearRotator::new(angle).rotate(&img);

            prop_assert!(result.pixel_count() >= img.pixel_count());
            prop_assert!(result.width <= width + height + 1);
            prop_assert!(result.height <= width + height + 1);
        }

        /// Property: every output cell is either background or a source pixel.
        #[test]
        fn prop_output_only_contains_source_or_background(
            width in 1u32..=24,
            height in 1u32..=24,
            angle in 0u16..=360,
        ) {
            let img = PixelBuffer::filled(width, height, [10, 20, 30]);
            let result = CenterShearRotator::new(angle).rotate(&img);

            prop_assert!(result.validate().is_ok());
            let mut written = 0usize;
            for pixel in result.pixels.chunks_exact(3) {
                prop_assert!(pixel == [10, 20, 30] || pixel == [255, 255, 255]);
                if pixel == [10, 20, 30] {
                    written += 1;
                }
            }
            prop_assert!(written >= 1);
            prop_assert!(written <= img.pixel_count());
        }
    }
}
