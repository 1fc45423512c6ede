//! Pivot rotation with a plain rotation matrix.
//!
//! Every source pixel is rotated about the pivot, truncated to integer
//! coordinates and copied if it lands inside the image. The canvas keeps
//! the input size, so pixels rotated past the edge are dropped, and
//! truncation leaves some destination cells without a source (visible as
//! background-colored gaps).
//!
//! Positive angles turn the image counter-clockwise.

use super::config::RelativePivot;
use super::geometry::{degrees_to_radians, resolve_pivot, RotationMatrix};
use crate::buffer::PixelBuffer;

/// Aliased rotation around an arbitrary pivot on a same-size canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotMatrixRotator {
    angle_degrees: u16,
    pivot: Option<RelativePivot>,
}

impl PivotMatrixRotator {
    /// Rotate around `pivot`, or around the image center when `None`.
    pub fn new(angle_degrees: u16, pivot: Option<RelativePivot>) -> Self {
        Self {
            angle_degrees,
            pivot,
        }
    }

    pub fn angle_degrees(&self) -> u16 {
        self.angle_degrees
    }

    pub fn pivot(&self) -> Option<RelativePivot> {
        self.pivot
    }

    /// Rotate `image` into a new buffer of the same dimensions.
    pub fn rotate(&self, image: &PixelBuffer) -> PixelBuffer {
        let mut output = PixelBuffer::background(image.width, image.height);
        if image.is_empty() {
            return output;
        }

        let (pivot_x, pivot_y) = resolve_pivot(image.width, image.height, self.pivot);
        let matrix =
            RotationMatrix::transposed(degrees_to_radians(f64::from(self.angle_degrees)));
        let (width, height) = (i64::from(image.width), i64::from(image.height));

        for row in 0..height {
            for col in 0..width {
                let (dx, dy) = matrix.apply((col - pivot_x) as f64, (row - pivot_y) as f64);

                // Truncation toward zero, not rounding
                let dst_col = pivot_x + dx as i64;
                let dst_row = pivot_y + dy as i64;

                if (0..width).contains(&dst_col) && (0..height).contains(&dst_row) {
                    output.set_pixel(
                        dst_row as usize,
                        dst_col as usize,
                        image.pixel(row as usize, col as usize),
                    );
                }
            }
        }

        output
    }
}
