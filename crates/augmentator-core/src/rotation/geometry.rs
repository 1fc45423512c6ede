//! Coordinate helpers shared by the two rotators.

use super::config::RelativePivot;

/// Convert an angle in whole degrees to radians.
#[inline]
pub fn degrees_to_radians(angle_degrees: f64) -> f64 {
    angle_degrees.to_radians()
}

/// Round to the nearest integer, ties to even.
///
/// Every rounding step of the shear rotation uses this mode, so a pixel
/// exactly halfway between two cells always lands on the same one.
#[inline]
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Index of the center cell along an axis of `extent` cells.
///
/// `round((extent + 1) / 2) - 1`; for even extents this picks one of the two
/// middle cells according to [`round_half_even`].
#[inline]
pub fn center_index(extent: u32) -> i64 {
    round_half_even((f64::from(extent) + 1.0) / 2.0 - 1.0)
}

/// Canvas `(width, height)` large enough to hold an image rotated by `angle_rad`.
///
/// The bounding box of the rotated rectangle plus one cell of padding on
/// each axis, which absorbs the rounding of the shear steps.
pub fn expanded_canvas(width: u32, height: u32, angle_rad: f64) -> (u32, u32) {
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();
    let w = f64::from(width);
    let h = f64::from(height);

    let new_height = round_half_even((h * cos).abs() + (w * sin).abs()) + 1;
    let new_width = round_half_even((w * cos).abs() + (h * sin).abs()) + 1;

    (new_width as u32, new_height as u32)
}

/// Absolute `(x, y)` pivot in pixels.
///
/// `None` selects the image center with integer division; a relative pivot
/// is scaled by the image dimensions and truncated.
pub fn resolve_pivot(width: u32, height: u32, pivot: Option<RelativePivot>) -> (i64, i64) {
    match pivot {
        None => (i64::from(width / 2), i64::from(height / 2)),
        Some(p) => (
            (f64::from(width) * (p.x / 100.0)) as i64,
            (f64::from(height) * (p.y / 100.0)) as i64,
        ),
    }
}

/// A 2x2 rotation matrix applied to column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    m: [[f64; 2]; 2],
}

impl RotationMatrix {
    /// The transpose of `[[cos, -sin], [sin, cos]]`.
    pub fn transposed(angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        let standard = [[cos, -sin], [sin, cos]];
        Self {
            m: [
                [standard[0][0], standard[1][0]],
                [standard[0][1], standard[1][1]],
            ],
        }
    }

    /// Multiply the offset `(x, y)` by the matrix.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m[0][0] * x + self.m[0][1] * y,
            self.m[1][0] * x + self.m[1][1] * y,
        )
    }
}
