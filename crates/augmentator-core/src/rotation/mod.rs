//! Image rotation without interpolation.
//!
//! Two forward-mapping strategies share one configuration:
//! - **Center shear** ([`CenterShearRotator`]): three-shear decomposition
//!   around the image center. The canvas grows to hold the rotated image
//!   and neighbouring pixels stay together, so there are no holes.
//! - **Pivot matrix** ([`PivotMatrixRotator`]): a rotation matrix around any
//!   pivot. The canvas keeps its size, pixels rotated off the canvas are
//!   lost and truncation leaves gaps.
//!
//! [`Rotator`] picks between them from a validated [`RotationConfig`]:
//! anti-aliased center rotations use the shear path, everything else the
//! matrix path.
//!
//! # Example
//!
//! ```ignore
//! use augmentator_core::rotation::{RotationOptions, Rotator};
//! use augmentator_core::Augmenter;
//!
//! let rotator = Rotator::from_options(&RotationOptions::new().angle(30)).into_inner();
//! let rotated = rotator.augment(&image)?;
//! ```

mod config;
mod geometry;
mod matrix;
mod shear;

pub use config::{
    RelativePivot, RotationConfig, RotationMethod, RotationOptions, RotationStrategy,
    DEFAULT_ANGLE, MAX_ANGLE,
};
pub use geometry::{center_index, degrees_to_radians, expanded_canvas, resolve_pivot};
pub use matrix::PivotMatrixRotator;
pub use shear::CenterShearRotator;

use crate::buffer::PixelBuffer;
use crate::types::{AugmentError, Validated};
use crate::Augmenter;

/// Rotation augmenter dispatching to the shear or matrix rotator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotator {
    config: RotationConfig,
}

impl Rotator {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    /// Validate `options` and build a rotator from them.
    pub fn from_options(options: &RotationOptions) -> Validated<Self> {
        options.build().map(Self::new)
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }
}

impl Augmenter for Rotator {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        apply_rotation(image, &self.config)
    }
}

/// Rotate an image according to `config`.
///
/// Returns a new buffer; `image` is never modified. Fails only if the
/// buffer is malformed or `config` is in a state validation cannot produce.
pub fn apply_rotation(
    image: &PixelBuffer,
    config: &RotationConfig,
) -> Result<PixelBuffer, AugmentError> {
    image.validate()?;
    let angle = config.angle_degrees();

    match config.strategy()? {
        RotationStrategy::Center {
            anti_aliasing: true,
        } => {
            log::debug!(
                "rotating {}x{} by {} degrees with shears",
                image.width,
                image.height,
                angle
            );
            Ok(CenterShearRotator::new(angle).rotate(image))
        }
        RotationStrategy::Center {
            anti_aliasing: false,
        } => {
            log::debug!(
                "rotating {}x{} by {} degrees around the center",
                image.width,
                image.height,
                angle
            );
            Ok(PivotMatrixRotator::new(angle, None).rotate(image))
        }
        RotationStrategy::Point { pivot } => {
            log::debug!(
                "rotating {}x{} by {} degrees around ({}%, {}%)",
                image.width,
                image.height,
                angle,
                pivot.x,
                pivot.y
            );
            Ok(PivotMatrixRotator::new(angle, Some(pivot)).rotate(image))
        }
    }
}
