//! Augmentations other than rotation.
//!
//! - [`Flipper`]: mirror along rows, columns or both
//! - [`Translator`]: shift the image, filling vacated cells with white
//! - [`Cropper`]: center or random crop by a relative amount
//! - [`ColorTransformer`]: per-channel clamping, masking and brightness
//! - [`Mixer`]: blend with a second image
//! - [`NoiseInjector`]: gaussian or salt-and-pepper noise
//! - [`Eraser`]: fill random rectangles with a solid color
//!
//! Geometric transforms are exact pixel moves; nothing is interpolated.
//! Randomized transforms take a seed and reseed on every call.

mod color;
mod crop;
mod erase;
mod flip;
mod mix;
mod noise;
mod translate;

pub use color::{ChannelSet, ColorMethod, ColorOptions, ColorTransformer};
pub use crop::{apply_center_crop, apply_random_crop, CropMethod, CropOptions, Cropper};
pub use erase::{parse_hex_color, EraseOptions, Eraser};
pub use flip::{FlipAxis, FlipOptions, Flipper};
pub use mix::{MixMethod, MixOptions, Mixer};
pub use noise::{NoiseInjector, NoiseMethod, NoiseOptions};
pub use translate::{Direction, TranslateOptions, Translator};

use crate::types::{push_warning, ConfigWarning};

/// Accept `value` if it lies in `[0, 1]`, otherwise fall back to `default`.
///
/// Values at or above `caution`, if given, are kept but flagged as possibly
/// changing the image label.
fn validate_fraction(
    option: &'static str,
    value: f64,
    default: f64,
    caution: Option<f64>,
    warnings: &mut Vec<ConfigWarning>,
) -> f64 {
    if !(0.0..=1.0).contains(&value) {
        push_warning(
            warnings,
            ConfigWarning::OutOfRange {
                option,
                value: value.to_string(),
                range: "0..=1",
                default: default.to_string(),
            },
        );
        return default;
    }
    if caution.is_some_and(|caution| value >= caution) {
        push_warning(warnings, ConfigWarning::MayNotPreserveLabel { option, value });
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fraction() {
        let mut warnings = Vec::new();
        assert_eq!(validate_fraction("value", 0.1, 0.2, Some(0.4), &mut warnings), 0.1);
        assert!(warnings.is_empty());

        assert_eq!(validate_fraction("value", 0.4, 0.2, Some(0.4), &mut warnings), 0.4);
        assert!(matches!(
            warnings[0],
            ConfigWarning::MayNotPreserveLabel { .. }
        ));

        assert_eq!(validate_fraction("value", -0.1, 0.2, Some(0.4), &mut warnings), 0.2);
        assert_eq!(validate_fraction("value", f64::NAN, 0.2, None, &mut warnings), 0.2);
        assert_eq!(warnings.len(), 3);

        assert_eq!(validate_fraction("value", 1.0, 0.2, None, &mut warnings), 1.0);
        assert_eq!(warnings.len(), 3);
    }
}
