//! WASM bindings for the augmentations.
//!
//! Every function takes the source image and a plain JS options object whose
//! fields match the core options structs (`undefined` or `null` selects all
//! defaults). Invalid options never throw: they are corrected and reported on
//! the browser console. Errors are only returned for malformed images.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const rotated = rotate(image, { method: 'point', angle: 30, pivot: { x: 25, y: 75 }, anti_aliasing: false });
//! const mirrored = flip(rotated, { axis: 'xy' });
//! ```

use augmentator_core::rotation::{RotationOptions, Rotator};
use augmentator_core::transform::{
    ColorOptions, ColorTransformer, CropOptions, Cropper, EraseOptions, Eraser, FlipOptions,
    Flipper, MixOptions, Mixer, NoiseInjector, NoiseOptions, TranslateOptions, Translator,
};
use augmentator_core::{AugmentError, Augmenter, ConfigWarning, PixelBuffer, Validated};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Rotate an image.
///
/// Options: `method` (`center` | `point`), `angle` (0 to 360), `pivot`
/// (`{ x, y }` in percent, method `point` only) and `anti_aliasing`.
#[wasm_bindgen]
pub fn rotate(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: RotationOptions = parse_options(options)?;
    run(image, Rotator::from_options(&options))
}

/// Mirror an image. Options: `axis` (`x` | `y` | `xy`).
#[wasm_bindgen]
pub fn flip(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: FlipOptions = parse_options(options)?;
    run(image, Flipper::from_options(&options))
}

/// Shift an image. Options: `direction` (`up` | `down` | `left` | `right`)
/// and `value` (0 to 1).
#[wasm_bindgen]
pub fn translate(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: TranslateOptions = parse_options(options)?;
    run(image, Translator::from_options(&options))
}

/// Crop an image.
///
/// Options: `method` (`center` | `random`), `value` (0 to 1) and `seed`
/// (method `random` only).
#[wasm_bindgen]
pub fn crop(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: CropOptions = parse_options(options)?;
    run(image, Cropper::from_options(&options))
}

/// Transform color channels.
///
/// Options: `method` (`min` | `max` | `kill` | `keep` | `inc` | `dec`),
/// `value`, `channels` (e.g. `"rg"`) and `percentage`.
#[wasm_bindgen]
pub fn transform_color(
    image: &JsPixelBuffer,
    options: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let options: ColorOptions = parse_options(options)?;
    run(image, ColorTransformer::from_options(&options))
}

/// Blend an image with `mix_image`. Options: `method` (`avg` | `rel`) and
/// `value` (weight of `image` for `rel`).
#[wasm_bindgen]
pub fn mix(
    image: &JsPixelBuffer,
    mix_image: &JsPixelBuffer,
    options: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let options: MixOptions = parse_options(options)?;
    let mix_image = mix_image.to_buffer().map_err(to_js_error)?;
    run(image, Mixer::from_options(&options, mix_image))
}

/// Add noise to an image.
///
/// Options: `method` (`gauss` | `salt_pepper`), `value` (0 to 1) and `seed`.
#[wasm_bindgen]
pub fn inject_noise(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: NoiseOptions = parse_options(options)?;
    run(image, NoiseInjector::from_options(&options))
}

/// Fill random rectangles with a solid color.
///
/// Options: `size` (area fraction per rectangle, below 0.4), `count`,
/// `color` (`#rrggbb`) and `seed`.
#[wasm_bindgen]
pub fn erase(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options: EraseOptions = parse_options(options)?;
    run(image, Eraser::from_options(&options))
}

/// Validate an options object without applying it.
///
/// `kind` is one of `rotate`, `flip`, `translate`, `crop`, `color`, `mix`,
/// `noise` or `erase`. Returns the correction messages, empty if every
/// option was accepted.
#[wasm_bindgen]
pub fn option_warnings(kind: &str, options: JsValue) -> Result<js_sys::Array, JsValue> {
    let warnings = match kind {
        "rotate" => parse_options::<RotationOptions>(options)?.build().warnings,
        "flip" => parse_options::<FlipOptions>(options)?.build().warnings,
        "translate" => parse_options::<TranslateOptions>(options)?.build().warnings,
        "crop" => parse_options::<CropOptions>(options)?.build().warnings,
        "color" => parse_options::<ColorOptions>(options)?.build().warnings,
        "mix" => mix_warnings(&parse_options(options)?),
        "noise" => parse_options::<NoiseOptions>(options)?.build().warnings,
        "erase" => parse_options::<EraseOptions>(options)?.build().warnings,
        _ => return Err(JsValue::from_str(&format!("Unknown augmentation: {}", kind))),
    };

    Ok(warning_messages(&warnings)
        .into_iter()
        .map(|message| JsValue::from_str(&message))
        .collect())
}

/// Mix options are checked without a second image; validation never looks at it.
fn mix_warnings(options: &MixOptions) -> Vec<ConfigWarning> {
    options.build(PixelBuffer::background(0, 0)).warnings
}

/// Deserialize an options object, treating `undefined` and `null` as defaults.
fn parse_options<T: DeserializeOwned + Default>(options: JsValue) -> Result<T, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// Apply a freshly built augmenter. Its warnings were already logged when
/// they were recorded.
fn run<A: Augmenter>(
    image: &JsPixelBuffer,
    built: Validated<A>,
) -> Result<JsPixelBuffer, JsValue> {
    augment_image(image, &built.value).map_err(to_js_error)
}

pub(crate) fn augment_image(
    image: &JsPixelBuffer,
    augmenter: &dyn Augmenter,
) -> Result<JsPixelBuffer, AugmentError> {
    let source = image.to_buffer()?;
    augmenter.augment(&source).map(JsPixelBuffer::from_buffer)
}

pub(crate) fn warning_messages(warnings: &[ConfigWarning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

fn to_js_error(e: AugmentError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
