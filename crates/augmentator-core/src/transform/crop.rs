//! Center and random cropping.
//!
//! The crop amount is a fraction of each dimension. A center crop splits it
//! evenly between both sides: a value of 0.3 removes 15% from the top,
//! bottom, left and right. A random crop removes the same total amount but
//! moves the window, so that between half and all of it comes off the top
//! (and the left). The output is smaller than the input.
//!
//! # Example
//!
//! ```ignore
//! // Keep the middle 70% of each axis
//! let cropped = apply_center_crop(&image, 0.3);
//!
//! // Keep 70% of each axis somewhere off-center
//! let mut rng = StdRng::seed_from_u64(7);
//! let shifted = apply_random_crop(&image, 0.3, &mut rng);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::validate_fraction;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_VALUE: f64 = 0.3;

/// Crops at or above this fraction may cut away the subject.
const CAUTION_VALUE: f64 = 0.5;

/// Where the crop window sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropMethod {
    #[default]
    Center,
    Random,
}

impl CropMethod {
    /// Parse a method name (case-insensitive).
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_lowercase().as_str() {
            "center" => Some(CropMethod::Center),
            "random" => Some(CropMethod::Random),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CropMethod::Center => "center",
            CropMethod::Random => "random",
        }
    }
}

/// Crop the center of an image.
///
/// Rows `[trunc(h·v/2), trunc(h·(1 - v/2)))` and the matching column range
/// are kept. The result is at least 1x1; `value` is clamped to `[0, 1]`.
///
/// # Returns
///
/// `EmptyImage` if the input has no pixels, since there is nothing to keep.
pub fn apply_center_crop(image: &PixelBuffer, value: f64) -> Result<PixelBuffer, AugmentError> {
    image.validate()?;
    if image.is_empty() {
        return Err(AugmentError::EmptyImage);
    }

    let half = value.clamp(0.0, 1.0) / 2.0;
    let rows = crop_range(image.height, half, 1.0 - half);
    let cols = crop_range(image.width, half, 1.0 - half);
    Ok(copy_window(image, rows, cols))
}

/// Crop an image at a random position.
///
/// Each axis draws `r` from `[0, 1)` and removes `v/(1+r)` of the extent
/// before the window and the rest of `v` after it. The result is at least
/// 1x1; `value` is clamped to `[0, 1]`.
///
/// # Returns
///
/// `EmptyImage` if the input has no pixels.
pub fn apply_random_crop<R: Rng + ?Sized>(
    image: &PixelBuffer,
    value: f64,
    rng: &mut R,
) -> Result<PixelBuffer, AugmentError> {
    image.validate()?;
    if image.is_empty() {
        return Err(AugmentError::EmptyImage);
    }

    let value = value.clamp(0.0, 1.0);
    let rows = random_range(image.height, value, rng);
    let cols = random_range(image.width, value, rng);
    Ok(copy_window(image, rows, cols))
}

fn random_range<R: Rng + ?Sized>(extent: u32, value: f64, rng: &mut R) -> (u32, u32) {
    let before = value / (1.0 + rng.random::<f64>());
    crop_range(extent, before, 1.0 - (value - before))
}

/// Start and end of the kept range along an axis of `extent` cells.
///
/// `start` and `end` are fractions of the extent; the range keeps at least
/// one cell.
fn crop_range(extent: u32, start: f64, end: f64) -> (u32, u32) {
    let size = f64::from(extent);
    let start = ((size * start) as u32).min(extent - 1);
    let end = ((size * end) as u32).clamp(start + 1, extent);
    (start, end)
}

/// Copy the rows `top..bottom` and columns `left..right` into a new buffer.
fn copy_window(
    image: &PixelBuffer,
    (top, bottom): (u32, u32),
    (left, right): (u32, u32),
) -> PixelBuffer {
    let out_width = right - left;
    let out_height = bottom - top;
    let mut output = vec![0u8; out_width as usize * out_height as usize * CHANNELS];

    // Copy pixel data row by row
    let row_bytes = out_width as usize * CHANNELS;
    for y in 0..out_height as usize {
        let src = &image.row(top as usize + y)[left as usize * CHANNELS..][..row_bytes];
        output[y * row_bytes..(y + 1) * row_bytes].copy_from_slice(src);
    }

    PixelBuffer {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

/// Raw crop options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// `center` or `random`
    pub method: String,
    /// Fraction of each dimension to remove (0.0 to 1.0)
    pub value: f64,
    /// Seed for the window position (`random` only)
    pub seed: u64,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            method: CropMethod::default().as_str().to_string(),
            value: DEFAULT_VALUE,
            seed: 0,
        }
    }
}

impl CropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self) -> Validated<Cropper> {
        let mut warnings = Vec::new();
        let method = CropMethod::parse(&self.method).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "method",
                    value: self.method.clone(),
                    default: CropMethod::default().as_str().to_string(),
                },
            );
            CropMethod::default()
        });
        let value = validate_fraction(
            "value",
            self.value,
            DEFAULT_VALUE,
            Some(CAUTION_VALUE),
            &mut warnings,
        );
        Validated::new(
            Cropper {
                method,
                value,
                seed: self.seed,
            },
            warnings,
        )
    }
}

/// Crop augmenter.
///
/// Random crops reseed from `seed` on every call, so the same input always
/// gets the same window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cropper {
    method: CropMethod,
    value: f64,
    seed: u64,
}

impl Default for Cropper {
    fn default() -> Self {
        CropOptions::default().build().into_inner()
    }
}

impl Cropper {
    pub fn from_options(options: &CropOptions) -> Validated<Self> {
        options.build()
    }

    pub fn method(&self) -> CropMethod {
        self.method
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Augmenter for Cropper {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        match self.method {
            CropMethod::Center => apply_center_crop(image, self.value),
            CropMethod::Random => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                apply_random_crop(image, self.value, &mut rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        PixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_zero_crop_keeps_image() {
        let img = test_image(20, 10);
        let result = apply_center_crop(&img, 0.0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_default_crop() {
        let img = test_image(100, 100);
        let result = Cropper::default().augment(&img).unwrap();

        // Rows 15..85
        assert_eq!(result.width, 70);
        assert_eq!(result.height, 70);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = apply_center_crop(&img, 0.4).unwrap();

        // Rows and columns 2..8
        assert_eq!((result.width, result.height), (6, 6));
        // First pixel from (2, 2): 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
        assert_eq!(result.pixel(5, 5), img.pixel(7, 7));
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 50);
        let result = apply_center_crop(&img, 0.5).unwrap();

        // 200 * 0.25 = 50 .. 150, 50 * 0.25 = 12 .. 37
        assert_eq!(result.width, 100);
        assert_eq!(result.height, 25);
        assert_eq!(result.pixel(0, 0), img.pixel(12, 50));
    }

    #[test]
    fn test_full_crop_keeps_one_pixel() {
        let img = test_image(10, 8);
        let result = apply_center_crop(&img, 1.0).unwrap();

        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixel(0, 0), img.pixel(4, 5));
    }

    #[test]
    fn test_single_pixel_image() {
        let img = test_image(1, 1);
        let result = apply_center_crop(&img, 0.9).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = PixelBuffer::background(0, 5);
        assert_eq!(apply_center_crop(&img, 0.3), Err(AugmentError::EmptyImage));
    }

    #[test]
    fn test_options_validation() {
        let built = CropOptions::new().value(2.0).build();
        assert_eq!(built.value.value(), 0.3);
        assert_eq!(built.warnings.len(), 1);

        let built = CropOptions::new().value(0.6).build();
        assert_eq!(built.value.value(), 0.6);
        assert_eq!(built.warnings.len(), 1);

        assert!(CropOptions::new().value(0.2).build().is_clean());
    }

    #[test]
    fn test_options_from_json() {
        let options: CropOptions = serde_json::from_str(r#"{"value": 0.1}"#).unwrap();
        let cropper = options.build().into_inner();
        assert_eq!(cropper.value(), 0.1);
        assert_eq!(cropper.method(), CropMethod::Center);

        let options: CropOptions =
            serde_json::from_str(r#"{"method": "random", "seed": 42}"#).unwrap();
        let cropper = options.build().into_inner();
        assert_eq!(cropper.method(), CropMethod::Random);
        assert_eq!(cropper.seed(), 42);
    }

    // ===================== Random crop =====================

    #[test]
    fn test_method_parsing() {
        assert_eq!(CropMethod::parse("Random"), Some(CropMethod::Random));
        assert_eq!(CropMethod::parse("center"), Some(CropMethod::Center));
        assert_eq!(CropMethod::parse("corner"), None);

        let built = CropOptions::new().method("corner").build();
        assert_eq!(built.value.method(), CropMethod::Center);
        assert!(matches!(
            built.warnings[0],
            ConfigWarning::UnknownValue {
                option: "method",
                ..
            }
        ));
    }

    #[test]
    fn test_random_crop_is_repeatable() {
        let img = test_image(64, 48);
        let cropper = CropOptions::new()
            .method("random")
            .seed(9)
            .build()
            .into_inner();

        let first = cropper.augment(&img).unwrap();
        let second = cropper.augment(&img).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_crop_window_moves_with_seed() {
        let img = test_image(200, 200);
        let mut origins = Vec::new();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = apply_random_crop(&img, 0.4, &mut rng).unwrap();

            // 40% comes off each axis, give or take truncation
            assert!((119..=121).contains(&result.width), "width {}", result.width);
            assert!((119..=121).contains(&result.height), "height {}", result.height);
            origins.push(result.pixel(0, 0));
        }
        origins.sort();
        origins.dedup();
        assert!(origins.len() > 1);
    }

    #[test]
    fn test_random_crop_offset_bounds() {
        // Each pixel stores its own (row, col)
        let mut img = PixelBuffer::filled(100, 100, [0, 0, 0]);
        for row in 0..100 {
            for col in 0..100 {
                img.set_pixel(row, col, [row as u8, col as u8, 0]);
            }
        }

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = apply_random_crop(&img, 0.5, &mut rng).unwrap();
            // Between half and all of the 50% comes off the top-left
            let [top, left, _] = result.pixel(0, 0);
            assert!((25..=50).contains(&top), "top {}", top);
            assert!((25..=50).contains(&left), "left {}", left);
        }
    }

    #[test]
    fn test_random_zero_crop_keeps_image() {
        let img = test_image(13, 7);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(apply_random_crop(&img, 0.0, &mut rng).unwrap(), img);
    }

    #[test]
    fn test_random_full_crop_keeps_one_pixel() {
        let img = test_image(10, 8);
        let mut rng = StdRng::seed_from_u64(5);
        let result = apply_random_crop(&img, 1.0, &mut rng).unwrap();
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_random_crop_empty_image_rejected() {
        let img = PixelBuffer::background(4, 0);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            apply_random_crop(&img, 0.3, &mut rng),
            Err(AugmentError::EmptyImage)
        );
    }
}
