//! Blending an image with a fixed second image.
//!
//! When the shapes differ, both images are first padded with white to the
//! larger height and the larger width. Padding is split between the two
//! sides of an axis, with the odd cell going to the bottom or right.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::types::{push_warning, AugmentError, ConfigWarning, Validated};
use crate::Augmenter;

const DEFAULT_VALUE: f64 = 0.5;

/// How the two images are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixMethod {
    /// Integer mean of both samples.
    #[default]
    Avg,
    /// Weighted sum, `value` for the augmented image and `1 - value` for the
    /// mix image.
    Rel,
}

impl MixMethod {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "avg" => Some(MixMethod::Avg),
            "rel" => Some(MixMethod::Rel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MixMethod::Avg => "avg",
            MixMethod::Rel => "rel",
        }
    }
}

/// Raw mix options. The second image is supplied to [`MixOptions::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixOptions {
    /// `avg` or `rel`
    pub method: String,
    /// Weight of the augmented image for `rel` (0.0 to 1.0)
    pub value: f64,
}

impl Default for MixOptions {
    fn default() -> Self {
        Self {
            method: MixMethod::default().as_str().to_string(),
            value: DEFAULT_VALUE,
        }
    }
}

impl MixOptions {
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

    /// Validate the options and attach the image to mix with.
    ///
    /// `avg` always uses a weight of 0.5; any other weight given with it is
    /// replaced and reported.
    pub fn build(&self, mix_image: PixelBuffer) -> Validated<Mixer> {
        let mut warnings = Vec::new();

        let method = MixMethod::parse(&self.method).unwrap_or_else(|| {
            push_warning(
                &mut warnings,
                ConfigWarning::UnknownValue {
                    option: "method",
                    value: self.method.clone(),
                    default: MixMethod::default().as_str().to_string(),
                },
            );
            MixMethod::default()
        });

        let in_range = (0.0..=1.0).contains(&self.value);
        let value = match method {
            MixMethod::Rel if in_range => self.value,
            MixMethod::Avg if self.value == DEFAULT_VALUE => DEFAULT_VALUE,
            _ => {
                let range = if in_range { "0.5..=0.5" } else { "0..=1" };
                push_warning(
                    &mut warnings,
                    ConfigWarning::OutOfRange {
                        option: "value",
                        value: self.value.to_string(),
                        range,
                        default: DEFAULT_VALUE.to_string(),
                    },
                );
                DEFAULT_VALUE
            }
        };

        Validated::new(
            Mixer {
                method,
                value,
                mix_image,
            },
            warnings,
        )
    }
}

/// Blends every input with one fixed image.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    method: MixMethod,
    value: f64,
    mix_image: PixelBuffer,
}

impl Mixer {
    pub fn from_options(options: &MixOptions, mix_image: PixelBuffer) -> Validated<Self> {
        options.build(mix_image)
    }

    pub fn method(&self) -> MixMethod {
        self.method
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn mix_image(&self) -> &PixelBuffer {
        &self.mix_image
    }

    #[inline]
    fn mix_sample(&self, a: u8, b: u8) -> u8 {
        match self.method {
            MixMethod::Avg => ((u16::from(a) + u16::from(b)) / 2) as u8,
            MixMethod::Rel => {
                let mixed = f64::from(a) * self.value + f64::from(b) * (1.0 - self.value);
                mixed.clamp(0.0, 255.0) as u8
            }
        }
    }
}

impl Augmenter for Mixer {
    fn name(&self) -> &'static str {
        "mix"
    }

    fn augment(&self, image: &PixelBuffer) -> Result<PixelBuffer, AugmentError> {
        image.validate()?;
        self.mix_image.validate()?;

        let width = image.width.max(self.mix_image.width);
        let height = image.height.max(self.mix_image.height);
        let mut output = pad_to(image, width, height);
        let other = pad_to(&self.mix_image, width, height);

        for (a, &b) in output.pixels.iter_mut().zip(&other.pixels) {
            *a = self.mix_sample(*a, b);
        }
        Ok(output)
    }
}

/// Center `image` on a white canvas of at least its own size.
fn pad_to(image: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    if image.width == width && image.height == height {
        return image.clone();
    }

    let mut output = PixelBuffer::background(width, height);
    let top = ((height - image.height) / 2) as usize;
    let left = ((width - image.width) / 2) as usize;
    let row_bytes = image.width as usize * CHANNELS;

    for y in 0..image.height as usize {
        let start = left * CHANNELS;
        output.row_mut(top + y)[start..start + row_bytes].copy_from_slice(image.row(y));
    }
    output
}
